use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::InternshipService;
use crate::middlewares::RequireActor;
use crate::models::internships::requests::CreateInternshipRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_internship_request;

pub async fn create_internship(
    service: &InternshipService,
    request: &HttpRequest,
    body: CreateInternshipRequest,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    if let Err(e) = validate_internship_request(&body) {
        return Ok(e.to_response());
    }

    let storage = service.get_storage(request);
    match storage.create_internship(actor.id, body).await {
        Ok(internship) => {
            info!(
                "Internship {} at {} created by {} ({})",
                internship.id, internship.host_institution, actor.id, actor.role
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                internship,
                "Internship created successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
