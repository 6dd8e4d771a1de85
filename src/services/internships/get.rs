use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InternshipService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_internship(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_internship_by_id(internship_id).await {
        Ok(Some(internship)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            internship,
            "Internship retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InternshipNotFound,
            "Internship not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
