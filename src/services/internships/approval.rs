use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InternshipService;
use crate::middlewares::RequireActor;
use crate::models::internships::responses::ApprovalHistoryResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn toggle_approval(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
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
    let storage = service.get_storage(request);

    // 版本冲突时返回 409，由调用方重试
    match storage.toggle_approval(internship_id, &actor).await {
        Ok(Some(internship)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            internship,
            "Approval state toggled",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InternshipNotFound,
            "Internship not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn approval_history(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_internship_by_id(internship_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::InternshipNotFound,
                "Internship not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    }

    match storage.list_approval_history(internship_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ApprovalHistoryResponse {
                internship_id,
                items,
            },
            "Approval history retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
