use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::RegistryService;
use crate::models::registry::requests::UpdateCompletionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn set_internship_completion(
    service: &RegistryService,
    request: &HttpRequest,
    student_id: i64,
    body: UpdateCompletionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .set_student_internship_completion(student_id, body.did_internship)
        .await
    {
        Ok(Some(student)) => {
            info!(
                "Student {} internship completion set to {}",
                student_id, student.did_internship
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Internship completion updated",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
