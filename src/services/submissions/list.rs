use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::responses::SubmissionListResponse;
use crate::models::tasks::entities::TaskOrigin;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_task_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    origin: TaskOrigin,
    task_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_task_by_id(task_id).await {
        Ok(Some(task)) if task.origin == origin => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TaskNotFound,
                "Task not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    }

    match storage.list_task_submissions(task_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse { task_id, items },
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
