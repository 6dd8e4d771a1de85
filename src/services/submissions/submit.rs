use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::SubmissionService;
use crate::middlewares::RequireActor;
use crate::models::submissions::requests::SubmitTaskRequest;
use crate::models::tasks::entities::TaskOrigin;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_file_ref;

pub async fn submit(
    service: &SubmissionService,
    request: &HttpRequest,
    origin: TaskOrigin,
    task_id: i64,
    body: SubmitTaskRequest,
) -> ActixResult<HttpResponse> {
    // 学生身份即调用方 ID
    let student_id = match RequireActor::extract_actor(request) {
        Some(actor) => actor.id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };
    let storage = service.get_storage(request);

    let task = match storage.get_task_by_id(task_id).await {
        Ok(Some(task)) if task.origin == origin => task,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TaskNotFound,
                "Task not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    if let Err(e) = validate_file_ref(&body.file_ref) {
        return Ok(e.to_response());
    }
    let file_ref = body.file_ref.trim();

    if !task.is_assigned_to(student_id) {
        warn!(
            "Student {} tried to submit task {} without being assigned",
            student_id, task_id
        );
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Student is not assigned to this task",
        )));
    }

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    match storage
        .upsert_submission(task_id, student_id, &student.name, file_ref)
        .await
    {
        Ok(submission) => {
            info!(
                "Submission {} saved for task {} by student {}",
                submission.id, task_id, student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Submission saved successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
