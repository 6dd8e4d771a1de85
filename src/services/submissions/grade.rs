use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::middlewares::RequireActor;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::tasks::can_act_for_origin;
use crate::utils::validate::validate_grade;

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    body: GradeSubmissionRequest,
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

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    let task = match storage.get_task_by_id(submission.task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TaskNotFound,
                "Task not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    // 只能批改与自己角色同来源的任务
    if !can_act_for_origin(&actor, task.origin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::TaskOriginMismatch,
            format!("Role {} cannot grade {} tasks", actor.role, task.origin),
        )));
    }

    if let Err(e) = validate_grade(body.grade, task.marks) {
        return Ok(e.to_response());
    }

    match storage
        .grade_submission(submission_id, body.grade, actor.id)
        .await
    {
        Ok(Some(graded)) => {
            info!(
                "Submission {} graded {} / {} by {}",
                submission_id, body.grade, task.marks, actor.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                graded,
                "Submission graded successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
