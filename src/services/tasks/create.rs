use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{TaskService, can_act_for_origin};
use crate::middlewares::RequireActor;
use crate::models::tasks::{entities::TaskOrigin, requests::CreateTaskRequest};
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_task(
    service: &TaskService,
    request: &HttpRequest,
    origin: TaskOrigin,
    body: CreateTaskRequest,
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

    if !can_act_for_origin(&actor, origin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::TaskOriginMismatch,
            format!("Role {} cannot issue {} tasks", actor.role, origin),
        )));
    }

    let storage = service.get_storage(request);
    match storage.create_task(origin, actor.id, body).await {
        Ok(response) => {
            if !response.rejected_students.is_empty() {
                warn!(
                    "Task {} dropped students not assigned to internship {}: {:?}",
                    response.task.id, response.task.internship_id, response.rejected_students
                );
            }
            info!(
                "{} task {} created in internship {} by {}",
                origin, response.task.id, response.task.internship_id, actor.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                response,
                "Task created successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
