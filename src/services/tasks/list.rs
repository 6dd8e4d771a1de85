use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::middlewares::RequireActor;
use crate::models::tasks::{
    entities::TaskOrigin, requests::TaskListParams, responses::TaskListResponse,
};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_tasks(
    service: &TaskService,
    request: &HttpRequest,
    origin: TaskOrigin,
    params: TaskListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_internship_by_id(params.internship_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::InternshipNotFound,
                "Internship not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    }

    match storage.list_tasks(params.internship_id, origin).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TaskListResponse { items },
            "Tasks retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn list_student_tasks(
    service: &TaskService,
    request: &HttpRequest,
    internship_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    if let Some(actor) = RequireActor::extract_actor(request)
        && !actor.can_view_student(student_id)
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Students may only view their own tasks",
        )));
    }

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

    match storage.list_tasks_for_student(internship_id, student_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TaskListResponse { items },
            "Tasks retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
