use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::models::tasks::entities::TaskOrigin;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_task(
    service: &TaskService,
    request: &HttpRequest,
    origin: TaskOrigin,
    task_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_task_by_id(task_id).await {
        // 路径中的来源必须与任务一致
        Ok(Some(task)) if task.origin == origin => Ok(HttpResponse::Ok().json(
            ApiResponse::success(task, "Task retrieved successfully"),
        )),
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
