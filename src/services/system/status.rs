use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::responses::SystemStatusResponse;
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

/// 获取服务状态（只读）
pub async fn get_status(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let started_at = match request.app_data::<web::Data<AppStartTime>>() {
        Some(start) => start.start_datetime,
        None => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Start time not registered",
                )),
            );
        }
    };
    let config = service.get_config();

    let response = SystemStatusResponse {
        system_name: config.app.system_name.clone(),
        environment: config.app.environment.clone(),
        started_at,
        uptime_seconds: (chrono::Utc::now() - started_at).num_seconds(),
        max_batch_students: config.reports.max_batch_students,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Status retrieved successfully",
    )))
}
