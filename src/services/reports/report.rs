use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReportService;
use super::involvement::{build_involvement_report, build_involvement_reports};
use crate::middlewares::RequireActor;
use crate::models::reports::requests::BatchReportRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_report(
    service: &ReportService,
    request: &HttpRequest,
    internship_id: i64,
    student_id: i64,
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

    // 学生只能查看自己的报告
    if !actor.can_view_student(student_id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Students may only view their own report",
        )));
    }

    let storage = service.get_storage(request);
    match build_involvement_report(storage.as_ref(), internship_id, student_id).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Report generated successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn batch_reports(
    service: &ReportService,
    request: &HttpRequest,
    internship_id: i64,
    body: BatchReportRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let limits = service.get_limits(request);

    match build_involvement_reports(storage.as_ref(), internship_id, &body.student_ids, &limits)
        .await
    {
        Ok(response) if response.is_partial() => {
            let message = format!(
                "{} of {} reports failed",
                response.failed,
                response.entries.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::error(
                ErrorCode::PartialAggregationFailure,
                response,
                message,
            )))
        }
        Ok(response) => {
            info!(
                "Generated {} reports for internship {}",
                response.succeeded, internship_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Reports generated successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
