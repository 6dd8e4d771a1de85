use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::entities::ActorRole;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn get_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, id.0).await
}

pub async fn grade_submission(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireActor)
            .service(web::resource("/{id}").route(web::get().to(get_submission)))
            .service(
                web::resource("/{id}/grade").route(
                    web::put()
                        .to(grade_submission)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::supervisor_roles())),
                ),
            ),
    );
}
