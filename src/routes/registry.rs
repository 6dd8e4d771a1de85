use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::entities::ActorRole;
use crate::models::registry::requests::UpdateCompletionRequest;
use crate::services::RegistryService;
use crate::utils::SafeIDI64;

static REGISTRY_SERVICE: Lazy<RegistryService> = Lazy::new(RegistryService::new_lazy);

pub async fn get_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    REGISTRY_SERVICE.get_department(&req, id.0).await
}

pub async fn summarize_batches(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    REGISTRY_SERVICE.summarize_batches(&req, id.0).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    REGISTRY_SERVICE.get_student(&req, id.0).await
}

pub async fn set_internship_completion(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCompletionRequest>,
) -> ActixResult<HttpResponse> {
    REGISTRY_SERVICE
        .set_internship_completion(&req, id.0, body.into_inner())
        .await
}

pub async fn get_faculty(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    REGISTRY_SERVICE.get_faculty(&req, id.0).await
}

// 配置路由
pub fn configure_registry_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .wrap(middlewares::RequireActor)
            .service(web::resource("/{id}").route(web::get().to(get_department)))
            .service(
                web::resource("/{id}/batches").route(
                    web::get()
                        .to(summarize_batches)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::rollup_roles())),
                ),
            ),
    )
    .service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireActor)
            .service(web::resource("/{id}").route(web::get().to(get_student)))
            .service(
                web::resource("/{id}/completion").route(
                    web::put()
                        .to(set_internship_completion)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::management_roles())),
                ),
            ),
    )
    .service(
        web::scope("/api/v1/faculty")
            .wrap(middlewares::RequireActor)
            .service(web::resource("/{id}").route(web::get().to(get_faculty))),
    );
}
