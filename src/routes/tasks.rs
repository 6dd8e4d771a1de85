use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::entities::ActorRole;
use crate::models::submissions::requests::SubmitTaskRequest;
use crate::models::tasks::requests::{CreateTaskRequest, TaskListParams};
use crate::services::{SubmissionService, TaskService};
use crate::utils::{SafeIDI64, SafeTaskOrigin};

static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn create_task(
    req: HttpRequest,
    origin: SafeTaskOrigin,
    body: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .create_task(&req, origin.0, body.into_inner())
        .await
}

pub async fn list_tasks(
    req: HttpRequest,
    origin: SafeTaskOrigin,
    query: web::Query<TaskListParams>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .list_tasks(&req, origin.0, query.into_inner())
        .await
}

pub async fn get_task(
    req: HttpRequest,
    origin: SafeTaskOrigin,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.get_task(&req, origin.0, id.0).await
}

pub async fn submit_task(
    req: HttpRequest,
    origin: SafeTaskOrigin,
    id: SafeIDI64,
    body: web::Json<SubmitTaskRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(&req, origin.0, id.0, body.into_inner())
        .await
}

pub async fn list_task_submissions(
    req: HttpRequest,
    origin: SafeTaskOrigin,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_task_submissions(&req, origin.0, id.0)
        .await
}

// 配置路由
pub fn configure_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks/{origin}")
            .wrap(middlewares::RequireActor)
            .service(
                web::resource("").route(web::get().to(list_tasks)).route(
                    web::post()
                        .to(create_task)
                        // 来源与角色的对应关系在服务层校验
                        .wrap(middlewares::RequireRole::new_any(ActorRole::supervisor_roles())),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_task)))
            .service(
                web::resource("/{id}/submissions")
                    .route(
                        web::post()
                            .to(submit_task)
                            .wrap(middlewares::RequireRole::new_any(ActorRole::student_roles())),
                    )
                    .route(
                        web::get()
                            .to(list_task_submissions)
                            .wrap(middlewares::RequireRole::new_any(ActorRole::staff_roles())),
                    ),
            ),
    );
}
