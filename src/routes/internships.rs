use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::entities::ActorRole;
use crate::models::internships::requests::{
    AssignFacultyRequest, AssignStudentRequest, CreateInternshipRequest, InternshipListParams,
};
use crate::models::reports::requests::BatchReportRequest;
use crate::services::{InternshipService, ReportService, TaskService};
use crate::utils::{SafeFacultyIdI64, SafeIDI64, SafeStudentIdI64};

// 懒加载的全局服务实例
static INTERNSHIP_SERVICE: Lazy<InternshipService> = Lazy::new(InternshipService::new_lazy);
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);
static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

// HTTP处理程序
pub async fn list_internships(
    req: HttpRequest,
    query: web::Query<InternshipListParams>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .list_internships(&req, query.into_inner())
        .await
}

pub async fn create_internship(
    req: HttpRequest,
    body: web::Json<CreateInternshipRequest>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .create_internship(&req, body.into_inner())
        .await
}

pub async fn get_internship(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.get_internship(&req, id.0).await
}

pub async fn assign_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AssignStudentRequest>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .assign_student(&req, id.0, body.into_inner())
        .await
}

pub async fn unassign_student(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .unassign_student(&req, id.0, student_id.0)
        .await
}

pub async fn assign_faculty(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AssignFacultyRequest>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .assign_faculty(&req, id.0, body.into_inner())
        .await
}

pub async fn unassign_faculty(
    req: HttpRequest,
    id: SafeIDI64,
    faculty_id: SafeFacultyIdI64,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .unassign_faculty(&req, id.0, faculty_id.0)
        .await
}

pub async fn toggle_approval(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.toggle_approval(&req, id.0).await
}

pub async fn approval_history(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.approval_history(&req, id.0).await
}

pub async fn list_student_tasks(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .list_student_tasks(&req, id.0, student_id.0)
        .await
}

pub async fn get_report(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.get_report(&req, id.0, student_id.0).await
}

pub async fn batch_reports(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<BatchReportRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .batch_reports(&req, id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_internship_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/internships")
            .wrap(middlewares::RequireActor)
            .service(
                web::resource("").route(web::get().to(list_internships)).route(
                    web::post().to(create_internship).wrap(middlewares::RequireRole::new_any(
                        ActorRole::internship_creator_roles(),
                    )),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_internship)))
            .service(
                web::resource("/{id}/students").route(
                    web::put()
                        .to(assign_student)
                        .wrap(middlewares::RequireRole::new_any(
                            ActorRole::student_assigner_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{id}/students/{student_id}").route(
                    web::delete()
                        .to(unassign_student)
                        // 级联移出任务，仅校企合作办公室与管理员
                        .wrap(middlewares::RequireRole::new_any(ActorRole::management_roles())),
                ),
            )
            .service(
                web::resource("/{id}/students/{student_id}/tasks")
                    .route(web::get().to(list_student_tasks)),
            )
            .service(
                web::resource("/{id}/faculty").route(
                    web::put()
                        .to(assign_faculty)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::management_roles())),
                ),
            )
            .service(
                web::resource("/{id}/faculty/{faculty_id}").route(
                    web::delete()
                        .to(unassign_faculty)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::management_roles())),
                ),
            )
            .service(
                web::resource("/{id}/approval").route(
                    web::put()
                        .to(toggle_approval)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::approval_roles())),
                ),
            )
            .service(
                web::resource("/{id}/approval/history").route(
                    web::get()
                        .to(approval_history)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::approval_roles())),
                ),
            )
            .service(
                web::resource("/{id}/reports").route(
                    web::post()
                        .to(batch_reports)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::staff_roles())),
                ),
            )
            // 学生只能查看自己的报告，在服务层校验
            .service(
                web::resource("/{id}/reports/{student_id}").route(web::get().to(get_report)),
            ),
    );
}
