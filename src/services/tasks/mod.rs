pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::actors::entities::{Actor, ActorRole};
use crate::models::tasks::entities::TaskOrigin;
use crate::models::tasks::requests::{CreateTaskRequest, TaskListParams};
use crate::storage::Storage;

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 发布任务，来源由路径决定
    pub async fn create_task(
        &self,
        request: &HttpRequest,
        origin: TaskOrigin,
        body: CreateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, request, origin, body).await
    }

    pub async fn list_tasks(
        &self,
        request: &HttpRequest,
        origin: TaskOrigin,
        params: TaskListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_tasks(self, request, origin, params).await
    }

    pub async fn get_task(
        &self,
        request: &HttpRequest,
        origin: TaskOrigin,
        task_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_task(self, request, origin, task_id).await
    }

    // 某学生在实习中的全部任务（两种来源）
    pub async fn list_student_tasks(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_student_tasks(self, request, internship_id, student_id).await
    }
}

/// 调用方能否以该来源发布或批改任务
///
/// 校内教师对应 faculty 来源，企业导师对应 industry 来源，管理员不受限制。
pub(crate) fn can_act_for_origin(actor: &Actor, origin: TaskOrigin) -> bool {
    match actor.role {
        ActorRole::Admin => true,
        ActorRole::Faculty => origin == TaskOrigin::Faculty,
        ActorRole::IndustrySupervisor => origin == TaskOrigin::Industry,
        _ => false,
    }
}
