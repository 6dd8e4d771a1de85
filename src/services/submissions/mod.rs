pub mod get;
pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::submissions::requests::{GradeSubmissionRequest, SubmitTaskRequest};
use crate::models::tasks::entities::TaskOrigin;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    // 学生提交（重复提交覆盖之前的记录）
    pub async fn submit(
        &self,
        request: &HttpRequest,
        origin: TaskOrigin,
        task_id: i64,
        body: SubmitTaskRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, request, origin, task_id, body).await
    }

    pub async fn list_task_submissions(
        &self,
        request: &HttpRequest,
        origin: TaskOrigin,
        task_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_task_submissions(self, request, origin, task_id).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_submission(self, request, submission_id).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        body: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, body).await
    }
}
