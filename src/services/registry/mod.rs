pub mod completion;
pub mod lookup;
pub mod rollup;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::registry::requests::UpdateCompletionRequest;
use crate::storage::Storage;

pub struct RegistryService {
    storage: Option<Arc<dyn Storage>>,
}

impl RegistryService {
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

    pub async fn get_department(
        &self,
        request: &HttpRequest,
        department_id: i64,
    ) -> ActixResult<HttpResponse> {
        lookup::get_department(self, request, department_id).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        lookup::get_student(self, request, student_id).await
    }

    pub async fn get_faculty(
        &self,
        request: &HttpRequest,
        faculty_id: i64,
    ) -> ActixResult<HttpResponse> {
        lookup::get_faculty(self, request, faculty_id).await
    }

    // 按批次统计院系学生的实习完成情况
    pub async fn summarize_batches(
        &self,
        request: &HttpRequest,
        department_id: i64,
    ) -> ActixResult<HttpResponse> {
        rollup::summarize_batches(self, request, department_id).await
    }

    // 外部系统回写实习完成标记
    pub async fn set_internship_completion(
        &self,
        request: &HttpRequest,
        student_id: i64,
        body: UpdateCompletionRequest,
    ) -> ActixResult<HttpResponse> {
        completion::set_internship_completion(self, request, student_id, body).await
    }
}
