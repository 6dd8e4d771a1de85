pub mod approval;
pub mod assign;
pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::internships::requests::{
    AssignFacultyRequest, AssignStudentRequest, CreateInternshipRequest, InternshipListParams,
};
use crate::storage::Storage;

pub struct InternshipService {
    storage: Option<Arc<dyn Storage>>,
}

impl InternshipService {
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

    pub async fn create_internship(
        &self,
        request: &HttpRequest,
        body: CreateInternshipRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_internship(self, request, body).await
    }

    // 获取实习列表
    pub async fn list_internships(
        &self,
        request: &HttpRequest,
        query: InternshipListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_internships(self, request, query).await
    }

    pub async fn get_internship(
        &self,
        request: &HttpRequest,
        internship_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_internship(self, request, internship_id).await
    }

    // 分配学生（幂等）
    pub async fn assign_student(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        body: AssignStudentRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_student(self, request, internship_id, body).await
    }

    // 取消学生分配，同时移出该实习的所有任务
    pub async fn unassign_student(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        assign::unassign_student(self, request, internship_id, student_id).await
    }

    pub async fn assign_faculty(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        body: AssignFacultyRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_faculty(self, request, internship_id, body).await
    }

    pub async fn unassign_faculty(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        faculty_id: i64,
    ) -> ActixResult<HttpResponse> {
        assign::unassign_faculty(self, request, internship_id, faculty_id).await
    }

    // 切换审批状态
    pub async fn toggle_approval(
        &self,
        request: &HttpRequest,
        internship_id: i64,
    ) -> ActixResult<HttpResponse> {
        approval::toggle_approval(self, request, internship_id).await
    }

    pub async fn approval_history(
        &self,
        request: &HttpRequest,
        internship_id: i64,
    ) -> ActixResult<HttpResponse> {
        approval::approval_history(self, request, internship_id).await
    }
}
