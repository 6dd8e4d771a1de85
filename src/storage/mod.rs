use std::sync::Arc;

use crate::models::{
    actors::entities::Actor,
    internships::{
        entities::{ApprovalAudit, Internship},
        requests::{CreateInternshipRequest, InternshipListQuery},
        responses::InternshipListResponse,
    },
    registry::{
        entities::{Department, Faculty, Student},
        requests::{CreateDepartmentRequest, CreateFacultyRequest, CreateStudentRequest},
    },
    submissions::entities::Submission,
    tasks::{
        entities::{Task, TaskOrigin},
        requests::CreateTaskRequest,
        responses::CreateTaskResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 基础档案方法
    // 创建院系
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    // 通过ID获取院系
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    // 创建学生
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 列出院系下的全部学生
    async fn list_students_by_department(&self, department_id: i64) -> Result<Vec<Student>>;
    // 设置学生实习完成标记
    async fn set_student_internship_completion(
        &self,
        id: i64,
        did_internship: bool,
    ) -> Result<Option<Student>>;
    // 创建教师
    async fn create_faculty(&self, req: CreateFacultyRequest) -> Result<Faculty>;
    // 通过ID获取教师
    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>>;

    /// 实习管理方法
    // 创建实习
    async fn create_internship(
        &self,
        created_by: i64,
        req: CreateInternshipRequest,
    ) -> Result<Internship>;
    // 通过ID获取实习（含分配列表）
    async fn get_internship_by_id(&self, id: i64) -> Result<Option<Internship>>;
    // 分页列出实习
    async fn list_internships_with_pagination(
        &self,
        query: InternshipListQuery,
    ) -> Result<InternshipListResponse>;

    /// 分配管理方法
    // 分配学生，返回是否为新分配
    async fn assign_student(&self, internship_id: i64, student_id: i64) -> Result<bool>;
    // 分配教师，返回是否为新分配
    async fn assign_faculty(&self, internship_id: i64, faculty_id: i64) -> Result<bool>;
    // 取消学生分配并级联移出该实习的任务，返回移除的任务分配数；未分配时返回 None
    async fn unassign_student(&self, internship_id: i64, student_id: i64) -> Result<Option<i64>>;
    // 取消教师分配
    async fn unassign_faculty(&self, internship_id: i64, faculty_id: i64) -> Result<bool>;
    // 已分配学生 ID（升序）
    async fn list_assigned_students(&self, internship_id: i64) -> Result<Vec<i64>>;
    // 已分配教师 ID（升序）
    async fn list_assigned_faculty(&self, internship_id: i64) -> Result<Vec<i64>>;

    /// 审批方法
    // 切换审批状态（乐观锁），实习不存在时返回 None
    async fn toggle_approval(&self, internship_id: i64, actor: &Actor)
    -> Result<Option<Internship>>;
    // 审批历史（时间升序）
    async fn list_approval_history(&self, internship_id: i64) -> Result<Vec<ApprovalAudit>>;

    /// 任务管理方法
    // 创建任务
    async fn create_task(
        &self,
        origin: TaskOrigin,
        issued_by: i64,
        req: CreateTaskRequest,
    ) -> Result<CreateTaskResponse>;
    // 通过ID获取任务
    async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>>;
    // 列出某实习某来源的任务
    async fn list_tasks(&self, internship_id: i64, origin: TaskOrigin) -> Result<Vec<Task>>;
    // 列出某实习中分配给该学生的任务（两种来源）
    async fn list_tasks_for_student(&self, internship_id: i64, student_id: i64)
    -> Result<Vec<Task>>;

    /// 提交管理方法
    // 提交（按任务+学生覆盖）
    async fn upsert_submission(
        &self,
        task_id: i64,
        student_id: i64,
        student_name: &str,
        file_ref: &str,
    ) -> Result<Submission>;
    // 评分
    async fn grade_submission(
        &self,
        id: i64,
        grade: f64,
        graded_by: i64,
    ) -> Result<Option<Submission>>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 列出任务的提交
    async fn list_task_submissions(&self, task_id: i64) -> Result<Vec<Submission>>;
    // 一次查询某学生在一组任务上的全部提交
    async fn list_student_submissions(
        &self,
        student_id: i64,
        task_ids: &[i64],
    ) -> Result<Vec<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
