//! 任务存储操作（校内与企业任务共用）

use std::collections::{BTreeSet, HashMap};

use super::SeaOrmStorage;
use crate::entity::internship_students::{
    Column as InternshipStudentColumn, Entity as InternshipStudents,
};
use crate::entity::internships::Entity as Internships;
use crate::entity::task_students::{
    ActiveModel as TaskStudentActiveModel, Column as TaskStudentColumn, Entity as TaskStudents,
};
use crate::entity::tasks::{ActiveModel, Column, Entity as Tasks, Model as TaskModel};
use crate::errors::{PortalError, Result};
use crate::models::tasks::{
    entities::{Task, TaskOrigin},
    requests::CreateTaskRequest,
    responses::CreateTaskResponse,
};
use crate::utils::validate::validate_task_fields;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建任务
    ///
    /// 请求中的学生先与实习已分配学生取交集，其余学生作为 `rejected_students` 返回。
    /// 任务与其学生分配在同一事务中写入。
    pub async fn create_task_impl(
        &self,
        origin: TaskOrigin,
        issued_by: i64,
        req: CreateTaskRequest,
    ) -> Result<CreateTaskResponse> {
        let fields = validate_task_fields(&req)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let internship = Internships::find_by_id(req.internship_id)
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习失败: {e}")))?;
        if internship.is_none() {
            return Err(PortalError::not_found(format!(
                "实习不存在: {}",
                req.internship_id
            )));
        }

        let internship_students: BTreeSet<i64> = InternshipStudents::find()
            .select_only()
            .column(InternshipStudentColumn::StudentId)
            .filter(InternshipStudentColumn::InternshipId.eq(req.internship_id))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习学生失败: {e}")))?
            .into_iter()
            .collect();

        // 去重并保持升序
        let requested: BTreeSet<i64> = req.assigned_students.iter().copied().collect();
        let (accepted, rejected): (Vec<i64>, Vec<i64>) = requested
            .into_iter()
            .partition(|id| internship_students.contains(id));

        let model = ActiveModel {
            internship_id: Set(req.internship_id),
            origin: Set(origin.as_str().to_string()),
            issued_by: Set(issued_by),
            title: Set(fields.title),
            description: Set(fields.description),
            deadline: Set(fields.deadline.timestamp()),
            marks: Set(req.marks),
            weightage: Set(req.weightage),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let task = model
            .insert(&txn)
            .await
            .map_err(|e| PortalError::from_db("创建任务失败", e))?;

        if !accepted.is_empty() {
            let links = accepted.iter().map(|student_id| TaskStudentActiveModel {
                task_id: Set(task.id),
                student_id: Set(*student_id),
                ..Default::default()
            });
            TaskStudents::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| PortalError::from_db("写入任务分配失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        if !rejected.is_empty() {
            debug!(
                "任务 {} 忽略了不属于实习 {} 的学生: {:?}",
                task.id, req.internship_id, rejected
            );
        }

        Ok(CreateTaskResponse {
            task: task.into_task(accepted)?,
            rejected_students: rejected,
        })
    }

    /// 通过 ID 获取任务
    pub async fn get_task_by_id_impl(&self, id: i64) -> Result<Option<Task>> {
        let result = Tasks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询任务失败: {e}")))?;

        match result {
            Some(model) => {
                let mut tasks = attach_assignments(&self.db, vec![model]).await?;
                Ok(tasks.pop())
            }
            None => Ok(None),
        }
    }

    /// 列出某实习某来源的任务，按创建顺序
    pub async fn list_tasks_impl(&self, internship_id: i64, origin: TaskOrigin) -> Result<Vec<Task>> {
        let models = Tasks::find()
            .filter(Column::InternshipId.eq(internship_id))
            .filter(Column::Origin.eq(origin.as_str()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询任务列表失败: {e}")))?;

        attach_assignments(&self.db, models).await
    }

    /// 列出某实习中分配给该学生的任务，两种来源按创建顺序交错
    pub async fn list_tasks_for_student_impl(
        &self,
        internship_id: i64,
        student_id: i64,
    ) -> Result<Vec<Task>> {
        let models = Tasks::find()
            .inner_join(TaskStudents)
            .filter(Column::InternshipId.eq(internship_id))
            .filter(TaskStudentColumn::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生任务失败: {e}")))?;

        attach_assignments(&self.db, models).await
    }
}

/// 批量查询任务的学生分配并转换为业务模型
async fn attach_assignments<C>(db: &C, models: Vec<TaskModel>) -> Result<Vec<Task>>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let task_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let links = TaskStudents::find()
        .filter(TaskStudentColumn::TaskId.is_in(task_ids))
        .order_by_asc(TaskStudentColumn::StudentId)
        .all(db)
        .await
        .map_err(|e| PortalError::database_operation(format!("查询任务分配失败: {e}")))?;

    let mut link_map: HashMap<i64, Vec<i64>> = HashMap::new();
    for link in links {
        link_map.entry(link.task_id).or_default().push(link.student_id);
    }

    models
        .into_iter()
        .map(|m| {
            let students = link_map.remove(&m.id).unwrap_or_default();
            m.into_task(students)
        })
        .collect()
}
