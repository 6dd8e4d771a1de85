//! 提交存储操作
//!
//! 每个 (任务, 学生) 只保留一条提交，重新提交会覆盖文件引用并清空评分。

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::submissions::entities::Submission;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 提交或重新提交
    pub async fn upsert_submission_impl(
        &self,
        task_id: i64,
        student_id: i64,
        student_name: &str,
        file_ref: &str,
    ) -> Result<Submission> {
        let model = ActiveModel {
            task_id: Set(task_id),
            student_id: Set(student_id),
            student_name: Set(student_name.to_string()),
            file_ref: Set(file_ref.to_string()),
            grade: Set(None),
            graded_by: Set(None),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            graded_at: Set(None),
            ..Default::default()
        };

        Submissions::insert(model)
            .on_conflict(
                OnConflict::columns([Column::TaskId, Column::StudentId])
                    .update_columns([
                        Column::StudentName,
                        Column::FileRef,
                        Column::Grade,
                        Column::GradedBy,
                        Column::SubmittedAt,
                        Column::GradedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| PortalError::from_db("保存提交失败", e))?;

        let saved = Submissions::find()
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| PortalError::database_operation("保存提交后未能读取记录"))?;

        Ok(saved.into_submission())
    }

    /// 评分，提交不存在时返回 None
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grade: f64,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.grade = Set(Some(grade));
        model.graded_by = Set(Some(graded_by));
        model.graded_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("评分失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出任务的全部提交，按学生 ID 排序
    pub async fn list_task_submissions_impl(&self, task_id: i64) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::TaskId.eq(task_id))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 一次查询学生在一组任务上的提交
    pub async fn list_student_submissions_impl(
        &self,
        student_id: i64,
        task_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let submissions = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::TaskId.is_in(task_ids.to_vec()))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生提交失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::models::tasks::{entities::TaskOrigin, requests::CreateTaskRequest};
    use chrono::{TimeZone, Utc};

    async fn task_with_student(storage: &SeaOrmStorage) -> (i64, i64) {
        let dept = fixtures::department(storage, "CS").await;
        let student = fixtures::student(storage, dept.id, "R1", "2022", "A").await;
        let internship = fixtures::internship(storage).await;
        storage
            .assign_student_impl(internship.id, student.id)
            .await
            .unwrap();
        let task = storage
            .create_task_impl(
                TaskOrigin::Industry,
                3,
                CreateTaskRequest {
                    internship_id: internship.id,
                    title: Some("Prototype".to_string()),
                    description: Some("Build the prototype".to_string()),
                    deadline: Some(Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()),
                    marks: 20.0,
                    weightage: 40.0,
                    assigned_students: vec![student.id],
                },
            )
            .await
            .unwrap()
            .task;
        (task.id, student.id)
    }

    #[tokio::test]
    async fn test_resubmission_replaces_file_and_resets_grade() {
        let storage = fixtures::storage().await;
        let (task_id, student_id) = task_with_student(&storage).await;

        let first = storage
            .upsert_submission_impl(task_id, student_id, "Student R1", "files/v1.pdf")
            .await
            .unwrap();
        let graded = storage
            .grade_submission_impl(first.id, 18.0, 3)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graded.grade, Some(18.0));
        assert_eq!(graded.graded_by, Some(3));
        assert!(graded.graded_at.is_some());

        let second = storage
            .upsert_submission_impl(task_id, student_id, "Student R1", "files/v2.pdf")
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.file_ref, "files/v2.pdf");
        assert_eq!(second.grade, None);
        assert_eq!(second.graded_by, None);
        assert_eq!(second.graded_at, None);

        let all = storage.list_task_submissions_impl(task_id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_grade_missing_submission() {
        let storage = fixtures::storage().await;
        assert!(storage.grade_submission_impl(1, 1.0, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_student_submissions_scoped_to_tasks() {
        let storage = fixtures::storage().await;
        let (task_id, student_id) = task_with_student(&storage).await;
        storage
            .upsert_submission_impl(task_id, student_id, "Student R1", "files/a.pdf")
            .await
            .unwrap();

        let found = storage
            .list_student_submissions_impl(student_id, &[task_id])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let none = storage
            .list_student_submissions_impl(student_id, &[])
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
