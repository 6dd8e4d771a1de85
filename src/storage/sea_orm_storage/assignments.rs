//! 实习分配存储操作
//!
//! 分配关系保存在带唯一索引的关联表中，重复分配由数据库忽略，
//! 并发调用同一 (实习, 学生) 只会留下一条记录。

use super::SeaOrmStorage;
use crate::entity::internship_faculty::{
    ActiveModel as InternshipFacultyActiveModel, Column as InternshipFacultyColumn,
    Entity as InternshipFaculty,
};
use crate::entity::internship_students::{
    ActiveModel as InternshipStudentActiveModel, Column as InternshipStudentColumn,
    Entity as InternshipStudents,
};
use crate::entity::task_students::{Column as TaskStudentColumn, Entity as TaskStudents};
use crate::entity::tasks::{Column as TaskColumn, Entity as Tasks};
use crate::errors::{PortalError, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 分配学生，返回是否为新建的分配
    pub async fn assign_student_impl(&self, internship_id: i64, student_id: i64) -> Result<bool> {
        let link = InternshipStudentActiveModel {
            internship_id: Set(internship_id),
            student_id: Set(student_id),
            assigned_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = InternshipStudents::insert(link)
            .on_conflict(
                OnConflict::columns([
                    InternshipStudentColumn::InternshipId,
                    InternshipStudentColumn::StudentId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| PortalError::from_db("分配学生失败", e))?;

        Ok(inserted > 0)
    }

    /// 分配教师，返回是否为新建的分配
    pub async fn assign_faculty_impl(&self, internship_id: i64, faculty_id: i64) -> Result<bool> {
        let link = InternshipFacultyActiveModel {
            internship_id: Set(internship_id),
            faculty_id: Set(faculty_id),
            assigned_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = InternshipFaculty::insert(link)
            .on_conflict(
                OnConflict::columns([
                    InternshipFacultyColumn::InternshipId,
                    InternshipFacultyColumn::FacultyId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| PortalError::from_db("分配教师失败", e))?;

        Ok(inserted > 0)
    }

    /// 取消学生分配，并在同一事务中把该学生移出此实习的全部任务
    ///
    /// 返回移除的任务分配数；学生本未分配时返回 `None`。
    pub async fn unassign_student_impl(
        &self,
        internship_id: i64,
        student_id: i64,
    ) -> Result<Option<i64>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let removed = InternshipStudents::delete_many()
            .filter(InternshipStudentColumn::InternshipId.eq(internship_id))
            .filter(InternshipStudentColumn::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("取消学生分配失败: {e}")))?;

        if removed.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| PortalError::database_operation(format!("回滚事务失败: {e}")))?;
            return Ok(None);
        }

        let task_ids: Vec<i64> = Tasks::find()
            .select_only()
            .column(TaskColumn::Id)
            .filter(TaskColumn::InternshipId.eq(internship_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习任务失败: {e}")))?;

        let removed_links = if task_ids.is_empty() {
            0
        } else {
            TaskStudents::delete_many()
                .filter(TaskStudentColumn::StudentId.eq(student_id))
                .filter(TaskStudentColumn::TaskId.is_in(task_ids))
                .exec(&txn)
                .await
                .map_err(|e| {
                    PortalError::database_operation(format!("移除任务分配失败: {e}"))
                })?
                .rows_affected
        };

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        debug!(
            "学生 {} 已移出实习 {}，级联移除 {} 个任务分配",
            student_id, internship_id, removed_links
        );

        Ok(Some(removed_links as i64))
    }

    /// 取消教师分配，返回是否存在该分配
    pub async fn unassign_faculty_impl(&self, internship_id: i64, faculty_id: i64) -> Result<bool> {
        let result = InternshipFaculty::delete_many()
            .filter(InternshipFacultyColumn::InternshipId.eq(internship_id))
            .filter(InternshipFacultyColumn::FacultyId.eq(faculty_id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("取消教师分配失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 已分配学生 ID（升序）
    pub async fn list_assigned_students_impl(&self, internship_id: i64) -> Result<Vec<i64>> {
        InternshipStudents::find()
            .select_only()
            .column(InternshipStudentColumn::StudentId)
            .filter(InternshipStudentColumn::InternshipId.eq(internship_id))
            .order_by_asc(InternshipStudentColumn::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习学生失败: {e}")))
    }

    /// 已分配教师 ID（升序）
    pub async fn list_assigned_faculty_impl(&self, internship_id: i64) -> Result<Vec<i64>> {
        InternshipFaculty::find()
            .select_only()
            .column(InternshipFacultyColumn::FacultyId)
            .filter(InternshipFacultyColumn::InternshipId.eq(internship_id))
            .order_by_asc(InternshipFacultyColumn::FacultyId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习教师失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{SeaOrmStorage, fixtures};
    use crate::models::tasks::{entities::TaskOrigin, requests::CreateTaskRequest};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_assign_student_is_idempotent() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "CS").await;
        let student = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        let internship = fixtures::internship(&storage).await;

        assert!(storage.assign_student_impl(internship.id, student.id).await.unwrap());
        assert!(!storage.assign_student_impl(internship.id, student.id).await.unwrap());

        let assigned = storage.list_assigned_students_impl(internship.id).await.unwrap();
        assert_eq!(assigned, vec![student.id]);
    }

    #[tokio::test]
    async fn test_concurrent_assignments_leave_single_link() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "CS").await;
        let student = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        let internship = fixtures::internship(&storage).await;

        let (a, b) = tokio::join!(
            storage.assign_student_impl(internship.id, student.id),
            storage.assign_student_impl(internship.id, student.id)
        );
        // 恰好一次新建
        assert!(a.unwrap() ^ b.unwrap());

        let assigned = storage.list_assigned_students_impl(internship.id).await.unwrap();
        assert_eq!(assigned, vec![student.id]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_spawned_assignments_on_wal_pool_leave_single_link() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SeaOrmStorage::connect_file(&dir.path().join("portal.db"), 8)
            .await
            .unwrap();
        let dept = fixtures::department(&storage, "CS").await;
        let student = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        let internship = fixtures::internship(&storage).await;

        let storage = std::sync::Arc::new(storage);
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let storage = storage.clone();
                let (internship_id, student_id) = (internship.id, student.id);
                tokio::spawn(async move {
                    storage.assign_student_impl(internship_id, student_id).await
                })
            })
            .collect();

        let mut created = 0;
        let mut failed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(true) => created += 1,
                Ok(false) => {}
                Err(_) => failed += 1,
            }
        }
        assert_eq!(failed, 0);
        assert_eq!(created, 1);

        let assigned = storage.list_assigned_students_impl(internship.id).await.unwrap();
        assert_eq!(assigned, vec![student.id]);
    }

    #[tokio::test]
    async fn test_assign_faculty_and_unassign() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "CS").await;
        let faculty = fixtures::faculty(&storage, dept.id, "f@uni.edu").await;
        let internship = fixtures::internship(&storage).await;

        assert!(storage.assign_faculty_impl(internship.id, faculty.id).await.unwrap());
        assert!(!storage.assign_faculty_impl(internship.id, faculty.id).await.unwrap());
        assert_eq!(
            storage.list_assigned_faculty_impl(internship.id).await.unwrap(),
            vec![faculty.id]
        );

        assert!(storage.unassign_faculty_impl(internship.id, faculty.id).await.unwrap());
        assert!(!storage.unassign_faculty_impl(internship.id, faculty.id).await.unwrap());
        assert!(
            storage
                .list_assigned_faculty_impl(internship.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_assign_unknown_student_fails() {
        let storage = fixtures::storage().await;
        let internship = fixtures::internship(&storage).await;

        let err = storage.assign_student_impl(internship.id, 4242).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_unassign_student_cascades_out_of_tasks() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "CS").await;
        let s1 = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        let s2 = fixtures::student(&storage, dept.id, "R2", "2022", "A").await;
        let internship = fixtures::internship(&storage).await;
        storage.assign_student_impl(internship.id, s1.id).await.unwrap();
        storage.assign_student_impl(internship.id, s2.id).await.unwrap();

        let mut task_ids = Vec::new();
        for origin in [TaskOrigin::Faculty, TaskOrigin::Industry] {
            let created = storage
                .create_task_impl(
                    origin,
                    7,
                    CreateTaskRequest {
                        internship_id: internship.id,
                        title: Some(format!("{origin} report")),
                        description: Some("weekly report".to_string()),
                        deadline: Some(Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()),
                        marks: 10.0,
                        weightage: 50.0,
                        assigned_students: vec![s1.id, s2.id],
                    },
                )
                .await
                .unwrap();
            task_ids.push(created.task.id);
        }

        let removed = storage
            .unassign_student_impl(internship.id, s1.id)
            .await
            .unwrap();
        assert_eq!(removed, Some(2));

        for task_id in task_ids {
            let task = storage.get_task_by_id_impl(task_id).await.unwrap().unwrap();
            assert_eq!(task.assigned_students, vec![s2.id]);
        }
        assert_eq!(
            storage.list_assigned_students_impl(internship.id).await.unwrap(),
            vec![s2.id]
        );

        // 再次取消视为不存在
        assert_eq!(
            storage
                .unassign_student_impl(internship.id, s1.id)
                .await
                .unwrap(),
            None
        );
    }
}
