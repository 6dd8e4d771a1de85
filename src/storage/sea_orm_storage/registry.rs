//! 院系 / 学生 / 教师档案存储操作

use super::SeaOrmStorage;
use crate::entity::departments::{ActiveModel as DepartmentActiveModel, Entity as Departments};
use crate::entity::faculty::{ActiveModel as FacultyActiveModel, Entity as FacultyEntity};
use crate::entity::students::{
    ActiveModel as StudentActiveModel, Column as StudentColumn, Entity as Students,
};
use crate::errors::{PortalError, Result};
use crate::models::registry::{
    entities::{Department, Faculty, Student},
    requests::{CreateDepartmentRequest, CreateFacultyRequest, CreateStudentRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let model = DepartmentActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::from_db("创建院系失败", e))?;

        Ok(result.into_department())
    }

    /// 通过 ID 获取院系
    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = StudentActiveModel {
            department_id: Set(req.department_id),
            name: Set(req.name),
            batch: Set(req.batch),
            section: Set(req.section),
            registration_number: Set(req.registration_number),
            did_internship: Set(req.did_internship),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::from_db("创建学生失败", e))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出院系下的全部学生，按批次、学号排序
    pub async fn list_students_by_department_impl(
        &self,
        department_id: i64,
    ) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(StudentColumn::DepartmentId.eq(department_id))
            .order_by_asc(StudentColumn::Batch)
            .order_by_asc(StudentColumn::RegistrationNumber)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询院系学生失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 设置学生实习完成标记
    pub async fn set_student_internship_completion_impl(
        &self,
        id: i64,
        did_internship: bool,
    ) -> Result<Option<Student>> {
        let existing = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: StudentActiveModel = existing.into();
        model.did_internship = Set(did_internship);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 创建教师
    pub async fn create_faculty_impl(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        let model = FacultyActiveModel {
            department_id: Set(req.department_id),
            name: Set(req.name),
            email: Set(req.email),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::from_db("创建教师失败", e))?;

        Ok(result.into_faculty())
    }

    /// 通过 ID 获取教师
    pub async fn get_faculty_by_id_impl(&self, id: i64) -> Result<Option<Faculty>> {
        let result = FacultyEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_faculty()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[tokio::test]
    async fn test_duplicate_registration_number_is_conflict() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "CS").await;
        fixtures::student(&storage, dept.id, "REG-1", "2022", "A").await;

        let err = storage
            .create_student_impl(CreateStudentRequest {
                department_id: dept.id,
                name: "Other".to_string(),
                batch: "2022".to_string(),
                section: "B".to_string(),
                registration_number: "REG-1".to_string(),
                did_internship: false,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_completion_flag_update() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "EE").await;
        let student = fixtures::student(&storage, dept.id, "REG-2", "2023", "A").await;
        assert!(!student.did_internship);

        let updated = storage
            .set_student_internship_completion_impl(student.id, true)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.did_internship);

        let missing = storage
            .set_student_internship_completion_impl(9999, true)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_students_scoped_to_department() {
        let storage = fixtures::storage().await;
        let cs = fixtures::department(&storage, "CS").await;
        let me = fixtures::department(&storage, "ME").await;
        fixtures::student(&storage, cs.id, "CS-2", "2023", "A").await;
        fixtures::student(&storage, cs.id, "CS-1", "2022", "A").await;
        fixtures::student(&storage, me.id, "ME-1", "2022", "A").await;

        let students = storage.list_students_by_department_impl(cs.id).await.unwrap();
        let regs: Vec<&str> = students
            .iter()
            .map(|s| s.registration_number.as_str())
            .collect();
        assert_eq!(regs, vec!["CS-1", "CS-2"]);
    }
}
