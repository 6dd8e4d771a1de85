//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub department_id: i64,
    pub name: String,
    pub batch: String,
    pub section: String,
    #[sea_orm(unique)]
    pub registration_number: String,
    pub did_internship: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::internship_students::Entity")]
    InternshipStudents,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::internship_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InternshipStudents.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student(self) -> crate::models::registry::entities::Student {
        use crate::models::registry::entities::Student;
        use chrono::{DateTime, Utc};

        Student {
            id: self.id,
            department_id: self.department_id,
            name: self.name,
            batch: self.batch,
            section: self.section,
            registration_number: self.registration_number,
            did_internship: self.did_internship,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
