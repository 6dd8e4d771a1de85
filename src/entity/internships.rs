//! 实习实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "internships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub host_institution: String,
    pub category: String,
    // ISO 8601 日期字符串
    pub start_date: String,
    pub end_date: String,
    pub created_by: i64,
    pub is_approved: bool,
    pub version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::internship_students::Entity")]
    InternshipStudents,
    #[sea_orm(has_many = "super::internship_faculty::Entity")]
    InternshipFaculty,
    #[sea_orm(has_many = "super::tasks::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::approval_audits::Entity")]
    ApprovalAudits,
}

impl Related<super::internship_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InternshipStudents.def()
    }
}

impl Related<super::internship_faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InternshipFaculty.def()
    }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::approval_audits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovalAudits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，分配列表由调用方从关联表查询后传入
impl Model {
    pub fn into_internship(
        self,
        assigned_students: Vec<i64>,
        assigned_faculty: Vec<i64>,
    ) -> crate::models::internships::entities::Internship {
        use crate::models::internships::entities::{ApprovalState, Internship};
        use chrono::{DateTime, NaiveDate, Utc};

        Internship {
            id: self.id,
            host_institution: self.host_institution,
            category: self.category,
            start_date: NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")
                .unwrap_or_default(),
            end_date: NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d").unwrap_or_default(),
            created_by: self.created_by,
            assigned_students,
            assigned_faculty,
            is_approved: self.is_approved,
            approval_state: ApprovalState::from_flag(self.is_approved),
            version: self.version,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
