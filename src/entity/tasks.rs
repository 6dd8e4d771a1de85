//! 任务实体（校内与企业任务共用一张表，通过 origin 区分）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub internship_id: i64,
    pub origin: String,
    pub issued_by: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub deadline: i64,
    pub marks: f64,
    pub weightage: f64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::internships::Entity",
        from = "Column::InternshipId",
        to = "super::internships::Column::Id"
    )]
    Internship,
    #[sea_orm(has_many = "super::task_students::Entity")]
    TaskStudents,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::internships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Internship.def()
    }
}

impl Related<super::task_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskStudents.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_task(
        self,
        assigned_students: Vec<i64>,
    ) -> crate::errors::Result<crate::models::tasks::entities::Task> {
        use crate::errors::PortalError;
        use crate::models::tasks::entities::{Task, TaskOrigin};
        use chrono::{DateTime, Utc};

        let origin = self
            .origin
            .parse::<TaskOrigin>()
            .map_err(PortalError::database_operation)?;

        Ok(Task {
            id: self.id,
            internship_id: self.internship_id,
            origin,
            issued_by: self.issued_by,
            title: self.title,
            description: self.description,
            deadline: DateTime::<Utc>::from_timestamp(self.deadline, 0).unwrap_or_default(),
            marks: self.marks,
            weightage: self.weightage,
            assigned_students,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        })
    }
}
