//! 审批切换审计实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "approval_audits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub internship_id: i64,
    pub actor_id: i64,
    pub actor_role: String,
    pub from_approved: bool,
    pub to_approved: bool,
    pub changed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::internships::Entity",
        from = "Column::InternshipId",
        to = "super::internships::Column::Id"
    )]
    Internship,
}

impl Related<super::internships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Internship.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_approval_audit(
        self,
    ) -> crate::errors::Result<crate::models::internships::entities::ApprovalAudit> {
        use crate::errors::PortalError;
        use crate::models::actors::entities::ActorRole;
        use crate::models::internships::entities::{ApprovalAudit, ApprovalState};
        use chrono::{DateTime, Utc};

        let actor_role = self
            .actor_role
            .parse::<ActorRole>()
            .map_err(PortalError::database_operation)?;

        Ok(ApprovalAudit {
            id: self.id,
            internship_id: self.internship_id,
            actor_id: self.actor_id,
            actor_role,
            from_state: ApprovalState::from_flag(self.from_approved),
            to_state: ApprovalState::from_flag(self.to_approved),
            changed_at: DateTime::<Utc>::from_timestamp(self.changed_at, 0).unwrap_or_default(),
        })
    }
}
