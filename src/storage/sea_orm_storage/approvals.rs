//! 实习审批存储操作
//!
//! 审批状态只有 Pending ⇄ Approved 一种切换。切换使用 version 列做乐观锁，
//! 条件更新未命中时返回 Concurrency 错误，由调用方重试。

use super::SeaOrmStorage;
use crate::entity::approval_audits::{
    ActiveModel as ApprovalAuditActiveModel, Column as ApprovalAuditColumn,
    Entity as ApprovalAudits,
};
use crate::entity::internships::{
    ActiveModel as InternshipActiveModel, Column, Entity as Internships,
    Model as InternshipModel,
};
use crate::errors::{PortalError, Result};
use crate::models::{
    actors::entities::Actor,
    internships::entities::{ApprovalAudit, Internship},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

impl SeaOrmStorage {
    /// 切换审批状态，实习不存在时返回 None
    pub async fn toggle_approval_impl(
        &self,
        internship_id: i64,
        actor: &Actor,
    ) -> Result<Option<Internship>> {
        let current = Internships::find_by_id(internship_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习失败: {e}")))?;

        match current {
            Some(observed) => self.apply_approval_toggle(observed, actor).await.map(Some),
            None => Ok(None),
        }
    }

    /// 基于已读取的 (is_approved, version) 执行条件更新并写入审计记录
    async fn apply_approval_toggle(
        &self,
        observed: InternshipModel,
        actor: &Actor,
    ) -> Result<Internship> {
        let now = chrono::Utc::now().timestamp();
        let to_approved = !observed.is_approved;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let updated = Internships::update_many()
            .set(InternshipActiveModel {
                is_approved: Set(to_approved),
                version: Set(observed.version + 1),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(observed.id))
            .filter(Column::Version.eq(observed.version))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新审批状态失败: {e}")))?;

        if updated.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| PortalError::database_operation(format!("回滚事务失败: {e}")))?;
            return Err(PortalError::concurrency(format!(
                "实习 {} 的审批状态已被其他请求修改，请重试",
                observed.id
            )));
        }

        let audit = ApprovalAuditActiveModel {
            internship_id: Set(observed.id),
            actor_id: Set(actor.id),
            actor_role: Set(actor.role.to_string()),
            from_approved: Set(observed.is_approved),
            to_approved: Set(to_approved),
            changed_at: Set(now),
            ..Default::default()
        };
        audit
            .insert(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("写入审批记录失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        info!(
            "实习 {} 审批状态 {} -> {}（操作者 {} / {}）",
            observed.id, observed.is_approved, to_approved, actor.id, actor.role
        );

        self.get_internship_by_id_impl(observed.id)
            .await?
            .ok_or_else(|| PortalError::database_operation("更新审批状态后未能读取实习"))
    }

    /// 审批历史，时间升序
    pub async fn list_approval_history_impl(
        &self,
        internship_id: i64,
    ) -> Result<Vec<ApprovalAudit>> {
        let audits = ApprovalAudits::find()
            .filter(ApprovalAuditColumn::InternshipId.eq(internship_id))
            .order_by_asc(ApprovalAuditColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询审批记录失败: {e}")))?;

        audits.into_iter().map(|m| m.into_approval_audit()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::models::actors::entities::ActorRole;
    use crate::models::internships::entities::ApprovalState;

    #[tokio::test]
    async fn test_toggle_twice_restores_value() {
        let storage = fixtures::storage().await;
        let internship = fixtures::internship(&storage).await;
        let actor = Actor::new(5, ActorRole::EnterpriseCell);

        let once = storage
            .toggle_approval_impl(internship.id, &actor)
            .await
            .unwrap()
            .unwrap();
        assert!(once.is_approved);
        assert_eq!(once.version, 1);

        let twice = storage
            .toggle_approval_impl(internship.id, &actor)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(twice.is_approved, internship.is_approved);
        assert_eq!(twice.version, 2);

        let history = storage
            .list_approval_history_impl(internship.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].from_state, ApprovalState::Pending);
        assert_eq!(history[0].to_state, ApprovalState::Approved);
        assert_eq!(history[1].to_state, ApprovalState::Pending);
        assert_eq!(history[1].actor_role, ActorRole::EnterpriseCell);
        assert_eq!(history[1].actor_id, 5);
    }

    #[tokio::test]
    async fn test_stale_version_is_rejected() {
        let storage = fixtures::storage().await;
        let internship = fixtures::internship(&storage).await;
        let actor = Actor::new(1, ActorRole::Admin);

        let stale = Internships::find_by_id(internship.id)
            .one(&storage.db)
            .await
            .unwrap()
            .unwrap();

        storage
            .toggle_approval_impl(internship.id, &actor)
            .await
            .unwrap();

        let err = storage
            .apply_approval_toggle(stale, &actor)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Concurrency(_)));

        // 失败的切换不写审计
        let history = storage
            .list_approval_history_impl(internship.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_unknown_internship() {
        let storage = fixtures::storage().await;
        let actor = Actor::new(1, ActorRole::Admin);
        assert!(
            storage
                .toggle_approval_impl(12345, &actor)
                .await
                .unwrap()
                .is_none()
        );
    }
}
