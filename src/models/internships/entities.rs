use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::actors::entities::ActorRole;

// 审批状态：Pending ⇄ Approved，没有终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub enum ApprovalState {
    Pending,
    Approved,
}

impl ApprovalState {
    pub fn from_flag(is_approved: bool) -> Self {
        if is_approved {
            ApprovalState::Approved
        } else {
            ApprovalState::Pending
        }
    }

    pub fn is_approved(self) -> bool {
        self == ApprovalState::Approved
    }

    /// 唯一的状态转换
    pub fn toggled(self) -> Self {
        match self {
            ApprovalState::Pending => ApprovalState::Approved,
            ApprovalState::Approved => ApprovalState::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct Internship {
    pub id: i64,
    // 接收单位
    pub host_institution: String,
    pub category: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: i64,
    // 已分配学生 ID（升序）
    pub assigned_students: Vec<i64>,
    // 已分配教师 ID（升序）
    pub assigned_faculty: Vec<i64>,
    pub is_approved: bool,
    pub approval_state: ApprovalState,
    // 乐观锁版本号，每次审批切换 +1
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 审批切换记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct ApprovalAudit {
    pub id: i64,
    pub internship_id: i64,
    pub actor_id: i64,
    pub actor_role: ActorRole,
    pub from_state: ApprovalState,
    pub to_state: ApprovalState,
    pub changed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_is_identity() {
        for state in [ApprovalState::Pending, ApprovalState::Approved] {
            assert_eq!(state.toggled().toggled(), state);
            assert_ne!(state.toggled(), state);
        }
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(ApprovalState::from_flag(false), ApprovalState::Pending);
        assert!(ApprovalState::from_flag(true).is_approved());
    }
}
