use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 调用方角色（由上游认证网关提供）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub enum ActorRole {
    Student,            // 学生
    Faculty,            // 校内指导教师
    IndustrySupervisor, // 企业指导老师
    EnterpriseCell,     // 校企合作办公室
    Admin,              // 管理员
}

impl ActorRole {
    pub const STUDENT: &'static str = "student";
    pub const FACULTY: &'static str = "faculty";
    pub const INDUSTRY_SUPERVISOR: &'static str = "industry_supervisor";
    pub const ENTERPRISE_CELL: &'static str = "enterprise_cell";
    pub const ADMIN: &'static str = "admin";

    pub fn approval_roles() -> &'static [&'static ActorRole] {
        &[&Self::EnterpriseCell, &Self::Admin]
    }
    pub fn management_roles() -> &'static [&'static ActorRole] {
        &[&Self::EnterpriseCell, &Self::Admin]
    }
    pub fn internship_creator_roles() -> &'static [&'static ActorRole] {
        &[&Self::EnterpriseCell, &Self::IndustrySupervisor, &Self::Admin]
    }
    pub fn student_assigner_roles() -> &'static [&'static ActorRole] {
        &[&Self::EnterpriseCell, &Self::Faculty, &Self::Admin]
    }
    pub fn supervisor_roles() -> &'static [&'static ActorRole] {
        &[&Self::Faculty, &Self::IndustrySupervisor, &Self::Admin]
    }
    pub fn staff_roles() -> &'static [&'static ActorRole] {
        &[
            &Self::Faculty,
            &Self::IndustrySupervisor,
            &Self::EnterpriseCell,
            &Self::Admin,
        ]
    }
    pub fn rollup_roles() -> &'static [&'static ActorRole] {
        &[&Self::EnterpriseCell, &Self::Faculty, &Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static ActorRole] {
        &[&Self::Student]
    }
}

impl<'de> Deserialize<'de> for ActorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActorRole::Student => ActorRole::STUDENT,
            ActorRole::Faculty => ActorRole::FACULTY,
            ActorRole::IndustrySupervisor => ActorRole::INDUSTRY_SUPERVISOR,
            ActorRole::EnterpriseCell => ActorRole::ENTERPRISE_CELL,
            ActorRole::Admin => ActorRole::ADMIN,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ActorRole::STUDENT => Ok(ActorRole::Student),
            ActorRole::FACULTY => Ok(ActorRole::Faculty),
            ActorRole::INDUSTRY_SUPERVISOR => Ok(ActorRole::IndustrySupervisor),
            ActorRole::ENTERPRISE_CELL => Ok(ActorRole::EnterpriseCell),
            ActorRole::ADMIN => Ok(ActorRole::Admin),
            _ => Err(format!(
                "Invalid actor role: '{s}'. Supported: student, faculty, industry_supervisor, enterprise_cell, admin"
            )),
        }
    }
}

/// 本次请求的调用方身份
///
/// 学生角色的 `id` 即学生 ID，教师角色的 `id` 即教师 ID，
/// 其余角色的 `id` 由网关分配，仅用于审计。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct Actor {
    pub id: i64,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: i64, role: ActorRole) -> Self {
        Self { id, role }
    }

    /// 学生只能访问自己的数据，其他角色不受此限制
    pub fn can_view_student(&self, student_id: i64) -> bool {
        self.role != ActorRole::Student || self.id == student_id
    }
}
