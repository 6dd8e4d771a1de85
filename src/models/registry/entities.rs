use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct Student {
    pub id: i64,
    pub department_id: i64,
    pub name: String,
    // 入学批次，例如 "2022"
    pub batch: String,
    pub section: String,
    pub registration_number: String,
    // 是否已完成实习
    pub did_internship: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct Faculty {
    pub id: i64,
    pub department_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
