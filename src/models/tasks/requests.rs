use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建任务请求，来源由路由路径决定
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct CreateTaskRequest {
    pub internship_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub marks: f64,
    #[serde(default)]
    pub weightage: f64,
    #[serde(default)]
    pub assigned_students: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct TaskListParams {
    pub internship_id: i64,
}
