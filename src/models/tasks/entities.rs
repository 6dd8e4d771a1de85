use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 任务来源：校内教师 / 企业导师
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub enum TaskOrigin {
    Faculty,
    Industry,
}

impl TaskOrigin {
    pub const FACULTY: &'static str = "faculty";
    pub const INDUSTRY: &'static str = "industry";

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskOrigin::Faculty => Self::FACULTY,
            TaskOrigin::Industry => Self::INDUSTRY,
        }
    }
}

impl<'de> Deserialize<'de> for TaskOrigin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for TaskOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TaskOrigin::FACULTY => Ok(TaskOrigin::Faculty),
            TaskOrigin::INDUSTRY => Ok(TaskOrigin::Industry),
            _ => Err(format!(
                "Invalid task origin: '{s}'. Supported: faculty, industry"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct Task {
    pub id: i64,
    pub internship_id: i64,
    pub origin: TaskOrigin,
    // 发布者 ID，创建后不可修改
    pub issued_by: i64,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    // 满分
    pub marks: f64,
    // 权重（百分比）
    pub weightage: f64,
    // 已分配学生 ID（升序），始终是实习已分配学生的子集
    pub assigned_students: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_assigned_to(&self, student_id: i64) -> bool {
        self.assigned_students.binary_search(&student_id).is_ok()
    }
}
