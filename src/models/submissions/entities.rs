use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    // 提交时的学生姓名快照
    pub student_name: String,
    // 文件引用（文件本身由外部存储保管）
    pub file_ref: String,
    // 未评分时为 null
    pub grade: Option<f64>,
    pub graded_by: Option<i64>,
    pub submitted_at: DateTime<Utc>,
    pub graded_at: Option<DateTime<Utc>>,
}
