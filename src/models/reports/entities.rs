use serde::{Serialize, Serializer};
use ts_rs::TS;

use crate::models::tasks::entities::TaskOrigin;

/// 未提交（或未评分）时报告中显示的文字
pub const NOT_SUBMITTED: &str = "Not Submitted";

/// 获得分数：已评分为数值，否则为 "Not Submitted"
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObtainedMarks {
    Graded(f64),
    NotSubmitted,
}

impl ObtainedMarks {
    pub fn graded(&self) -> Option<f64> {
        match self {
            ObtainedMarks::Graded(score) => Some(*score),
            ObtainedMarks::NotSubmitted => None,
        }
    }
}

impl From<Option<f64>> for ObtainedMarks {
    fn from(grade: Option<f64>) -> Self {
        grade.map_or(ObtainedMarks::NotSubmitted, ObtainedMarks::Graded)
    }
}

impl Serialize for ObtainedMarks {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ObtainedMarks::Graded(score) => serializer.serialize_f64(*score),
            ObtainedMarks::NotSubmitted => serializer.serialize_str(NOT_SUBMITTED),
        }
    }
}

/// 报告中的一行，对应一个任务
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct InvolvementRow {
    pub task_id: i64,
    pub task_title: String,
    pub origin: TaskOrigin,
    pub total_marks: f64,
    #[ts(type = "number | \"Not Submitted\"")]
    pub obtained_marks: ObtainedMarks,
}

/// 学生在某实习中的参与度 / 成绩报告
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct InvolvementReport {
    pub internship_id: i64,
    pub student_id: i64,
    pub student_name: String,
    // 按任务创建顺序排列，两种来源交错
    pub rows: Vec<InvolvementRow>,
    pub total_marks: f64,
    // 仅统计已评分任务
    pub obtained_marks: f64,
    // Σ grade / marks × weightage，仅统计已评分任务
    pub weighted_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obtained_marks_serialization() {
        assert_eq!(
            serde_json::to_value(ObtainedMarks::Graded(40.0)).unwrap(),
            serde_json::json!(40.0)
        );
        assert_eq!(
            serde_json::to_value(ObtainedMarks::NotSubmitted).unwrap(),
            serde_json::json!("Not Submitted")
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ObtainedMarks::from(None), ObtainedMarks::NotSubmitted);
        assert_eq!(ObtainedMarks::from(Some(3.5)).graded(), Some(3.5));
    }
}
