use serde::Serialize;
use ts_rs::TS;

use crate::models::reports::entities::InvolvementReport;

/// 批量报告中单个学生的结果
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub enum BatchReportEntry {
    Ok {
        student_id: i64,
        report: InvolvementReport,
    },
    Failed {
        student_id: i64,
        error_code: String,
        reason: String,
    },
}

impl BatchReportEntry {
    pub fn student_id(&self) -> i64 {
        match self {
            BatchReportEntry::Ok { student_id, .. } | BatchReportEntry::Failed { student_id, .. } => {
                *student_id
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BatchReportEntry::Failed { .. })
    }
}

/// 批量报告，顺序与请求中的学生顺序一致
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct BatchInvolvementResponse {
    pub internship_id: i64,
    pub succeeded: i64,
    pub failed: i64,
    pub entries: Vec<BatchReportEntry>,
}

impl BatchInvolvementResponse {
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}
