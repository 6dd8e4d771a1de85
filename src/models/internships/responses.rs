use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::internships::entities::{ApprovalAudit, Internship};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct InternshipListResponse {
    pub items: Vec<Internship>,
    pub pagination: PaginationInfo,
}

/// 分配结果，`newly_assigned = false` 表示此前已分配
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct AssignmentResponse {
    pub internship: Internship,
    pub newly_assigned: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct UnassignStudentResponse {
    pub internship: Internship,
    // 级联移除的任务分配数
    pub removed_task_links: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct ApprovalHistoryResponse {
    pub internship_id: i64,
    pub items: Vec<ApprovalAudit>,
}
