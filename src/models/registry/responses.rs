use serde::Serialize;
use ts_rs::TS;

/// 单个批次的实习完成统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct BatchSummary {
    pub batch: String,
    pub total: i64,
    pub did_internship: i64,
    pub missing_internship: i64,
    pub total_sections: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct DepartmentBatchesResponse {
    pub department_id: i64,
    pub batches: Vec<BatchSummary>,
}
