pub mod actors;
pub mod common;
pub mod internships;
pub mod registry;
pub mod reports;
pub mod submissions;
pub mod system;
pub mod tasks;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::Serialize;

/// 服务启动时间
#[derive(Debug, Clone, Serialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    ValidationFailed = 1022,
    InternalServerError = 1500,

    // 实习相关
    InternshipNotFound = 2000,
    ConcurrentModification = 2001,

    // 任务与提交相关
    TaskNotFound = 3000,
    TaskOriginMismatch = 3001,
    SubmissionNotFound = 3100,

    // 报告与统计相关
    PartialAggregationFailure = 4000,

    // 基础档案
    DepartmentNotFound = 5000,
    StudentNotFound = 5001,
    FacultyNotFound = 5002,
}
