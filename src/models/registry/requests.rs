use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct CreateStudentRequest {
    pub department_id: i64,
    pub name: String,
    pub batch: String,
    pub section: String,
    pub registration_number: String,
    #[serde(default)]
    pub did_internship: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct CreateFacultyRequest {
    pub department_id: i64,
    pub name: String,
    pub email: String,
}

/// 设置学生实习完成标记
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registry.ts")]
pub struct UpdateCompletionRequest {
    pub did_internship: bool,
}
