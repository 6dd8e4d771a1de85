use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{PortalError, Result};
use crate::models::internships::requests::CreateInternshipRequest;
use crate::models::tasks::requests::CreateTaskRequest;

// 文件引用只允许 URL 安全字符，不能含空白
static FILE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._~:/?#\[\]@!$&'()*+,;=%-]+$").expect("Invalid file ref regex")
});

const MAX_FILE_REF_LEN: usize = 512;
const MAX_TITLE_LEN: usize = 200;

/// 校验后的任务字段
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
}

fn require_text(field: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(PortalError::validation(format!("{field} is required"))),
    }
}

pub fn validate_task_fields(req: &CreateTaskRequest) -> Result<TaskFields> {
    let title = require_text("title", req.title.as_deref())?;
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(PortalError::validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    let description = require_text("description", req.description.as_deref())?;
    let deadline = req
        .deadline
        .ok_or_else(|| PortalError::validation("deadline is required"))?;

    // 满分必须为正的有限数
    if !req.marks.is_finite() || req.marks <= 0.0 {
        return Err(PortalError::validation("marks must be a positive number"));
    }
    if !req.weightage.is_finite() || !(0.0..=100.0).contains(&req.weightage) {
        return Err(PortalError::validation(
            "weightage must be between 0 and 100",
        ));
    }

    Ok(TaskFields {
        title,
        description,
        deadline,
    })
}

/// 分数范围 0 ≤ grade ≤ marks
pub fn validate_grade(grade: f64, marks: f64) -> Result<()> {
    if !grade.is_finite() {
        return Err(PortalError::validation("grade must be a finite number"));
    }
    if grade < 0.0 {
        return Err(PortalError::validation("grade must not be negative"));
    }
    if grade > marks {
        return Err(PortalError::validation(format!(
            "grade {grade} exceeds task marks {marks}"
        )));
    }
    Ok(())
}

pub fn validate_internship_request(req: &CreateInternshipRequest) -> Result<()> {
    require_text("host_institution", Some(&req.host_institution))?;
    require_text("category", Some(&req.category))?;
    validate_date_range(req.start_date, req.end_date)
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(PortalError::validation(
            "end_date must not be earlier than start_date",
        ));
    }
    Ok(())
}

pub fn validate_file_ref(file_ref: &str) -> Result<()> {
    let file_ref = file_ref.trim();
    if file_ref.is_empty() {
        return Err(PortalError::validation("file_ref is required"));
    }
    if file_ref.len() > MAX_FILE_REF_LEN {
        return Err(PortalError::validation(format!(
            "file_ref must be at most {MAX_FILE_REF_LEN} bytes"
        )));
    }
    if !FILE_REF_RE.is_match(file_ref) {
        return Err(PortalError::validation(
            "file_ref contains unsupported characters",
        ));
    }
    Ok(())
}
