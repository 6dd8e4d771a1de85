use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 创建实习请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct CreateInternshipRequest {
    pub host_institution: String,
    pub category: String,
    pub start_date: NaiveDate, // "2025-06-01"
    pub end_date: NaiveDate,
}

/// 实习列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct InternshipListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_optional_bool")]
    #[ts(optional)]
    pub approved: Option<bool>,
    pub search: Option<String>,
}

// flatten 后查询串中的值都以字符串形式到达，这里同时接受 bool 与 "true"/"false"
fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct OptionalBoolVisitor;

    impl<'de> Visitor<'de> for OptionalBoolVisitor {
        type Value = Option<bool>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean or a string containing a boolean")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Some(value))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            match value.trim() {
                "" => Ok(None),
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(Error::invalid_value(Unexpected::Str(value), &self)),
            }
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(OptionalBoolVisitor)
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct InternshipListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub approved: Option<bool>,
    pub search: Option<String>,
}

impl From<InternshipListParams> for InternshipListQuery {
    fn from(params: InternshipListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            approved: params.approved,
            search: params.search,
        }
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct AssignStudentRequest {
    pub student_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct AssignFacultyRequest {
    pub faculty_id: i64,
}
