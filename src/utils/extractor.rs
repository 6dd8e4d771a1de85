//! 路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应，处理函数拿到的一定是合法值。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::tasks::entities::TaskOrigin;
use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

// 解析正整数 ID
fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_request(format!("Missing path parameter: {name}")))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_request(format!("Invalid {name}: '{raw}'"))),
    }
}

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIDI64 => "id",
    SafeStudentIdI64 => "student_id",
    SafeFacultyIdI64 => "faculty_id",
}

/// 路径中的任务来源 `{origin}`
#[derive(Debug, Clone, Copy)]
pub struct SafeTaskOrigin(pub TaskOrigin);

impl FromRequest for SafeTaskOrigin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("origin")
            .ok_or_else(|| bad_request("Missing path parameter: origin".to_string()))
            .and_then(|raw| raw.parse::<TaskOrigin>().map_err(bad_request))
            .map(SafeTaskOrigin);
        ready(result)
    }
}
