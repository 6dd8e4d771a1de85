//! 请求参数解析错误处理
//!
//! 把 actix 默认的纯文本错误替换为统一的 JSON 响应。

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

fn to_bad_request<E: std::fmt::Display + std::fmt::Debug + 'static>(
    err: E,
    req: &HttpRequest,
    kind: &str,
) -> Error {
    let message = format!("Invalid {kind}: {err}");
    warn!("{} {} -> {}", req.method(), req.path(), message);
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    to_bad_request(err, req, "JSON body")
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    to_bad_request(err, req, "query parameters")
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    to_bad_request(err, req, "path parameters")
}
