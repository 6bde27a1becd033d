//! 请求参数解析错误处理
//!
//! 将 actix 的 JSON / Query 解析错误转换为统一的 400 响应。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload error on {}: {}", req.path(), err);

    let (code, message) = match &err {
        JsonPayloadError::Deserialize(e) if e.is_eof() && e.line() == 1 && e.column() == 0 => {
            (ErrorCode::BodyEmpty, "Body is empty!".to_string())
        }
        JsonPayloadError::ContentType => (
            ErrorCode::BadRequest,
            "Content type must be application/json".to_string(),
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            (ErrorCode::BadRequest, "Request body is too large".to_string())
        }
        other => (ErrorCode::BadRequest, format!("Request body is invalid: {other}")),
    };

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query payload error on {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Query parameters are invalid: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
