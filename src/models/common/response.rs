use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::SchedulerError;
use crate::models::ErrorCode;

// 统一的 API 消息响应结构（列表接口直接返回数组，不经过此结构）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 由业务错误构造，message 原样透传给客户端
    pub fn from_error(err: &SchedulerError) -> Self {
        Self::error_empty(err.error_code(), err.message())
    }
}
