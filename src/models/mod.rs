//! 数据模型定义
//!
//! - `common`: 通用响应、分页、错误码
//! - `lessons`: 课程相关的业务实体、请求与响应

pub mod common;
pub mod lessons;

pub use common::{ApiResponse, ErrorCode, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
