//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use crate::models::ErrorCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_scheduler_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum SchedulerError {
            $($variant(String),)*
        }

        impl SchedulerError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchedulerError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchedulerError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchedulerError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchedulerError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchedulerError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_scheduler_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    Conflict("E005", "Parameter Conflict Error"),
    Dependency("E006", "Dependency Error"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
}

impl SchedulerError {
    /// 对应的 API 错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchedulerError::Validation(_) | SchedulerError::DateParse(_) => {
                ErrorCode::ValidationFailed
            }
            SchedulerError::Conflict(_) => ErrorCode::ParameterConflict,
            SchedulerError::Dependency(_) => ErrorCode::DependencyFailed,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchedulerError {}

impl From<sea_orm::DbErr> for SchedulerError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchedulerError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        SchedulerError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchedulerError {
    fn from(err: chrono::ParseError) -> Self {
        SchedulerError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
