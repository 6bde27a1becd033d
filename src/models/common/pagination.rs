use serde::Deserialize;
use ts_rs::TS;

/// 每页课程数默认值
pub const DEFAULT_LESSONS_PER_PAGE: i64 = 5;
/// 每页课程数上限
pub const MAX_LESSONS_PER_PAGE: i64 = 100;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_lessons_per_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub lessons_per_page: i64,
}

impl PaginationQuery {
    /// 规范化后的 (limit, offset)，offset = (page - 1) * lessonsPerPage
    ///
    /// offset 饱和在 `i64::MAX`，数据库的 OFFSET 为有符号 64 位。
    pub fn limit_offset(&self) -> (u64, u64) {
        let page = self.page.max(1) as u64;
        let limit = self.lessons_per_page.clamp(1, MAX_LESSONS_PER_PAGE) as u64;
        let offset = (page - 1).saturating_mul(limit).min(i64::MAX as u64);
        (limit, offset)
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            i64::try_from(value).map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

fn default_lessons_per_page() -> i64 {
    DEFAULT_LESSONS_PER_PAGE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            lessons_per_page: default_lessons_per_page(),
        }
    }
}
