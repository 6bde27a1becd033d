use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("Invalid date regex"));

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("Invalid number regex"));

/// 允许的年份范围（闭区间）
pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2050;

/// 解析 `YYYY-MM-DD` 格式的日历日期
///
/// 要求补零的 ISO 格式、年份在 [`MIN_YEAR`, `MAX_YEAR`] 之间，且月、日真实存在。
/// 补零格式保证了字符串顺序与日期先后一致。
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(value)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn validate_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// 逗号分隔的每一项都必须是非负整数
pub fn validate_numeric_list(tokens: &[&str]) -> bool {
    tokens.iter().all(|token| NUMBER_RE.is_match(token))
}
