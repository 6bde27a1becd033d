//! 周期规则展开
//!
//! 从起始日期开始逐日前进，挑出星期几命中的日期。无论哪种终止方式，
//! 都受 [`MAX_OCCURRENCES`] 条数上限与一年期限的双重约束。

use chrono::{Datelike, Months, NaiveDate, Weekday};

/// 单次展开最多生成的课程数
pub const MAX_OCCURRENCES: usize = 300;

/// 星期集合，0 = 周一 … 6 = 周日
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// 由星期序号构造；任一序号越界返回 `None`
    pub fn from_indices(indices: &[i64]) -> Option<Self> {
        indices.iter().try_fold(WeekdaySet(0), |set, &index| {
            (0..7)
                .contains(&index)
                .then(|| WeekdaySet(set.0 | (1u8 << index)))
        })
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1u8 << weekday.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// 展开的终止条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceBound {
    /// 期望的课程数
    Count(u32),
    /// 最后允许的日期（含）
    Until(NaiveDate),
}

/// 一条周期规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub first_date: NaiveDate,
    pub days: WeekdaySet,
    pub bound: RecurrenceBound,
}

impl RecurrenceRule {
    pub fn expand(&self) -> Vec<NaiveDate> {
        expand(self.first_date, self.days, self.bound)
    }
}

/// 展开期限：起始日期加 12 个月，该日本身不在范围内
///
/// 两种终止方式都只取严格早于期限的日期，即使 `Until` 的截止日期更晚，
/// 周年当天也不会生成课程。2 月 29 日落到次年 2 月 28 日。
pub fn horizon(first_date: NaiveDate) -> NaiveDate {
    first_date
        .checked_add_months(Months::new(12))
        .unwrap_or(NaiveDate::MAX)
}

/// 按规则生成有序、去重、有界的日期序列
///
/// 结果可能少于 `Count` 要求的数量（触达期限或上限），也可能为空，均不视为错误。
pub fn expand(first_date: NaiveDate, days: WeekdaySet, bound: RecurrenceBound) -> Vec<NaiveDate> {
    let horizon = horizon(first_date);
    let (last_date, limit) = match bound {
        RecurrenceBound::Count(count) => (None, (count as usize).min(MAX_OCCURRENCES)),
        RecurrenceBound::Until(last) => (Some(last), MAX_OCCURRENCES),
    };

    first_date
        .iter_days()
        .take_while(|day| *day < horizon)
        .take_while(|day| last_date.is_none_or(|last| *day <= last))
        .filter(|day| days.contains(day.weekday()))
        .take(limit)
        .collect()
}
