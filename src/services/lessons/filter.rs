//! 课程列表过滤条件构建
//!
//! 各查询参数独立校验，按学生数、状态、日期、教师的顺序检查，首个错误即返回。
//! 教师过滤会先经存储层解析为课程 ID 集合。

use tracing::{debug, error};

use crate::errors::{Result, SchedulerError};
use crate::models::lessons::requests::{LessonListParams, LessonPredicate};
use crate::storage::Storage;
use crate::utils::{parse_date, validate_numeric_list};

/// 学生数过滤，需在关联学生之后才能判断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentsCountFilter {
    Exact(usize),
    // 闭区间
    Between(usize, usize),
}

impl StudentsCountFilter {
    pub fn matches(&self, count: usize) -> bool {
        match *self {
            StudentsCountFilter::Exact(expected) => count == expected,
            StudentsCountFilter::Between(min, max) => (min..=max).contains(&count),
        }
    }
}

/// 组装好的列表过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub predicates: Vec<LessonPredicate>,
    pub students_count: Option<StudentsCountFilter>,
}

pub struct LessonFilterBuilder;

impl LessonFilterBuilder {
    pub async fn build(params: &LessonListParams, storage: &dyn Storage) -> Result<ListFilter> {
        let students_count = params
            .students_count
            .as_deref()
            .map(Self::parse_students_count)
            .transpose()?;

        let mut predicates = Vec::new();

        if let Some(raw) = params.status.as_deref() {
            predicates.push(Self::parse_status(raw)?);
        }

        // 空字符串等同于未提供
        if let Some(raw) = params.date.as_deref()
            && !raw.is_empty()
        {
            predicates.push(Self::parse_date_range(raw)?);
        }

        if let Some(raw) = params.teacher_ids.as_deref() {
            let teacher_ids = Self::parse_teacher_ids(raw)?;
            let lesson_ids = storage
                .find_lesson_ids_by_teacher_ids(&teacher_ids)
                .await
                .map_err(|e| {
                    error!("Failed to resolve lessons for teachers {:?}: {}", teacher_ids, e);
                    SchedulerError::dependency("Search error id lessons by id teachers!")
                })?;
            predicates.push(LessonPredicate::IdIn(lesson_ids.into_iter().collect()));
        }

        debug!(
            "Built lesson filter: {:?}, students count: {:?}",
            predicates, students_count
        );

        Ok(ListFilter {
            predicates,
            students_count,
        })
    }

    fn parse_students_count(raw: &str) -> Result<StudentsCountFilter> {
        let invalid = || SchedulerError::validation("Incorrect number of students!");

        let tokens: Vec<&str> = raw.split(',').collect();
        if tokens.len() > 2 || !validate_numeric_list(&tokens) {
            return Err(invalid());
        }

        let bounds = tokens
            .iter()
            .map(|token| token.parse::<usize>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;

        match bounds.as_slice() {
            [exact] => Ok(StudentsCountFilter::Exact(*exact)),
            [min, max] => Ok(StudentsCountFilter::Between(*min, *max)),
            _ => Err(invalid()),
        }
    }

    fn parse_status(raw: &str) -> Result<LessonPredicate> {
        match raw.trim().parse::<i32>() {
            Ok(status @ (0 | 1)) => Ok(LessonPredicate::Status(status)),
            _ => Err(SchedulerError::validation("Status is not valid!")),
        }
    }

    fn parse_date_range(raw: &str) -> Result<LessonPredicate> {
        let invalid = || SchedulerError::validation("Invalid date!");

        let tokens: Vec<&str> = raw.split(',').collect();
        let dates = tokens
            .iter()
            .map(|token| parse_date(token).ok_or_else(invalid))
            .collect::<Result<Vec<_>>>()?;

        // 补零的 ISO 日期，字符串顺序与日期先后一致
        match (tokens.as_slice(), dates.as_slice()) {
            ([_], [on]) => Ok(LessonPredicate::DateOn(*on)),
            ([first, second], [from, to]) if first <= second => {
                Ok(LessonPredicate::DateBetween(*from, *to))
            }
            _ => Err(invalid()),
        }
    }

    fn parse_teacher_ids(raw: &str) -> Result<Vec<i64>> {
        let invalid = || SchedulerError::validation("ID teacher is not valid!");

        let tokens: Vec<&str> = raw.split(',').collect();
        if !validate_numeric_list(&tokens) {
            return Err(invalid());
        }
        tokens
            .iter()
            .map(|token| token.parse::<i64>().map_err(|_| invalid()))
            .collect()
    }
}
