use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{error, info, warn};

use super::recurrence::{RecurrenceBound, RecurrenceRule, WeekdaySet};
use super::{LessonService, bad_request};
use crate::errors::{Result, SchedulerError};
use crate::models::lessons::{entities::LessonOccurrence, requests::CreateLessonsRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::parse_date;

/// 校验通过的创建请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRule {
    pub title: String,
    // 去重后保持原顺序
    pub teacher_ids: Vec<i64>,
    pub recurrence: RecurrenceRule,
}

impl LessonRule {
    pub fn occurrences(&self) -> Vec<LessonOccurrence> {
        self.recurrence
            .expand()
            .into_iter()
            .map(|date| LessonOccurrence {
                date,
                title: self.title.clone(),
            })
            .collect()
    }
}

pub async fn create_lessons(
    service: &LessonService,
    request: &HttpRequest,
    lesson_data: CreateLessonsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let today = chrono::Utc::now().date_naive();

    let rule = match validate_create_request(lesson_data, storage.as_ref(), today).await {
        Ok(rule) => rule,
        Err(e) => return Ok(bad_request(&e)),
    };

    let occurrences = rule.occurrences();
    if occurrences.is_empty() {
        warn!(
            "Rule {:?} produced no lessons, the insert will be rejected",
            rule.recurrence
        );
    }

    match storage
        .create_lessons_with_teachers(occurrences, &rule.teacher_ids)
        .await
    {
        Ok(count) => {
            info!(
                "Created {} lessons \"{}\" for teachers {:?}",
                count, rule.title, rule.teacher_ids
            );
            Ok(HttpResponse::Created().json(ApiResponse::success_empty("OK!")))
        }
        Err(e) => {
            error!("Lesson creation failed: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::LessonCreationFailed,
                "Failed to add lessons!",
            )))
        }
    }
}

/// 按固定顺序逐项校验，首个失败即返回
pub async fn validate_create_request(
    request: CreateLessonsRequest,
    storage: &dyn Storage,
    today: NaiveDate,
) -> Result<LessonRule> {
    if request.is_empty() {
        return Err(SchedulerError::validation("Body is empty!"));
    }

    if request.last_date.is_some() && request.lessons_count.is_some() {
        return Err(SchedulerError::conflict(
            "Only one of the parameters must be used: lastDate or lessonsCount!",
        ));
    }

    let title = request
        .title
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();
    if title.is_empty() {
        return Err(SchedulerError::validation("Title is empty!"));
    }

    let teacher_ids = validate_teacher_ids(request.teacher_ids.as_ref(), storage).await?;
    let days = validate_days(request.days.as_ref())?;

    let first_date = date_field(request.first_date.as_ref())
        .ok_or_else(|| SchedulerError::validation("FirstDate is invalid!"))?;
    if first_date < today {
        return Err(SchedulerError::validation(
            "FirstDate is less than current date!",
        ));
    }

    let bound = match request.lessons_count.as_ref() {
        Some(count) => {
            let count = count
                .as_i64()
                .filter(|count| *count > 0)
                .ok_or_else(|| SchedulerError::validation("lessonsCount is invalid!"))?;
            RecurrenceBound::Count(u32::try_from(count).unwrap_or(u32::MAX))
        }
        None => {
            let last_date = date_field(request.last_date.as_ref())
                .ok_or_else(|| SchedulerError::validation("lastDate is invalid!"))?;
            if last_date < first_date {
                return Err(SchedulerError::validation(
                    "lastDate is less than firstDate!",
                ));
            }
            RecurrenceBound::Until(last_date)
        }
    };

    Ok(LessonRule {
        title: title.to_string(),
        teacher_ids,
        recurrence: RecurrenceRule {
            first_date,
            days,
            bound,
        },
    })
}

fn date_field(value: Option<&Value>) -> Option<NaiveDate> {
    value.and_then(Value::as_str).and_then(parse_date)
}

async fn validate_teacher_ids(
    teacher_ids: Option<&Value>,
    storage: &dyn Storage,
) -> Result<Vec<i64>> {
    let Some(Value::Array(items)) = teacher_ids else {
        return Err(SchedulerError::validation("TeacherIds is not array!"));
    };
    if items.is_empty() {
        return Err(SchedulerError::validation("Array teacherIds is empty!"));
    }

    // 非整数元素不可能对应任何教师，与不存在的 ID 一并报告
    let mut ids: Vec<i64> = items.iter().filter_map(Value::as_i64).collect();

    let existing = storage.find_existing_teacher_ids(&ids).await.map_err(|e| {
        error!("Failed to check teachers {:?}: {}", ids, e);
        SchedulerError::dependency("Error checking teachers by id!")
    })?;

    let missing: Vec<String> = items
        .iter()
        .filter(|item| item.as_i64().is_none_or(|id| !existing.contains(&id)))
        .map(|item| match item {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        })
        .collect();
    if !missing.is_empty() {
        return Err(SchedulerError::validation(format!(
            "No teachers with id: {}!",
            missing.join(",")
        )));
    }

    // 重复的教师只保留一条关联
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(*id));
    Ok(ids)
}

fn validate_days(days: Option<&Value>) -> Result<WeekdaySet> {
    let Some(Value::Array(items)) = days else {
        return Err(SchedulerError::validation("Days is not array!"));
    };
    if items.is_empty() || items.len() > 7 {
        return Err(SchedulerError::validation("Invalid array length!"));
    }
    items
        .iter()
        .map(Value::as_i64)
        .collect::<Option<Vec<_>>>()
        .and_then(|indices| WeekdaySet::from_indices(&indices))
        .ok_or_else(|| SchedulerError::validation("Wrong days of the week!"))
}
