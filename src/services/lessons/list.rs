use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::aggregate::attach;
use super::filter::LessonFilterBuilder;
use super::{LessonService, bad_request};
use crate::errors::{Result, SchedulerError};
use crate::models::lessons::{
    requests::{LessonListParams, LessonListQuery},
    responses::LessonListItem,
};
use crate::storage::Storage;

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
    query: LessonListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match collect_lessons(storage.as_ref(), query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(items)),
        Err(e) => Ok(bad_request(&e)),
    }
}

/// 过滤 -> 分页查询 -> 关联教师学生 -> 学生数过滤
async fn collect_lessons(
    storage: &dyn Storage,
    query: LessonListParams,
) -> Result<Vec<LessonListItem>> {
    let filter = LessonFilterBuilder::build(&query, storage).await?;
    let (limit, offset) = query.pagination.limit_offset();

    let lessons = storage
        .list_lessons(LessonListQuery {
            predicates: filter.predicates,
            limit,
            offset,
        })
        .await
        .map_err(|e| {
            error!("Failed to list lessons: {}", e);
            SchedulerError::dependency("Search error lessons!")
        })?;

    if lessons.is_empty() {
        return Ok(Vec::new());
    }

    let lesson_ids: Vec<i64> = lessons.iter().map(|l| l.id).collect();

    let teachers = storage
        .list_teachers_by_lesson_ids(&lesson_ids)
        .await
        .map_err(|e| {
            error!("Failed to load teachers for lessons: {}", e);
            SchedulerError::dependency("Search error teachers by id lessons!")
        })?;

    let students = storage
        .list_students_by_lesson_ids(&lesson_ids)
        .await
        .map_err(|e| {
            error!("Failed to load students for lessons: {}", e);
            SchedulerError::dependency("Search error students by id lessons!")
        })?;

    Ok(attach(lessons, teachers, students, filter.students_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::storage::memory_storage::{FailPoint, MemoryStorage};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded(storage: MemoryStorage) -> MemoryStorage {
        let storage = storage
            .with_teacher(1, "Alice")
            .with_teacher(2, "Bob")
            .with_student(10, "Ivan")
            .with_student(11, "Olga");
        let a = storage.add_lesson("A", date(2030, 1, 3), 0);
        let b = storage.add_lesson("B", date(2030, 1, 1), 1);
        let c = storage.add_lesson("C", date(2030, 1, 2), 0);
        storage.link_teacher(a, 1);
        storage.link_teacher(b, 2);
        storage.link_teacher(c, 1);
        storage.link_student(a, 10, true);
        storage.link_student(a, 11, true);
        storage.link_student(c, 10, false);
        storage
    }

    fn params() -> LessonListParams {
        LessonListParams::default()
    }

    fn titles(items: &[LessonListItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[actix_web::test]
    async fn test_lists_in_date_order() {
        let storage = seeded(MemoryStorage::new());
        let items = collect_lessons(&storage, params()).await.unwrap();
        assert_eq!(titles(&items), vec!["B", "C", "A"]);
        assert_eq!(items[2].visit_count, 2);
        assert_eq!(items[1].students.len(), 1);
        assert_eq!(items[0].teachers[0].name, "Bob");
    }

    #[actix_web::test]
    async fn test_pagination_applies_before_students_count() {
        let storage = seeded(MemoryStorage::new());
        let query = LessonListParams {
            pagination: PaginationQuery {
                page: 1,
                lessons_per_page: 2,
            },
            students_count: Some("1,2".into()),
            ..params()
        };
        // 第一页为 B、C，按学生数过滤后只剩 C
        let items = collect_lessons(&storage, query).await.unwrap();
        assert_eq!(titles(&items), vec!["C"]);
    }

    #[actix_web::test]
    async fn test_teacher_filter() {
        let storage = seeded(MemoryStorage::new());
        let query = LessonListParams {
            teacher_ids: Some("1".into()),
            ..params()
        };
        let items = collect_lessons(&storage, query).await.unwrap();
        assert_eq!(titles(&items), vec!["C", "A"]);
    }

    #[actix_web::test]
    async fn test_empty_result_skips_relation_lookups() {
        // 教师查询会失败，但没有课程时不应触发
        let storage = MemoryStorage::new().failing_on(FailPoint::ListTeachers);
        let items = collect_lessons(&storage, params()).await.unwrap();
        assert!(items.is_empty());
    }

    #[actix_web::test]
    async fn test_storage_failures_map_to_messages() {
        for (point, message) in [
            (FailPoint::ListLessons, "Search error lessons!"),
            (FailPoint::ListTeachers, "Search error teachers by id lessons!"),
            (FailPoint::ListStudents, "Search error students by id lessons!"),
        ] {
            let storage = seeded(MemoryStorage::new().failing_on(point));
            let err = collect_lessons(&storage, params()).await.unwrap_err();
            assert!(matches!(err, SchedulerError::Dependency(_)));
            assert_eq!(err.message(), message);
        }
    }
}
