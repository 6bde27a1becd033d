use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::lessons::{
    entities::{Lesson, LessonOccurrence, LessonStudentRow, LessonTeacherRow},
    requests::LessonListQuery,
};

use crate::errors::Result;

#[cfg(test)]
pub mod memory_storage;
pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教师
    // 返回给定 ID 中真实存在的教师 ID
    async fn find_existing_teacher_ids(&self, teacher_ids: &[i64]) -> Result<BTreeSet<i64>>;

    /// 课程
    // 由任一给定教师授课的课程 ID（去重）
    async fn find_lesson_ids_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<BTreeSet<i64>>;
    // 按谓词分页查询课程，按日期、ID 升序
    async fn list_lessons(&self, query: LessonListQuery) -> Result<Vec<Lesson>>;
    // 批量获取课程的教师
    async fn list_teachers_by_lesson_ids(&self, lesson_ids: &[i64])
    -> Result<Vec<LessonTeacherRow>>;
    // 批量获取课程的学生及出勤
    async fn list_students_by_lesson_ids(&self, lesson_ids: &[i64])
    -> Result<Vec<LessonStudentRow>>;
    // 在同一事务中插入课程及其教师关联，返回插入的课程数
    async fn create_lessons_with_teachers(
        &self,
        occurrences: Vec<LessonOccurrence>,
        teacher_ids: &[i64],
    ) -> Result<usize>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
