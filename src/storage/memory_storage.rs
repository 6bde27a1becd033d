//! 内存存储实现，仅用于测试

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::Storage;
use crate::errors::{Result, SchedulerError};
use crate::models::lessons::{
    entities::{Lesson, LessonOccurrence, LessonStudentRow, LessonTeacherRow},
    requests::{LessonListQuery, LessonPredicate},
};

/// 可注入失败的存储调用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    FindTeachers,
    FindLessonIds,
    ListLessons,
    ListTeachers,
    ListStudents,
    CreateLessons,
}

#[derive(Debug, Default)]
struct Tables {
    teachers: BTreeMap<i64, String>,
    students: BTreeMap<i64, String>,
    lessons: Vec<Lesson>,
    // (lesson_id, teacher_id)
    lesson_teachers: Vec<(i64, i64)>,
    // (lesson_id, student_id, visit)
    lesson_students: Vec<(i64, i64, bool)>,
    next_lesson_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
    fail_on: Option<FailPoint>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, point: FailPoint) -> Self {
        self.fail_on = Some(point);
        self
    }

    pub fn with_teacher(self, id: i64, name: &str) -> Self {
        self.tables
            .lock()
            .unwrap()
            .teachers
            .insert(id, name.to_string());
        self
    }

    pub fn with_student(self, id: i64, name: &str) -> Self {
        self.tables
            .lock()
            .unwrap()
            .students
            .insert(id, name.to_string());
        self
    }

    /// 直接写入一条课程（绕过事务），返回课程 ID
    pub fn add_lesson(&self, title: &str, date: chrono::NaiveDate, status: i32) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        tables.next_lesson_id += 1;
        let id = tables.next_lesson_id;
        tables.lessons.push(Lesson {
            id,
            title: title.to_string(),
            date,
            status,
        });
        id
    }

    pub fn link_teacher(&self, lesson_id: i64, teacher_id: i64) {
        self.tables
            .lock()
            .unwrap()
            .lesson_teachers
            .push((lesson_id, teacher_id));
    }

    pub fn link_student(&self, lesson_id: i64, student_id: i64, visit: bool) {
        self.tables
            .lock()
            .unwrap()
            .lesson_students
            .push((lesson_id, student_id, visit));
    }

    pub fn lessons(&self) -> Vec<Lesson> {
        self.tables.lock().unwrap().lessons.clone()
    }

    pub fn lesson_teacher_links(&self) -> Vec<(i64, i64)> {
        self.tables.lock().unwrap().lesson_teachers.clone()
    }

    fn check(&self, point: FailPoint) -> Result<()> {
        if self.fail_on == Some(point) {
            Err(SchedulerError::database_operation(format!(
                "injected failure at {point:?}"
            )))
        } else {
            Ok(())
        }
    }
}

fn matches(lesson: &Lesson, predicate: &LessonPredicate) -> bool {
    match predicate {
        LessonPredicate::IdIn(ids) => ids.contains(&lesson.id),
        LessonPredicate::Status(status) => lesson.status == *status,
        LessonPredicate::DateOn(date) => lesson.date == *date,
        LessonPredicate::DateBetween(from, to) => (*from..=*to).contains(&lesson.date),
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn find_existing_teacher_ids(&self, teacher_ids: &[i64]) -> Result<BTreeSet<i64>> {
        self.check(FailPoint::FindTeachers)?;
        let tables = self.tables.lock().unwrap();
        Ok(teacher_ids
            .iter()
            .copied()
            .filter(|id| tables.teachers.contains_key(id))
            .collect())
    }

    async fn find_lesson_ids_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<BTreeSet<i64>> {
        self.check(FailPoint::FindLessonIds)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .lesson_teachers
            .iter()
            .filter(|(_, teacher_id)| teacher_ids.contains(teacher_id))
            .map(|(lesson_id, _)| *lesson_id)
            .collect())
    }

    async fn list_lessons(&self, query: LessonListQuery) -> Result<Vec<Lesson>> {
        self.check(FailPoint::ListLessons)?;
        let tables = self.tables.lock().unwrap();
        let mut lessons: Vec<Lesson> = tables
            .lessons
            .iter()
            .filter(|lesson| query.predicates.iter().all(|p| matches(lesson, p)))
            .cloned()
            .collect();
        lessons.sort_by_key(|l| (l.date, l.id));
        Ok(lessons
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn list_teachers_by_lesson_ids(
        &self,
        lesson_ids: &[i64],
    ) -> Result<Vec<LessonTeacherRow>> {
        self.check(FailPoint::ListTeachers)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .lesson_teachers
            .iter()
            .filter(|(lesson_id, _)| lesson_ids.contains(lesson_id))
            .filter_map(|&(lesson_id, teacher_id)| {
                tables.teachers.get(&teacher_id).map(|name| LessonTeacherRow {
                    lesson_id,
                    teacher_id,
                    name: name.clone(),
                })
            })
            .collect())
    }

    async fn list_students_by_lesson_ids(
        &self,
        lesson_ids: &[i64],
    ) -> Result<Vec<LessonStudentRow>> {
        self.check(FailPoint::ListStudents)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .lesson_students
            .iter()
            .filter(|(lesson_id, _, _)| lesson_ids.contains(lesson_id))
            .filter_map(|&(lesson_id, student_id, visit)| {
                tables.students.get(&student_id).map(|name| LessonStudentRow {
                    lesson_id,
                    student_id,
                    name: name.clone(),
                    visit,
                })
            })
            .collect())
    }

    async fn create_lessons_with_teachers(
        &self,
        occurrences: Vec<LessonOccurrence>,
        teacher_ids: &[i64],
    ) -> Result<usize> {
        self.check(FailPoint::CreateLessons)?;
        if occurrences.is_empty() || teacher_ids.is_empty() {
            return Err(SchedulerError::validation("empty lesson batch"));
        }

        let mut tables = self.tables.lock().unwrap();
        if let Some(missing) = teacher_ids
            .iter()
            .find(|id| !tables.teachers.contains_key(id))
        {
            return Err(SchedulerError::database_operation(format!(
                "FOREIGN KEY constraint failed: teacher {missing}"
            )));
        }

        let count = occurrences.len();
        for occurrence in occurrences {
            tables.next_lesson_id += 1;
            let id = tables.next_lesson_id;
            tables.lessons.push(Lesson {
                id,
                title: occurrence.title,
                date: occurrence.date,
                status: 0,
            });
            for &teacher_id in teacher_ids {
                tables.lesson_teachers.push((id, teacher_id));
            }
        }
        Ok(count)
    }
}
