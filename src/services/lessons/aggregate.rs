//! 课程与教师、学生关联的聚合

use std::collections::HashMap;

use super::filter::StudentsCountFilter;
use crate::models::lessons::{
    entities::{Lesson, LessonStudentRow, LessonTeacherRow},
    responses::{LessonListItem, LessonStudent, LessonTeacher},
};

/// 为每节课挂上教师与学生，并按学生数做事后过滤
///
/// 保持输入顺序；关联行在各自课程内也保持原顺序。
pub fn attach(
    lessons: Vec<Lesson>,
    teacher_rows: Vec<LessonTeacherRow>,
    student_rows: Vec<LessonStudentRow>,
    students_count: Option<StudentsCountFilter>,
) -> Vec<LessonListItem> {
    let mut teachers_by_lesson: HashMap<i64, Vec<LessonTeacher>> = HashMap::new();
    for row in teacher_rows {
        teachers_by_lesson
            .entry(row.lesson_id)
            .or_default()
            .push(LessonTeacher {
                id: row.teacher_id,
                name: row.name,
            });
    }

    let mut students_by_lesson: HashMap<i64, Vec<LessonStudent>> = HashMap::new();
    for row in student_rows {
        students_by_lesson
            .entry(row.lesson_id)
            .or_default()
            .push(LessonStudent {
                id: row.student_id,
                name: row.name,
                visit: row.visit,
            });
    }

    lessons
        .into_iter()
        .map(|lesson| {
            let teachers = teachers_by_lesson.remove(&lesson.id).unwrap_or_default();
            let students = students_by_lesson.remove(&lesson.id).unwrap_or_default();
            let visit_count = students.iter().filter(|s| s.visit).count() as i64;

            LessonListItem {
                id: lesson.id,
                title: lesson.title,
                date: lesson.date,
                status: lesson.status,
                visit_count,
                teachers,
                students,
            }
        })
        .filter(|item| students_count.is_none_or(|filter| filter.matches(item.students.len())))
        .collect()
}
