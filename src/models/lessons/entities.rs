use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 已持久化的课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct Lesson {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    // 0 或 1
    pub status: i32,
}

// 展开后尚未入库的一次课程
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonOccurrence {
    pub date: NaiveDate,
    pub title: String,
}

// 课程-教师关联行（已连接教师姓名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTeacherRow {
    pub lesson_id: i64,
    pub teacher_id: i64,
    pub name: String,
}

// 课程-学生关联行（已连接学生姓名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonStudentRow {
    pub lesson_id: i64,
    pub student_id: i64,
    pub name: String,
    pub visit: bool,
}
