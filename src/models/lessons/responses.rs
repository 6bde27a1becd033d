use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct LessonTeacher {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct LessonStudent {
    pub id: i64,
    pub name: String,
    pub visit: bool,
}

// 课程列表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "lesson.ts")]
#[serde(rename_all = "camelCase")]
pub struct LessonListItem {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub status: i32,
    // 出勤学生数
    pub visit_count: i64,
    pub teachers: Vec<LessonTeacher>,
    pub students: Vec<LessonStudent>,
}
