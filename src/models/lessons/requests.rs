use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 课程列表查询参数（来自HTTP请求，原样保留字符串交给过滤器校验）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
#[serde(rename_all = "camelCase")]
pub struct LessonListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub date: Option<String>,
    pub status: Option<String>,
    pub teacher_ids: Option<String>,
    pub students_count: Option<String>,
}

// 批量创建课程请求
//
// lessons_count 与 last_date 二选一。字段保留原始 JSON 值，类型错误同样交给
// 服务层按固定顺序校验并给出对应的错误信息。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonsRequest {
    #[ts(type = "string | null")]
    pub title: Option<Value>,
    #[ts(type = "Array<number> | null")]
    pub teacher_ids: Option<Value>,
    #[ts(type = "Array<number> | null")]
    pub days: Option<Value>,
    #[ts(type = "string | null")]
    pub first_date: Option<Value>,
    #[ts(type = "number | null")]
    pub lessons_count: Option<Value>,
    #[ts(type = "string | null")]
    pub last_date: Option<Value>,
}

impl CreateLessonsRequest {
    /// 请求体中没有任何已知字段
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.teacher_ids.is_none()
            && self.days.is_none()
            && self.first_date.is_none()
            && self.lessons_count.is_none()
            && self.last_date.is_none()
    }
}

// 课程查询谓词，由存储层翻译为参数化查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonPredicate {
    // id IN (...)，空集合匹配零行
    IdIn(Vec<i64>),
    Status(i32),
    DateOn(NaiveDate),
    // 闭区间
    DateBetween(NaiveDate, NaiveDate),
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonListQuery {
    pub predicates: Vec<LessonPredicate>,
    pub limit: u64,
    pub offset: u64,
}
