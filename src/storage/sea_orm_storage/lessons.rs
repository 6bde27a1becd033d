//! 课程存储操作

use std::collections::BTreeSet;

use super::SeaOrmStorage;
use crate::entity::lesson_students::{Column as LessonStudentColumn, Entity as LessonStudents};
use crate::entity::lesson_teachers::{
    ActiveModel as LessonTeacherActiveModel, Column as LessonTeacherColumn,
    Entity as LessonTeachers,
};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::entity::students::Entity as Students;
use crate::entity::teachers::Entity as Teachers;
use crate::errors::{Result, SchedulerError};
use crate::models::lessons::{
    entities::{Lesson, LessonOccurrence, LessonStudentRow, LessonTeacherRow},
    requests::{LessonListQuery, LessonPredicate},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, warn};

/// 单条 INSERT 语句中关联行的上限
const LINK_INSERT_CHUNK: usize = 500;

/// 将谓词列表翻译为参数化条件（AND 组合）
fn build_condition(predicates: &[LessonPredicate]) -> Condition {
    predicates
        .iter()
        .fold(Condition::all(), |cond, predicate| match predicate {
            // 空集合生成恒假条件，不会退化为忽略过滤
            LessonPredicate::IdIn(ids) => cond.add(Column::Id.is_in(ids.iter().copied())),
            LessonPredicate::Status(status) => cond.add(Column::Status.eq(*status)),
            LessonPredicate::DateOn(date) => cond.add(Column::Date.eq(*date)),
            LessonPredicate::DateBetween(from, to) => cond.add(Column::Date.between(*from, *to)),
        })
}

impl SeaOrmStorage {
    /// 查询任一教师所授课程的 ID
    pub async fn find_lesson_ids_by_teacher_ids_impl(
        &self,
        teacher_ids: &[i64],
    ) -> Result<BTreeSet<i64>> {
        if teacher_ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let ids = LessonTeachers::find()
            .filter(LessonTeacherColumn::TeacherId.is_in(teacher_ids.iter().copied()))
            .select_only()
            .column(LessonTeacherColumn::LessonId)
            .distinct()
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| {
                SchedulerError::database_operation(format!("按教师查询课程 ID 失败: {e}"))
            })?;

        Ok(ids.into_iter().collect())
    }

    /// 按谓词分页查询课程
    pub async fn list_lessons_impl(&self, query: LessonListQuery) -> Result<Vec<Lesson>> {
        let lessons = Lessons::find()
            .filter(build_condition(&query.predicates))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .offset(query.offset)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(|e| SchedulerError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(lessons.into_iter().map(|m| m.into_lesson()).collect())
    }

    /// 批量获取课程教师
    pub async fn list_teachers_by_lesson_ids_impl(
        &self,
        lesson_ids: &[i64],
    ) -> Result<Vec<LessonTeacherRow>> {
        let rows = LessonTeachers::find()
            .filter(LessonTeacherColumn::LessonId.is_in(lesson_ids.iter().copied()))
            .order_by_asc(LessonTeacherColumn::Id)
            .find_also_related(Teachers)
            .all(&self.db)
            .await
            .map_err(|e| SchedulerError::database_operation(format!("查询课程教师失败: {e}")))?;

        // 外键保证教师存在，缺失的行直接跳过
        Ok(rows
            .into_iter()
            .filter_map(|(link, teacher)| {
                teacher.map(|t| LessonTeacherRow {
                    lesson_id: link.lesson_id,
                    teacher_id: t.id,
                    name: t.name,
                })
            })
            .collect())
    }

    /// 批量获取课程学生
    pub async fn list_students_by_lesson_ids_impl(
        &self,
        lesson_ids: &[i64],
    ) -> Result<Vec<LessonStudentRow>> {
        let rows = LessonStudents::find()
            .filter(LessonStudentColumn::LessonId.is_in(lesson_ids.iter().copied()))
            .order_by_asc(LessonStudentColumn::Id)
            .find_also_related(Students)
            .all(&self.db)
            .await
            .map_err(|e| SchedulerError::database_operation(format!("查询课程学生失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, student)| {
                student.map(|s| LessonStudentRow {
                    lesson_id: link.lesson_id,
                    student_id: s.id,
                    name: s.name,
                    visit: link.visit,
                })
            })
            .collect())
    }

    /// 在一个事务内插入课程和教师关联
    ///
    /// 任一步失败都会回滚，已插入的课程不会可见。
    pub async fn create_lessons_with_teachers_impl(
        &self,
        occurrences: Vec<LessonOccurrence>,
        teacher_ids: &[i64],
    ) -> Result<usize> {
        if occurrences.is_empty() {
            return Err(SchedulerError::validation("没有可插入的课程"));
        }
        if teacher_ids.is_empty() {
            return Err(SchedulerError::validation("课程至少需要一名教师"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchedulerError::database_operation(format!("开启事务失败: {e}")))?;

        match Self::insert_lessons_and_links(&txn, occurrences, teacher_ids).await {
            Ok(count) => {
                txn.commit()
                    .await
                    .map_err(|e| SchedulerError::database_operation(format!("提交事务失败: {e}")))?;
                Ok(count)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("Rollback after failed lesson insert also failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn insert_lessons_and_links(
        txn: &DatabaseTransaction,
        occurrences: Vec<LessonOccurrence>,
        teacher_ids: &[i64],
    ) -> Result<usize> {
        let mut lesson_ids = Vec::with_capacity(occurrences.len());
        for occurrence in occurrences {
            let model = ActiveModel {
                date: Set(occurrence.date),
                title: Set(occurrence.title),
                status: Set(0),
                ..Default::default()
            };
            let inserted = model
                .insert(txn)
                .await
                .map_err(|e| SchedulerError::database_operation(format!("创建课程失败: {e}")))?;
            lesson_ids.push(inserted.id);
        }

        let links: Vec<LessonTeacherActiveModel> = lesson_ids
            .iter()
            .flat_map(|&lesson_id| {
                teacher_ids.iter().map(move |&teacher_id| LessonTeacherActiveModel {
                    lesson_id: Set(lesson_id),
                    teacher_id: Set(teacher_id),
                    ..Default::default()
                })
            })
            .collect();

        debug!(
            "Inserting {} lessons with {} teacher links",
            lesson_ids.len(),
            links.len()
        );

        for chunk in links.chunks(LINK_INSERT_CHUNK) {
            LessonTeachers::insert_many(chunk.to_vec())
                .exec(txn)
                .await
                .map_err(|e| {
                    SchedulerError::database_operation(format!("创建课程教师关联失败: {e}"))
                })?;
        }

        Ok(lesson_ids.len())
    }
}
