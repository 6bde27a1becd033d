//! 教师存储操作

use std::collections::BTreeSet;

use super::SeaOrmStorage;
use crate::entity::teachers::{Column, Entity as Teachers};
use crate::errors::{Result, SchedulerError};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    /// 返回真实存在的教师 ID
    pub async fn find_existing_teacher_ids_impl(
        &self,
        teacher_ids: &[i64],
    ) -> Result<BTreeSet<i64>> {
        if teacher_ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let ids = Teachers::find()
            .filter(Column::Id.is_in(teacher_ids.iter().copied()))
            .select_only()
            .column(Column::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SchedulerError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(ids.into_iter().collect())
    }
}
