//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod lessons;
mod teachers;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SchedulerError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并执行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchedulerError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + 外键约束）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 关联表依赖外键保证教师、课程存在
        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchedulerError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| SchedulerError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| SchedulerError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchedulerError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::lessons::{
    entities::{Lesson, LessonOccurrence, LessonStudentRow, LessonTeacherRow},
    requests::LessonListQuery,
};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::BTreeSet;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 教师模块
    async fn find_existing_teacher_ids(&self, teacher_ids: &[i64]) -> Result<BTreeSet<i64>> {
        self.find_existing_teacher_ids_impl(teacher_ids).await
    }

    // 课程模块
    async fn find_lesson_ids_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<BTreeSet<i64>> {
        self.find_lesson_ids_by_teacher_ids_impl(teacher_ids).await
    }

    async fn list_lessons(&self, query: LessonListQuery) -> Result<Vec<Lesson>> {
        self.list_lessons_impl(query).await
    }

    async fn list_teachers_by_lesson_ids(
        &self,
        lesson_ids: &[i64],
    ) -> Result<Vec<LessonTeacherRow>> {
        self.list_teachers_by_lesson_ids_impl(lesson_ids).await
    }

    async fn list_students_by_lesson_ids(
        &self,
        lesson_ids: &[i64],
    ) -> Result<Vec<LessonStudentRow>> {
        self.list_students_by_lesson_ids_impl(lesson_ids).await
    }

    async fn create_lessons_with_teachers(
        &self,
        occurrences: Vec<LessonOccurrence>,
        teacher_ids: &[i64],
    ) -> Result<usize> {
        self.create_lessons_with_teachers_impl(occurrences, teacher_ids)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("lessons.db").unwrap(),
            "sqlite://lessons.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
