//! Lesson Scheduler - 课程排期服务
//!
//! 基于 Actix Web 与 SeaORM 构建，提供课程列表查询与按周期规则批量排课。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（过滤、周期展开、聚合）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 参数校验与解析错误处理

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
