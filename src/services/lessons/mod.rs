pub mod aggregate;
pub mod create;
pub mod filter;
pub mod list;
pub mod recurrence;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchedulerError;
use crate::models::ApiResponse;
use crate::models::lessons::requests::{CreateLessonsRequest, LessonListParams};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    /// 直接注入存储实例（不依赖 app_data）
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 分页列出课程
    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        query: LessonListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request, query).await
    }

    // 按周期规则批量创建课程
    pub async fn create_lessons(
        &self,
        request: &HttpRequest,
        lesson_data: CreateLessonsRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lessons(self, request, lesson_data).await
    }
}

/// 所有业务错误统一以 400 返回，message 原样透传
pub(crate) fn bad_request(err: &SchedulerError) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::from_error(err))
}
