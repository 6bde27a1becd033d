use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::lessons::requests::{CreateLessonsRequest, LessonListParams};
use crate::services::LessonService;

// 懒加载的全局 LESSON_SERVICE 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

// HTTP处理程序
pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<LessonListParams>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn create_lessons(
    req: HttpRequest,
    lesson_data: web::Json<CreateLessonsRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lessons(&req, lesson_data.into_inner())
        .await
}

// 未匹配的路径与方法，纯文本响应
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/plain; charset=utf-8")
        .body("Not Found")
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    // 方法不匹配时同样返回 404，而不是 405
    cfg.service(
        web::resource("/")
            .route(web::get().to(list_lessons))
            .default_service(web::to(not_found)),
    )
    .service(
        web::resource("/lessons")
            .route(web::post().to(create_lessons))
            .default_service(web::to(not_found)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use crate::utils::{json_error_handler, query_error_handler};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_storage() -> Arc<MemoryStorage> {
        let storage = MemoryStorage::new()
            .with_teacher(1, "Alice")
            .with_teacher(2, "Bob")
            .with_student(10, "Ivan")
            .with_student(11, "Olga");
        let first = storage.add_lesson("Math", date(2030, 1, 1), 0);
        let second = storage.add_lesson("Art", date(2030, 1, 2), 1);
        storage.link_teacher(first, 1);
        storage.link_teacher(second, 2);
        storage.link_student(first, 10, true);
        storage.link_student(first, 11, false);
        Arc::new(storage)
    }

    macro_rules! app {
        ($storage:expr) => {{
            let storage: Arc<dyn Storage> = $storage;
            test::init_service(
                App::new()
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(
                        web::JsonConfig::default()
                            .content_type_required(false)
                            .error_handler(json_error_handler),
                    )
                    .app_data(web::Data::new(storage))
                    .configure(configure_lessons_routes)
                    .default_service(web::to(not_found)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_list_returns_bare_array() {
        let app = app!(seeded_storage());
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Math");
        assert_eq!(items[0]["visitCount"], 1);
        assert_eq!(items[0]["teachers"][0]["name"], "Alice");
        assert_eq!(items[1]["students"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_list_with_filters_and_pagination() {
        let app = app!(seeded_storage());

        let req = test::TestRequest::get()
            .uri("/?status=1&teacherIds=2")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Art");

        let req = test::TestRequest::get()
            .uri("/?page=2&lessonsPerPage=1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["title"], "Art");

        let req = test::TestRequest::get()
            .uri("/?teacherIds=99")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_list_invalid_filter_is_bad_request() {
        let app = app!(seeded_storage());
        let req = test::TestRequest::get().uri("/?status=5").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Status is not valid!");
    }

    #[actix_web::test]
    async fn test_create_with_empty_body() {
        let app = app!(seeded_storage());

        let req = test::TestRequest::post().uri("/lessons").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Body is empty!");

        let req = test::TestRequest::post()
            .uri("/lessons")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Body is empty!");
    }

    #[actix_web::test]
    async fn test_create_wrong_field_types_reach_validation() {
        let app = app!(seeded_storage());
        let base = serde_json::json!({
            "title": "Math",
            "teacherIds": [1],
            "days": [0],
            "firstDate": "2049-01-01",
            "lessonsCount": 2
        });

        for (field, value, message) in [
            ("teacherIds", serde_json::json!("1"), "TeacherIds is not array!"),
            ("days", serde_json::json!("monday"), "Days is not array!"),
            ("lessonsCount", serde_json::json!("3"), "lessonsCount is invalid!"),
            ("firstDate", serde_json::json!(20490101), "FirstDate is invalid!"),
        ] {
            let mut payload = base.clone();
            payload[field] = value;
            let req = test::TestRequest::post()
                .uri("/lessons")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "field {field}");
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], message, "field {field}");
        }

        // 首个失败优先：空标题先于类型错误的 teacherIds
        let mut payload = base.clone();
        payload["title"] = serde_json::json!("  ");
        payload["teacherIds"] = serde_json::json!("x");
        let req = test::TestRequest::post()
            .uri("/lessons")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Title is empty!");
    }

    #[actix_web::test]
    async fn test_list_with_huge_page_is_empty() {
        let app = app!(seeded_storage());
        let req = test::TestRequest::get()
            .uri("/?page=9223372036854775807&lessonsPerPage=100")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_create_then_list() {
        let storage = Arc::new(MemoryStorage::new().with_teacher(1, "Alice"));
        let app = app!(storage.clone());

        let req = test::TestRequest::post()
            .uri("/lessons")
            .set_json(serde_json::json!({
                "title": "Chess",
                "teacherIds": [1],
                "days": [0, 1, 2, 3, 4, 5, 6],
                "firstDate": "2049-01-01",
                "lessonsCount": 7
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "OK!");
        assert_eq!(storage.lessons().len(), 7);

        let req = test::TestRequest::get()
            .uri("/?date=2049-01-02,2049-01-04&lessonsPerPage=10")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let dates: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2049-01-02", "2049-01-03", "2049-01-04"]);
    }

    #[actix_web::test]
    async fn test_unknown_routes_are_not_found() {
        let app = app!(seeded_storage());

        let req = test::TestRequest::get().uri("/lessons").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, "Not Found");
    }
}
