use actix_web::http::StatusCode;
use actix_web::test;
use wordsense_backend::infra::state::build_state;

use crate::common::read_json;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert!(body["migrations"].as_str().unwrap().starts_with("m2025"));
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["time"].is_string());
    Ok(())
}

#[actix_web::test]
async fn health_without_db_is_still_up() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_state().build().await?).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].as_str().unwrap().contains("unavailable"));
    assert_eq!(body["migrations"], "unknown");
    Ok(())
}
