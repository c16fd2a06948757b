use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem;

use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn responses_carry_request_id_and_security_headers() -> Result<(), Box<dyn std::error::Error>>
{
    let app = create_test_app(build_test_state().await?).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let headers = resp.headers();
    assert!(headers.get("x-request-id").is_some());
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");
    Ok(())
}

#[actix_web::test]
async fn problem_trace_id_matches_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/decks").to_request()).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()?
        .to_string();

    let problem = assert_problem(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED).await;
    assert_eq!(problem.trace_id, request_id);
    assert_ne!(problem.trace_id, "unknown");
    Ok(())
}
