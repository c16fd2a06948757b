use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem;
use backend_test_support::unique_helpers::{unique_email, unique_sub};
use serde_json::{json, Value};

use crate::common::read_json;
use crate::support::auth::bearer_header;
use crate::support::{build_test_state, create_test_app, test_security};

struct Caller {
    header: (&'static str, String),
}

impl Caller {
    fn new(prefix: &str) -> Self {
        Self {
            header: (
                "Authorization",
                bearer_header(&unique_sub(prefix), &unique_email(prefix), &test_security()),
            ),
        }
    }
}

macro_rules! call {
    ($app:expr, $req:expr) => {
        test::call_service(&$app, $req.to_request()).await
    };
}

fn names(decks: &Value) -> Vec<String> {
    decks
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["deck_name"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn create_list_delete_round() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let me = Caller::new("decks");

    // whitespace-only name never reaches the store
    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/decks")
            .insert_header(me.header.clone())
            .set_json(json!({ "deck_name": "   " }))
    );
    assert_problem(resp, "INVALID_DECK_NAME", StatusCode::BAD_REQUEST).await;

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri("/api/decks")
            .insert_header(me.header.clone())
    );
    assert_eq!(read_json(resp).await, json!([]));

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/decks")
            .insert_header(me.header.clone())
            .set_json(json!({ "deck_name": "  Tournament " }))
    );
    assert_eq!(resp.status(), StatusCode::CREATED);
    let deck = read_json(resp).await;
    assert_eq!(deck["deck_name"], "Tournament");
    assert!(deck.get("user_id").is_none());
    assert!(deck["created_at"].is_string());
    let deck_id = deck["id"].as_i64().unwrap();

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri("/api/decks")
            .insert_header(me.header.clone())
    );
    assert_eq!(names(&read_json(resp).await), ["Tournament"]);

    let resp = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/decks/{deck_id}"))
            .insert_header(me.header.clone())
    );
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri("/api/decks")
            .insert_header(me.header.clone())
    );
    assert_eq!(read_json(resp).await, json!([]));

    // second delete: already gone
    let resp = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/decks/{deck_id}"))
            .insert_header(me.header.clone())
    );
    assert_problem(resp, "DECK_NOT_FOUND", StatusCode::NOT_FOUND).await;
    Ok(())
}

#[actix_web::test]
async fn decks_are_listed_in_creation_order_and_names_may_repeat(
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let me = Caller::new("order");

    for name in ["Beta", "Alpha", "Beta"] {
        let resp = call!(
            app,
            test::TestRequest::post()
                .uri("/api/decks")
                .insert_header(me.header.clone())
                .set_json(json!({ "deck_name": name }))
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri("/api/decks")
            .insert_header(me.header.clone())
    );
    assert_eq!(names(&read_json(resp).await), ["Beta", "Alpha", "Beta"]);
    Ok(())
}

#[actix_web::test]
async fn decks_are_private_to_their_owner() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let owner = Caller::new("owner");
    let other = Caller::new("other");

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/decks")
            .insert_header(owner.header.clone())
            .set_json(json!({ "deck_name": "Mine" }))
    );
    let deck_id = read_json(resp).await["id"].as_i64().unwrap();

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri("/api/decks")
            .insert_header(other.header.clone())
    );
    assert_eq!(read_json(resp).await, json!([]));

    let resp = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/decks/{deck_id}"))
            .insert_header(other.header.clone())
    );
    assert_problem(resp, "DECK_NOT_FOUND", StatusCode::NOT_FOUND).await;

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri("/api/decks")
            .insert_header(owner.header.clone())
    );
    assert_eq!(names(&read_json(resp).await), ["Mine"]);
    Ok(())
}

#[actix_web::test]
async fn deck_input_validation() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let me = Caller::new("invalid");

    for raw in ["abc", "0", "-3", "1.5"] {
        let resp = call!(
            app,
            test::TestRequest::delete()
                .uri(&format!("/api/decks/{raw}"))
                .insert_header(me.header.clone())
        );
        assert_problem(resp, "INVALID_DECK_ID", StatusCode::BAD_REQUEST).await;
    }

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/decks")
            .insert_header(me.header.clone())
            .set_json(json!({ "deck_name": "x".repeat(51) }))
    );
    assert_problem(resp, "INVALID_DECK_NAME", StatusCode::BAD_REQUEST).await;

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/decks")
            .insert_header(me.header.clone())
            .set_json(json!({ "name": "wrong field" }))
    );
    assert_problem(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST).await;
    Ok(())
}
