use std::collections::HashSet;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem;
use backend_test_support::unique_helpers::{unique_email, unique_sub};
use serde_json::{json, Value};

use crate::common::read_json;
use crate::support::auth::bearer_header;
use crate::support::{build_empty_state, build_test_state, create_test_app, test_security};

fn auth() -> (&'static str, String) {
    (
        "Authorization",
        bearer_header(&unique_sub("cards"), &unique_email("cards"), &test_security()),
    )
}

fn ids(cards: &Value) -> Vec<i64> {
    cards
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["id"].as_i64().expect("id"))
        .collect()
}

#[actix_web::test]
async fn legendary_lists_every_card_in_id_order() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::get()
        .uri("/api/cards/legendary")
        .insert_header(auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cards = read_json(resp).await;
    let list = cards.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert!(list.iter().all(|c| c["rarity"] == "legendary" && c["label"] == "極"));
    assert_eq!(list[0]["text"], "神");
    assert_eq!(list[0]["card_number"], "1");

    let ids = ids(&cards);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[actix_web::test]
async fn legendary_is_empty_on_an_empty_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_empty_state().await?).build().await;

    let req = test::TestRequest::get()
        .uri("/api/cards/legendary")
        .insert_header(auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(read_json(resp).await, json!([]));
    Ok(())
}

#[actix_web::test]
async fn tier_pages_cover_the_tier_exactly_once() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let header = auth();

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    loop {
        let uri = match &cursor {
            Some(c) => format!("/api/cards/tier/common?num_items=5&cursor={c}"),
            None => "/api/cards/tier/common?num_items=5".to_string(),
        };
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(header.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        pages += 1;

        let page = &body["page"];
        assert!(page.as_array().unwrap().iter().all(|c| c["rarity"] == "common"));
        seen.extend(ids(page));

        if body["is_done"].as_bool().unwrap() {
            assert!(body["continue_cursor"].is_null());
            break;
        }
        cursor = Some(body["continue_cursor"].as_str().unwrap().to_string());
        assert!(pages < 10, "pagination did not terminate");
    }

    assert_eq!(pages, 3);
    assert_eq!(seen.len(), 14);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 14);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[actix_web::test]
async fn page_that_exactly_fills_the_tier_is_done() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::get()
        .uri("/api/cards/tier/epic?num_items=4")
        .insert_header(auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["page"].as_array().unwrap().len(), 4);
    assert_eq!(body["is_done"], true);
    assert!(body["continue_cursor"].is_null());
    Ok(())
}

#[actix_web::test]
async fn tier_request_validation() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let header = auth();

    let cases = [
        ("/api/cards/tier/legendary?num_items=5", "RARITY_NOT_PAGINATED"),
        ("/api/cards/tier/mythic?num_items=5", "INVALID_RARITY"),
        ("/api/cards/tier/rare?num_items=0", "INVALID_PAGE_SIZE"),
        ("/api/cards/tier/rare?num_items=101", "INVALID_PAGE_SIZE"),
        ("/api/cards/tier/rare?num_items=abc", "INVALID_PAGE_SIZE"),
        ("/api/cards/tier/rare", "INVALID_PAGE_SIZE"),
        ("/api/cards/tier/rare?num_items=2&cursor=%25%25", "INVALID_CURSOR"),
    ];

    for (uri, code) in cases {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(header.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, code, StatusCode::BAD_REQUEST).await;
    }
    Ok(())
}

#[actix_web::test]
async fn cursor_from_another_tier_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let header = auth();

    let req = test::TestRequest::get()
        .uri("/api/cards/tier/rare?num_items=2")
        .insert_header(header.clone())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let rare_cursor = body["continue_cursor"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/cards/tier/common?num_items=2&cursor={rare_cursor}"))
        .insert_header(header)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, "INVALID_CURSOR", StatusCode::BAD_REQUEST).await;
    Ok(())
}

#[actix_web::test]
async fn lookup_collapses_duplicates_and_omits_misses() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/cards/lookup")
        .insert_header(auth())
        .set_json(json!({
            "requests": [
                { "rarity": "rare", "index": 2 },
                { "rarity": "common", "index": 1 },
                { "rarity": "rare", "index": 2 },
                { "rarity": "epic", "index": 99 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cards = read_json(resp).await;
    let list = cards.as_array().unwrap();
    assert_eq!(list.len(), 2);
    // id order, not request order
    assert_eq!(list[0]["rarity"], "common");
    assert_eq!(list[0]["text"], "山");
    assert_eq!(list[1]["rarity"], "rare");
    assert_eq!(list[1]["card_number"], "2");
    assert_eq!(list[1]["label"], "良");
    Ok(())
}

#[actix_web::test]
async fn lookup_empty_and_invalid_requests() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let header = auth();

    let req = test::TestRequest::post()
        .uri("/api/cards/lookup")
        .insert_header(header.clone())
        .set_json(json!({ "requests": [] }))
        .to_request();
    assert_eq!(read_json(test::call_service(&app, req).await).await, json!([]));

    let req = test::TestRequest::post()
        .uri("/api/cards/lookup")
        .insert_header(header.clone())
        .set_json(json!({ "requests": [{ "rarity": "mythic", "index": 1 }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, "INVALID_RARITY", StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::post()
        .uri("/api/cards/lookup")
        .insert_header(header)
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"requests\": [")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST).await;
    Ok(())
}

#[actix_web::test]
async fn rarity_table_is_in_tier_order() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::get()
        .uri("/api/cards/rarities")
        .insert_header(auth())
        .to_request();
    let table = read_json(test::call_service(&app, req).await).await;
    let rows = table.as_array().unwrap();

    let names: Vec<_> = rows.iter().map(|r| r["rarity"].as_str().unwrap()).collect();
    assert_eq!(names, ["common", "rare", "super_rare", "epic", "legendary"]);
    assert_eq!(rows[4]["paginated"], false);
    assert_eq!(rows[0]["label"], "並");
    assert_eq!(rows[3]["style"]["animated"], true);
    Ok(())
}
