use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::{unique_email, unique_sub};

use crate::common::read_json;
use crate::support::auth::bearer_header;
use crate::support::{build_test_state, create_test_app, test_security};

#[actix_web::test]
async fn collection_joins_mock_records_to_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::get()
        .uri("/api/collection")
        .insert_header((
            "Authorization",
            bearer_header(&unique_sub("coll"), &unique_email("coll"), &test_security()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    let owned = body.as_array().unwrap();
    // uc_0008 points outside the catalog
    assert_eq!(owned.len(), 7);
    assert!(owned.iter().all(|o| o["user_card_id"] != "uc_0008"));

    let two = owned.iter().find(|o| o["user_card_id"] == "uc_0002").unwrap();
    let three = owned.iter().find(|o| o["user_card_id"] == "uc_0003").unwrap();
    assert_eq!(two["card"]["id"], three["card"]["id"]);
    assert_eq!(two["is_locked"], false);
    assert_eq!(three["is_locked"], true);
    assert_eq!(two["card"]["text"], "空");
    Ok(())
}
