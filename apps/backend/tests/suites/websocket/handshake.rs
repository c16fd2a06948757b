use std::time::Duration;

use backend_test_support::unique_helpers::{unique_email, unique_sub};
use serde_json::json;

use crate::support::auth::mint_test_token;
use crate::support::build_test_state;
use crate::support::websocket::{start_test_server, wait_for_connections};
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn hello_ack_carries_protocol_and_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let registry = state.live_queries();
    let token = mint_test_token(&unique_sub("ws"), &unique_email("ws"), &state.security);
    let server = start_test_server(state).await?;

    let mut client = WebSocketClient::connect_retry(&server.ws_url(&token), Duration::from_secs(2)).await?;
    wait_for_connections(&registry, 1, Duration::from_secs(2)).await?;

    let ack = client.hello().await?;
    assert_eq!(ack["type"], "hello_ack");
    assert_eq!(ack["protocol"], 1);
    assert!(ack["user_id"].as_i64().unwrap() > 0);

    client.close().await?;
    wait_for_connections(&registry, 0, Duration::from_secs(2)).await?;
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn subscribe_before_hello_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let token = mint_test_token(&unique_sub("ws"), &unique_email("ws"), &state.security);
    let server = start_test_server(state).await?;

    let mut client = WebSocketClient::connect_retry(&server.ws_url(&token), Duration::from_secs(2)).await?;
    client
        .send_json(&json!({ "type": "subscribe", "topic": { "kind": "decks" } }))
        .await?;

    let err = client.expect_json().await?;
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "bad_request");
    assert!(client.recv_json().await?.is_none(), "socket should close");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn unsupported_protocol_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let token = mint_test_token(&unique_sub("ws"), &unique_email("ws"), &state.security);
    let server = start_test_server(state).await?;

    let mut client = WebSocketClient::connect_retry(&server.ws_url(&token), Duration::from_secs(2)).await?;
    client.send_json(&json!({ "type": "hello", "protocol": 99 })).await?;

    let err = client.expect_json().await?;
    assert_eq!(err["code"], "bad_protocol");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn upgrade_without_token_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(build_test_state().await?).await?;

    let url = format!("ws://{}/api/ws", server.addr);
    let result = tokio_tungstenite::connect_async(url).await;
    match result {
        Err(tokio_tungstenite::tungstenite::Error::Http(resp)) => {
            assert_eq!(resp.status().as_u16(), 401);
        }
        other => panic!("expected HTTP 401, got {other:?}"),
    }

    server.stop().await;
    Ok(())
}
