use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const RECV_TIMEOUT: Duration = Duration::from_secs(3);

type BoxError = Box<dyn std::error::Error>;

pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Retry until the server accepts, since it may still be binding.
    pub async fn connect_retry(url: &str, timeout: Duration) -> Result<Self, BoxError> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) if start.elapsed() >= timeout => return Err(Box::new(err)),
                Err(_) => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        }
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), BoxError> {
        self.stream.send(Message::Text(value.to_string().into())).await?;
        Ok(())
    }

    /// Next text frame as JSON, skipping pings. `None` once the socket closes.
    pub async fn recv_json(&mut self) -> Result<Option<Value>, BoxError> {
        loop {
            let next = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .map_err(|_| "timed out waiting for a frame")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(serde_json::from_str(text.as_str())?)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(Box::new(e)),
            }
        }
    }

    /// Expect another frame; fail if the socket closed instead.
    pub async fn expect_json(&mut self) -> Result<Value, BoxError> {
        self.recv_json()
            .await?
            .ok_or_else(|| "socket closed".into())
    }

    /// `true` if nothing arrives within `wait`.
    pub async fn is_quiet(&mut self, wait: Duration) -> bool {
        loop {
            match tokio::time::timeout(wait, self.stream.next()).await {
                Err(_) => return true,
                Ok(Some(Ok(Message::Ping(_)))) | Ok(Some(Ok(Message::Pong(_)))) => continue,
                Ok(_) => return false,
            }
        }
    }

    pub async fn hello(&mut self) -> Result<Value, BoxError> {
        self.send_json(&json!({ "type": "hello", "protocol": 1 })).await?;
        self.expect_json().await
    }

    /// Subscribe to the caller's decks; returns `(ack, first decks frame)`.
    pub async fn subscribe_decks(&mut self) -> Result<(Value, Value), BoxError> {
        self.send_json(&json!({ "type": "subscribe", "topic": { "kind": "decks" } }))
            .await?;
        let ack = self.expect_json().await?;
        let decks = self.expect_json().await?;
        Ok((ack, decks))
    }

    pub async fn close(&mut self) -> Result<(), BoxError> {
        self.stream.close(None).await?;
        Ok(())
    }
}
