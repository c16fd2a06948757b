use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::decks::Deck;
use crate::services::decks as deck_service;
use crate::state::app_state::AppState;
use crate::ws::hub::{HubEvent, LiveQueryRegistry};
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, Topic, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// `GET /api/ws` upgrade. The bearer token was already checked by `JwtExtract`.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), current_user, app_state);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    user_id: i64,
    app_state: web::Data<AppState>,
    registry: Arc<LiveQueryRegistry>,
    last_heartbeat: Instant,
    hello_done: bool,
    /// Bumped per deck fetch so a slow, older result never overwrites a newer one.
    deck_fetch_seq: u64,
}

impl WsSession {
    fn new(conn_id: Uuid, current_user: CurrentUser, app_state: web::Data<AppState>) -> Self {
        let registry = app_state.live_queries();
        Self {
            conn_id,
            user_id: current_user.id,
            app_state,
            registry,
            last_heartbeat: Instant::now(),
            hello_done: false,
            deck_fetch_seq: 0,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.into(),
            },
        );
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    user_id = actor.user_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Load the user's decks and push them, unless a newer fetch started meanwhile.
    fn push_decks(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        self.deck_fetch_seq += 1;
        let seq = self.deck_fetch_seq;
        let app_state = self.app_state.clone();
        let user_id = self.user_id;

        ctx.spawn(
            async move {
                let db = require_db(&app_state)?;
                deck_service::list_decks(db, user_id).await
            }
            .into_actor(self)
            .map(move |res: Result<Vec<Deck>, AppError>, actor, ctx| match res {
                Ok(decks) => {
                    if seq == actor.deck_fetch_seq
                        && actor.registry.is_subscribed(actor.conn_id, &Topic::Decks)
                    {
                        Self::send_json(
                            ctx,
                            &ServerMsg::Decks {
                                topic: Topic::Decks,
                                decks,
                            },
                        );
                    }
                }
                Err(err) => {
                    error!(
                        error = %err,
                        conn_id = %actor.conn_id,
                        user_id = actor.user_id,
                        "[WS SESSION] deck query failed"
                    );
                    Self::send_error_and_close(ctx, ErrorCode::Internal, "Deck query failed");
                }
            }),
        );
    }

    fn handle_client_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    Self::send_error_and_close(
                        ctx,
                        ErrorCode::BadProtocol,
                        "Unsupported protocol version",
                    );
                    return;
                }
                self.hello_done = true;
                Self::send_json(
                    ctx,
                    &ServerMsg::HelloAck {
                        protocol: PROTOCOL_VERSION,
                        user_id: self.user_id,
                    },
                );
            }
            ClientMsg::Subscribe { topic } => {
                if !self.hello_done {
                    Self::send_error_and_close(ctx, ErrorCode::BadRequest, "Must send hello first");
                    return;
                }
                self.registry.subscribe(self.conn_id, topic);
                Self::send_json(
                    ctx,
                    &ServerMsg::Ack {
                        message: "subscribed",
                    },
                );
                match topic {
                    Topic::Decks => self.push_decks(ctx),
                }
            }
            ClientMsg::Unsubscribe { topic } => {
                if !self.hello_done {
                    Self::send_error_and_close(ctx, ErrorCode::BadRequest, "Must send hello first");
                    return;
                }
                self.registry.unsubscribe(self.conn_id, &topic);
                Self::send_json(
                    ctx,
                    &ServerMsg::Ack {
                        message: "unsubscribed",
                    },
                );
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, user_id = self.user_id, "[WS SESSION] started");
        let recipient = ctx.address().recipient::<HubEvent>();
        self.registry
            .register_connection(self.user_id, self.conn_id, recipient);
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.registry.unregister_connection(self.conn_id);
        info!(conn_id = %self.conn_id, user_id = self.user_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(_) => {
                        Self::send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed message")
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    user_id = self.user_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<HubEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: HubEvent, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            HubEvent::DecksChanged => self.push_decks(ctx),
        }
    }
}
