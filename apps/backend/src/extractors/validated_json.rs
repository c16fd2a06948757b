use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::web::Bytes;
use actix_web::{FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Largest request body accepted by JSON endpoints.
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

/// JSON body extractor whose failures render as problem details
/// (`BAD_REQUEST`) instead of actix's plain-text JSON errors.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = Bytes::from_request(req, payload);

        Box::pin(async move {
            let body = body.await.map_err(|e| {
                debug!(trace_id = %trace_ctx::trace_id(), error = %e, "Request body unreadable");
                AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
            })?;
            parse_body(&body).map(ValidatedJson)
        })
    }
}

/// Parse a JSON body into `T`, mapping failures to sanitized `BAD_REQUEST` errors.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.len() > MAX_JSON_BODY_BYTES {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "Request body too large",
        ));
    }
    serde_json::from_slice(body).map_err(|e| {
        debug!(
            trace_id = %trace_ctx::trace_id(),
            error = %Redacted(&e.to_string()),
            body_size = body.len(),
            "JSON body rejected"
        );
        let detail = match e.classify() {
            Category::Syntax => format!("Invalid JSON at line {}", e.line()),
            Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
            Category::Data => "Invalid JSON: missing or mistyped fields".to_string(),
            Category::Io => "Invalid JSON: could not read body".to_string(),
        };
        AppError::bad_request(ErrorCode::BadRequest, detail)
    })
}
