use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::claims::Claims;
use crate::db::require_db;
use crate::error::AppError;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;

/// Authenticated caller, provisioned in the users table on first sight.
///
/// Requires `JwtExtract` to have placed verified [`Claims`] in the request
/// extensions.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub email: Option<String>,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(AppError::unauthorized_missing_bearer)?;
            let app_state =
                app_state.ok_or_else(|| AppError::internal("AppState not available"))?;
            let db = require_db(&app_state)?;

            let user = ensure_user(db, &claims.sub, claims.email.as_deref()).await?;

            Ok(CurrentUser {
                id: user.id,
                sub: claims.sub,
                email: claims.email.or(user.email),
            })
        })
    }
}
