//! Bearer-token gate for the `/api` scope.
//!
//! Reads the token from `Authorization: Bearer <jwt>`, falling back to the
//! `token` query parameter for WebSocket upgrades (browsers cannot set headers
//! there). Verified [`Claims`] land in request extensions for `CurrentUser`.

use std::collections::HashMap;
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::Claims;
use crate::auth::jwt::verify_access_token_refreshing;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // Errors are rendered inside the future so the problem body carries
        // the request's trace id.
        Box::pin(async move {
            match authenticate(&req).await {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    Ok(service.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let token = match bearer_from_header(req.headers().get(header::AUTHORIZATION))? {
        Some(token) => token,
        None => token_from_query(req.query_string())
            .ok_or_else(AppError::unauthorized_missing_bearer)?,
    };

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    verify_access_token_refreshing(&token, &app_state.security).await
}

/// `Ok(None)` when the header is absent; malformed values are rejected.
fn bearer_from_header(value: Option<&HeaderValue>) -> Result<Option<String>, AppError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(Some(token.to_string())),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

fn token_from_query(query: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    web::Query::<HashMap<String, String>>::from_query(query)
        .ok()?
        .get("token")
        .filter(|t| !t.is_empty())
        .cloned()
}
