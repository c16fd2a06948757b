use actix_web::web;

use crate::middleware::JwtExtract;

pub mod cards;
pub mod collection;
pub mod decks;
pub mod health;
pub mod realtime;

/// Register every route. `/api/**` sits behind `JwtExtract`; `/health` is public.
///
/// `main.rs` adds the cross-cutting middleware (tracing, logging, CORS,
/// security headers) around this; tests mount it bare.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api")
            .wrap(JwtExtract)
            .service(web::scope("/cards").configure(cards::configure_routes))
            .service(web::scope("/decks").configure(decks::configure_routes))
            .service(web::scope("/collection").configure(collection::configure_routes))
            .service(web::scope("/ws").configure(realtime::configure_routes)),
    );
}
