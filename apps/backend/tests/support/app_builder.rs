use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use wordsense_backend::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use wordsense_backend::routes;
use wordsense_backend::AppState;

/// Test service wired like `main.rs` (minus CORS and the socket listener).
pub struct TestAppBuilder {
    state: AppState,
}

impl TestAppBuilder {
    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        test::init_service(
            App::new()
                .wrap(SecurityHeaders)
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(web::Data::new(self.state))
                .configure(routes::configure),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder { state }
}
