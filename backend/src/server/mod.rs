//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::make_metrics;
pub use state_builders::connect_database;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_service::Trace;
#[cfg(debug_assertions)]
use user_service::doc::ApiDoc;
use user_service::inbound::http::health::{HealthState, live, ready};
use user_service::inbound::http::state::HttpState;
use user_service::inbound::http::users;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(ready)
        .service(live)
        .configure(users::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(Trace).wrap(Cors::permissive())
}

/// Construct an Actix HTTP server for `config`.
///
/// Marks `health_state` ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        host,
        port,
        db_pool,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let backend = if db_pool.is_some() { "postgres" } else { "memory" };
    let http_state = web::Data::new(build_http_state(db_pool));

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind((host.as_str(), port))?
    .run();

    info!(%host, port, backend, "user service listening");
    health_state.mark_ready();
    Ok(server)
}
