//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response and error schemas. The document backs Swagger
//! UI in debug builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::users::{MessageResponse, UserEnvelope, UserPayload};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "JSON CRUD interface over user records plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::server_status,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, UserPayload, UserEnvelope, MessageResponse, Error, ErrorCode)),
    tags(
        (name = "users", description = "User CRUD operations"),
        (name = "status", description = "Server status check"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
