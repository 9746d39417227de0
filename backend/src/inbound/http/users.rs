//! User CRUD handlers.
//!
//! ```text
//! GET    /test
//! POST   /api/flask/users        {"name":"ada","email":"ada@example.com"}
//! GET    /api/flask/users
//! GET    /api/flask/users/{id}
//! PUT    /api/flask/users/{id}   {"name":"ada","email":"ada@example.com"}
//! DELETE /api/flask/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_config, path_config};
use crate::inbound::http::state::HttpState;

/// Prefix shared by the user routes.
pub const USERS_SCOPE: &str = "/api/flask";

const SERVER_RUNNING: &str = "The server is running!";
const USER_UPDATED: &str = "User updated.";
const USER_DELETED: &str = "User deleted.";

/// Request body for create and update.
///
/// Fields are optional at the wire level so a missing field yields a
/// `missing_field` validation error rather than a generic parse failure.
/// Unknown fields are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserPayload {
    #[schema(example = "Ada Lovelace", max_length = 80)]
    pub name: Option<String>,
    #[schema(example = "ada@example.com", max_length = 120)]
    pub email: Option<String>,
}

/// `{"user": User}` wrapper returned by get-by-id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: User,
}

/// Plain confirmation body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User updated.")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}"))
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match &err {
        UserValidationError::InvalidId => ("id", "invalid_id"),
        UserValidationError::EmptyName => ("name", "empty_name"),
        UserValidationError::NameTooLong { .. } => ("name", "name_too_long"),
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::EmailTooLong { .. } => ("email", "email_too_long"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

impl TryFrom<UserPayload> for UserDraft {
    type Error = Error;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        let name = value.name.ok_or_else(|| missing_field_error("name"))?;
        let email = value.email.ok_or_else(|| missing_field_error("email"))?;
        UserDraft::try_from_strings(name, email).map_err(map_user_validation_error)
    }
}

fn parse_user_id(raw: i32) -> Result<UserId, Error> {
    UserId::new(raw).map_err(map_user_validation_error)
}

/// Report that the server is up.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Server is running", body = MessageResponse)),
    tags = ["status"],
    operation_id = "serverStatus"
)]
#[get("/test")]
pub async fn server_status() -> web::Json<MessageResponse> {
    web::Json(MessageResponse::new(SERVER_RUNNING))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/flask/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Name or email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(user))
}

/// List every user ordered by id.
#[utoipa::path(
    get,
    path = "/api/flask/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/flask/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserEnvelope),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users_query.find_user(id).await?;
    Ok(web::Json(UserEnvelope { user }))
}

/// Overwrite a user's name and email.
#[utoipa::path(
    put,
    path = "/api/flask/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 409, description = "Name or email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_user_id(path.into_inner())?;
    let draft = UserDraft::try_from(payload.into_inner())?;
    state.users_command.update_user(id, draft).await?;
    Ok(web::Json(MessageResponse::new(USER_UPDATED)))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/flask/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_user_id(path.into_inner())?;
    state.users_command.delete_user(id).await?;
    Ok(web::Json(MessageResponse::new(USER_DELETED)))
}

/// Register the status route and the user scope.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use user_service::inbound::http::state::HttpState;
/// use user_service::inbound::http::users::configure;
/// use user_service::outbound::memory::InMemoryUserRepository;
///
/// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
/// let _app = App::new().app_data(web::Data::new(state)).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(server_status).service(
        web::scope(USERS_SCOPE)
            .app_data(json_config())
            .app_data(path_config())
            .service(create_user)
            .service(list_users)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    );
}
