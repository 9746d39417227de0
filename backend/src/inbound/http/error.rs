//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while turning failures into a
//! consistent JSON envelope and status code. Extractor failures (malformed
//! JSON bodies, non-integer path segments) are routed through the same
//! envelope as `invalid_request`.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

fn json_payload_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => {
            Error::invalid_request("request body must be application/json")
                .with_details(json!({ "code": "unsupported_content_type" }))
        }
        JsonPayloadError::Overflow { limit }
        | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            Error::invalid_request(format!("request body exceeds {limit} bytes"))
                .with_details(json!({ "code": "payload_too_large" }))
        }
        JsonPayloadError::Deserialize(source) => Error::invalid_request("malformed JSON body")
            .with_details(json!({ "code": "malformed_json", "reason": source.to_string() })),
        other => Error::invalid_request("unreadable request body")
            .with_details(json!({ "code": "malformed_json", "reason": other.to_string() })),
    }
}

/// JSON extractor configuration producing `invalid_request` envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        debug!(path = req.path(), error = %err, "rejected JSON body");
        json_payload_error(&err).into()
    })
}

/// Path extractor configuration producing `invalid_request` envelopes.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, req: &HttpRequest| {
        debug!(path = req.path(), error = %err, "rejected path parameters");
        Error::invalid_request("user id must be an integer")
            .with_details(json!({ "field": "id", "code": "invalid_id" }))
            .into()
    })
}
