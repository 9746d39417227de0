//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed user model, the transport-agnostic
//! error taxonomy and the ports separating the domain from its adapters.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: domain failure payload and stable code.
//! - `User`, `UserDraft`, `UserId`, `UserName`, `EmailAddress`: user model.
//! - `UserService`: implementation of the user driving ports.
//! - `TraceId`: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, NAME_MAX, User, UserDraft, UserId, UserName, UserValidationError,
};
pub use self::user_service::{USER_NOT_FOUND_MESSAGE, UserService};
