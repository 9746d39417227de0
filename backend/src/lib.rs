//! User service library.
//!
//! A JSON HTTP service managing user records, laid out as a hexagon:
//! [`domain`] holds the model, service and ports; [`inbound`] adapts HTTP
//! onto the driving ports; [`outbound`] implements the repository port for
//! PostgreSQL and for process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
