//! HTTP middleware applied by [`create_router`](crate::server::create_router).
//!
//! Layer order, outermost first: compression, CORS, security headers,
//! tracing, request context, JSON content-type guard, panic catcher.

pub mod content_type;
pub mod cors;
pub mod panic;
pub mod request_context;
pub mod security;

pub use content_type::require_json_content_type;
pub use cors::{create_cors_layer, create_permissive_cors_layer};
pub use panic::panic_response;
pub use request_context::{REQUEST_ID_HEADER, RequestContext, request_context};
pub use security::security_headers;
