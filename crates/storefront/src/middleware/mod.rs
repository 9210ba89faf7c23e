//! HTTP middleware stack for the gallery page.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request span with an empty `request_id` field)
//! 3. Request ID (fills the span field, tags Sentry, echoes the header)
//! 4. `Cache-Control: no-store` (the page reflects live state)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
