//! Shared building blocks for camview.
//!
//! Leaf crate with no knowledge of the backend API. It holds the pieces every
//! other crate needs to agree on:
//!
//! - [`ErrorLocation`]: call-site capture embedded in every error variant
//! - [`HttpStatusCode`]: numeric status kept on HTTP-derived errors
//! - [`RedactedToken`]: bearer token that never shows up in logs
//!
//! ## Architecture
//!
//! - **common** (this crate): shared value types
//! - **camview-core**: session, guard, live channels, backend API
//! - **camview**: terminal application wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
