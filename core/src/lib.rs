//! Synchronous client core for the Harvest user assignment API.
//!
//! # Overview
//! Builds `HttpRequest` values and interprets `HttpResponse` values; a
//! `Transport` performs the round trip in between. `UreqTransport` is the
//! blocking transport shipped with the crate, tests use the mock server.
//!
//! # Design
//! - `HarvestClient` is stateless; it holds only a `ClientConfig`.
//! - Each operation is split into `build_*` and `parse_*`, and a convenience
//!   method runs both through a transport exactly once. Nothing is retried.
//! - Non-2xx statuses become `ApiError::Http`, except for delete, which
//!   reports `true` only when the status is exactly 200.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod user_assignments;

pub use client::HarvestClient;
pub use config::ClientConfig;
pub use error::{ApiError, BoxedError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use rust_decimal::Decimal;
pub use types::{UserAssignment, UserAssignmentCreateOptions, UserAssignmentOptions, UserAssignmentUpdate};
