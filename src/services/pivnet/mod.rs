//! Pivotal Network API access.
//!
//! - `client`: release, product file and user group queries
//! - `transport`: request sending, with a `reqwest` implementation
//! - `error`: error taxonomy shared by both

mod client;
mod error;
mod transport;

pub use client::PivnetClient;
pub use error::PivnetError;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, PivnetTransport, API_PREFIX};
