//! Configuration models.
//!
//! - `client_config`: endpoint, token and user agent for the API client
//! - `harness_config`: environment-driven settings of an acceptance run
//! - `error`: configuration errors

mod client_config;
mod error;
mod harness_config;

pub use client_config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::ConfigError;
pub use harness_config::{
	HarnessConfig, HARNESS_USER_AGENT, SANITIZED_API_TOKEN, SANITIZED_AWS_ACCESS_KEY_ID,
	SANITIZED_AWS_SECRET_ACCESS_KEY,
};
