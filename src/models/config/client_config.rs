//! Connection settings for the Pivotal Network API client.

use std::collections::HashMap;
use url::Url;

use crate::models::{config::error::ConfigError, security::SecretString};

/// Default Pivotal Network endpoint
pub const DEFAULT_ENDPOINT: &str = "https://network.pivotal.io";

/// Settings needed to talk to the distribution service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL of the service, without the `/api/v2` suffix
	pub endpoint: String,
	/// API token sent as `Authorization: Token <token>`
	pub token: SecretString,
	/// Value of the `User-Agent` header
	pub user_agent: String,
}

impl ClientConfig {
	pub fn new(endpoint: impl Into<String>, token: impl Into<SecretString>) -> Self {
		Self {
			endpoint: endpoint.into(),
			token: token.into(),
			user_agent: default_user_agent(),
		}
	}

	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();
		self
	}

	/// Checks that every setting is present and the endpoint is an http(s) URL.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.endpoint.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Endpoint must be provided",
				Some(HashMap::from([(
					"field".to_string(),
					"endpoint".to_string(),
				)])),
			));
		}

		if self.token.is_blank() {
			return Err(ConfigError::validation_error(
				"API token must be provided",
				Some(HashMap::from([("field".to_string(), "token".to_string())])),
			));
		}

		let url = Url::parse(&self.endpoint)?;
		if url.scheme() != "http" && url.scheme() != "https" {
			return Err(ConfigError::validation_error(
				format!("Endpoint scheme must be http or https, got {}", url.scheme()),
				Some(HashMap::from([(
					"endpoint".to_string(),
					self.endpoint.clone(),
				)])),
			));
		}

		Ok(())
	}

	/// Endpoint without trailing slashes
	pub fn base_url(&self) -> &str {
		self.endpoint.trim_end_matches('/')
	}
}

fn default_user_agent() -> String {
	format!("pivnet-resource/{}", env!("CARGO_PKG_VERSION"))
}
