//! Environment-driven configuration for the acceptance harness.
//!
//! Every variable is required. A missing or empty variable is reported as a
//! [`ConfigError::ValidationError`] naming the variable, and the harness is
//! expected to abort setup.

use std::{collections::HashMap, path::PathBuf};

use crate::{
	models::{
		config::{client_config::ClientConfig, error::ConfigError},
		security::SecretString,
	},
	services::sanitizer::SecretMapping,
};

/// User agent the harness presents for out-of-band API calls
pub const HARNESS_USER_AGENT: &str = "pivnet-resource/integration-test";

pub const SANITIZED_API_TOKEN: &str = "***sanitized-api-token***";
pub const SANITIZED_AWS_ACCESS_KEY_ID: &str = "***sanitized-aws-access-key-id***";
pub const SANITIZED_AWS_SECRET_ACCESS_KEY: &str = "***sanitized-aws-secret-access-key***";

/// Settings for an acceptance run against a live Pivotal Network
#[derive(Debug, Clone)]
pub struct HarnessConfig {
	pub product_slug: String,
	pub api_token: SecretString,
	pub aws_access_key_id: SecretString,
	pub aws_secret_access_key: SecretString,
	pub region: String,
	pub bucket_name: String,
	pub s3_filepath_prefix: String,
	pub endpoint: String,
	/// Location of the `s3-out` helper that the out executable shells out to
	pub s3_out_location: PathBuf,
}

impl HarnessConfig {
	/// Loads the configuration from the process environment
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads the configuration through an arbitrary variable lookup
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let require = |name: &str| -> Result<String, ConfigError> {
			match lookup(name) {
				Some(value) if !value.trim().is_empty() => Ok(value),
				_ => Err(ConfigError::validation_error(
					format!("${} must be provided", name),
					Some(HashMap::from([("variable".to_string(), name.to_string())])),
				)),
			}
		};

		Ok(Self {
			product_slug: require("PRODUCT_SLUG")?,
			api_token: require("API_TOKEN")?.into(),
			aws_access_key_id: require("AWS_ACCESS_KEY_ID")?.into(),
			aws_secret_access_key: require("AWS_SECRET_ACCESS_KEY")?.into(),
			region: require("PIVNET_S3_REGION")?,
			bucket_name: require("PIVNET_BUCKET_NAME")?,
			s3_filepath_prefix: require("S3_FILEPATH_PREFIX")?,
			endpoint: require("PIVNET_ENDPOINT")?,
			s3_out_location: PathBuf::from(require("S3_OUT_LOCATION")?),
		})
	}

	/// Client settings for out-of-band API operations
	pub fn client_config(&self) -> ClientConfig {
		ClientConfig::new(self.endpoint.clone(), self.api_token.clone())
			.with_user_agent(HARNESS_USER_AGENT)
	}

	/// Secrets that must never reach harness output, with their placeholders
	pub fn secret_mapping(&self) -> SecretMapping {
		SecretMapping::new([
			(self.api_token.as_str(), SANITIZED_API_TOKEN),
			(self.aws_access_key_id.as_str(), SANITIZED_AWS_ACCESS_KEY_ID),
			(
				self.aws_secret_access_key.as_str(),
				SANITIZED_AWS_SECRET_ACCESS_KEY,
			),
		])
	}
}
