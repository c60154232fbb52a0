//! Domain models and data structures.
//!
//! - `pivnet`: releases, product files and user groups returned by the API
//! - `concourse`: check/in/out request and response documents
//! - `config`: client and harness configuration
//! - `security`: secret storage

mod concourse;
mod config;
mod pivnet;
mod security;

pub use concourse::{
	metadata_value_for_key, CheckRequest, CheckResponse, InParams, InRequest, InResponse,
	Metadata, OutParams, OutRequest, OutResponse, Source, Version,
};
pub use config::{
	ClientConfig, ConfigError, HarnessConfig, DEFAULT_ENDPOINT, HARNESS_USER_AGENT,
	SANITIZED_API_TOKEN, SANITIZED_AWS_ACCESS_KEY_ID, SANITIZED_AWS_SECRET_ACCESS_KEY,
};
pub use pivnet::{
	Eula, ProductFile, ProductFilesResponse, Release, ReleasesResponse, UserGroup,
	UserGroupsResponse,
};
pub use security::SecretString;
