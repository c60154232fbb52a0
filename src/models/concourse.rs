//! Concourse resource protocol documents.
//!
//! The check, in and out executables each read one of the request types below
//! as JSON on stdin and answer with the matching response on stdout.

use serde::{Deserialize, Serialize};

use crate::{models::HarnessConfig, services::resource::ResourceError};

/// Resource source configuration shared by all three executables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
	pub api_token: String,
	pub product_slug: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub access_key_id: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub secret_access_key: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub endpoint: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bucket: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub product_version: Option<String>,
}

impl Source {
	/// Builds a source pointing at the product and bucket from the harness configuration
	pub fn from_harness(config: &HarnessConfig) -> Self {
		Self {
			api_token: config.api_token.as_str().to_string(),
			product_slug: config.product_slug.clone(),
			access_key_id: config.aws_access_key_id.as_str().to_string(),
			secret_access_key: config.aws_secret_access_key.as_str().to_string(),
			endpoint: Some(config.endpoint.clone()),
			bucket: Some(config.bucket_name.clone()),
			region: Some(config.region.clone()),
			product_version: None,
		}
	}
}

/// A resource version as emitted by check and consumed by in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
	pub product_version: String,
}

impl Version {
	pub fn new(product_version: impl Into<String>) -> Self {
		Self {
			product_version: product_version.into(),
		}
	}
}

/// A name/value pair reported alongside a fetched or published version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
	pub name: String,
	pub value: String,
}

/// Returns the value of the first metadata entry named `name`.
pub fn metadata_value_for_key<'a>(
	metadata: &'a [Metadata],
	name: &str,
) -> Result<&'a str, ResourceError> {
	metadata
		.iter()
		.find(|entry| entry.name == name)
		.map(|entry| entry.value.as_str())
		.ok_or_else(|| ResourceError::metadata_not_found(name))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
	pub source: Source,
	#[serde(default)]
	pub version: Option<Version>,
}

/// Versions newer than the requested one, oldest first
pub type CheckResponse = Vec<Version>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InParams {
	/// File globs to download; empty downloads nothing
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub globs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InRequest {
	pub source: Source,
	pub version: Version,
	#[serde(default)]
	pub params: InParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InResponse {
	pub version: Version,
	#[serde(default)]
	pub metadata: Vec<Metadata>,
}

/// Parameters of a put step; each `*_file` names a file whose contents become the field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutParams {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_glob: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub s3_filepath_prefix: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version_file: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_type_file: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_date_file: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub eula_slug_file: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description_file: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_notes_url_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutRequest {
	pub source: Source,
	#[serde(default)]
	pub params: OutParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutResponse {
	pub version: Version,
	#[serde(default)]
	pub metadata: Vec<Metadata>,
}
