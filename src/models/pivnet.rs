//! Pivotal Network API data structures.
//!
//! These types mirror the JSON documents returned by the `/api/v2` endpoints.
//! Unknown fields are ignored so that additions on the service side do not
//! break decoding; fields the client relies on (`id`, `version`, the
//! collection keys) are required.

use serde::{Deserialize, Serialize};

/// A single published version of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
	/// Identifier assigned by the service
	pub id: u64,
	/// Version string, unique within a product
	pub version: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_date: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_notes_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub availability: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub eula: Option<Eula>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub controlled: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub eccn: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub license_exception: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end_of_support_date: Option<String>,
	/// User groups the release is visible to, when the service inlines them
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub user_groups: Vec<UserGroup>,
}

impl Release {
	/// Creates a release with only the identifying fields set
	pub fn new(id: u64, version: impl Into<String>) -> Self {
		Self {
			id,
			version: version.into(),
			release_type: None,
			release_date: None,
			description: None,
			release_notes_url: None,
			availability: None,
			eula: None,
			controlled: None,
			eccn: None,
			license_exception: None,
			end_of_support_date: None,
			user_groups: Vec::new(),
		}
	}
}

/// End user license agreement attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eula {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	pub slug: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// A downloadable artifact belonging to a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFile {
	pub id: u64,
	#[serde(default)]
	pub name: String,
	/// Object key of the file in the product bucket
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub aws_object_key: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub md5: Option<String>,
}

/// An access scope limiting which accounts may see a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
	pub id: u64,
	#[serde(default)]
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Envelope of `GET /products/{slug}/releases`
#[derive(Debug, Clone, Deserialize)]
pub struct ReleasesResponse {
	pub releases: Vec<Release>,
}

/// Envelope of `GET /products/{slug}/product_files`
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFilesResponse {
	pub product_files: Vec<ProductFile>,
}

/// Envelope of `GET /products/{slug}/releases/{id}/user_groups`
#[derive(Debug, Clone, Deserialize)]
pub struct UserGroupsResponse {
	pub user_groups: Vec<UserGroup>,
}
