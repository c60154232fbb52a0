//! Pivotal Network release query client.
//!
//! Provides the read operations the resource and its acceptance harness rely
//! on (releases, versions, product files, user groups) plus release deletion.
//! Each operation performs a single request/response cycle and never retries.

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
	models::{
		ClientConfig, ConfigError, ProductFile, ProductFilesResponse, Release, ReleasesResponse,
		UserGroup, UserGroupsResponse,
	},
	services::pivnet::{
		transport::{ApiRequest, ApiResponse, HttpTransport, PivnetTransport},
		PivnetError,
	},
};

const STATUS_OK: u16 = 200;
const STATUS_NO_CONTENT: u16 = 204;
const STATUS_UNAUTHORIZED: u16 = 401;

/// Client for the release endpoints of the Pivotal Network API
#[derive(Debug, Clone)]
pub struct PivnetClient<T: PivnetTransport = HttpTransport> {
	transport: T,
}

impl PivnetClient<HttpTransport> {
	/// Creates a client talking HTTP to the configured endpoint
	///
	/// # Errors
	/// Returns a [`ConfigError`] when the endpoint or token is missing or malformed
	pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
		Ok(Self::with_transport(HttpTransport::new(config)?))
	}
}

impl<T: PivnetTransport> PivnetClient<T> {
	/// Creates a client on top of an arbitrary transport
	pub fn with_transport(transport: T) -> Self {
		Self { transport }
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Lists all releases of a product in the order returned by the service
	///
	/// # Errors
	/// * `TransportError` - the request could not be completed
	/// * `AuthError` - the service answered 401
	/// * `UnexpectedStatus` - any other status than 200
	/// * `ProtocolError` - the body is not a `{"releases": [...]}` document
	/// * `ConfigError` - the product slug is blank; nothing is sent
	#[instrument(skip(self))]
	pub async fn list_releases(&self, product_slug: &str) -> Result<Vec<Release>, PivnetError> {
		require_slug(product_slug)?;
		let path = format!("/products/{}/releases", encode(product_slug));
		let response: ReleasesResponse = self.get_json(&path).await?;
		tracing::debug!(count = response.releases.len(), "fetched releases");
		Ok(response.releases)
	}

	/// Lists the version string of every release, preserving order and duplicates
	#[instrument(skip(self))]
	pub async fn list_product_versions(
		&self,
		product_slug: &str,
	) -> Result<Vec<String>, PivnetError> {
		Ok(self
			.list_releases(product_slug)
			.await?
			.into_iter()
			.map(|release| release.version)
			.collect())
	}

	/// Returns the first release whose version equals `version` exactly.
	///
	/// The whole collection is fetched before absence is concluded; no order
	/// is assumed. Comparison is case-sensitive with no normalization.
	///
	/// # Errors
	/// Returns [`PivnetError::NotFound`] when no release matches, or any error of
	/// [`PivnetClient::list_releases`]
	#[instrument(skip(self))]
	pub async fn find_release_by_version(
		&self,
		product_slug: &str,
		version: &str,
	) -> Result<Release, PivnetError> {
		self.list_releases(product_slug)
			.await?
			.into_iter()
			.find(|release| release.version == version)
			.ok_or_else(|| {
				PivnetError::not_found(format!(
					"Could not find release for productSlug: {} and productVersion: {}",
					product_slug, version
				))
			})
	}

	/// Deletes the release with the given version.
	///
	/// The version is first resolved to a release; the delete request is keyed
	/// by the resolved identifier. Only `204 No Content` counts as success, so
	/// deleting the same version twice yields `NotFound` the second time.
	///
	/// # Returns
	/// The release that was deleted
	#[instrument(skip(self))]
	pub async fn delete_release(
		&self,
		product_slug: &str,
		version: &str,
	) -> Result<Release, PivnetError> {
		let release = self.find_release_by_version(product_slug, version).await?;
		if release.id == 0 {
			return Err(PivnetError::protocol_error(format!(
				"Release {} of {} has no identifier",
				version, product_slug
			)));
		}

		let path = format!("/products/{}/releases/{}", encode(product_slug), release.id);
		let response = self.transport.send(ApiRequest::delete(path.as_str())).await?;
		check_status(&response, STATUS_NO_CONTENT, "DELETE", &path)?;

		tracing::debug!(release_id = release.id, "deleted release");
		Ok(release)
	}

	/// Lists every product file of a product, unfiltered
	#[instrument(skip(self))]
	pub async fn list_product_files(
		&self,
		product_slug: &str,
	) -> Result<Vec<ProductFile>, PivnetError> {
		require_slug(product_slug)?;
		let path = format!("/products/{}/product_files", encode(product_slug));
		let response: ProductFilesResponse = self.get_json(&path).await?;
		Ok(response.product_files)
	}

	/// Lists the user groups a single release is visible to
	#[instrument(skip(self))]
	pub async fn list_user_groups(
		&self,
		product_slug: &str,
		release_id: u64,
	) -> Result<Vec<UserGroup>, PivnetError> {
		require_slug(product_slug)?;
		let path = format!(
			"/products/{}/releases/{}/user_groups",
			encode(product_slug),
			release_id
		);
		let response: UserGroupsResponse = self.get_json(&path).await?;
		Ok(response.user_groups)
	}

	async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, PivnetError> {
		let response = self.transport.send(ApiRequest::get(path)).await?;
		check_status(&response, STATUS_OK, "GET", path)?;

		serde_json::from_slice(&response.body).map_err(|e| {
			PivnetError::protocol_error_with_source(
				format!("Unexpected response body for GET {}", path),
				e,
			)
		})
	}
}

/// Rejects a blank product slug before it reaches a request path
fn require_slug(product_slug: &str) -> Result<(), PivnetError> {
	if product_slug.trim().is_empty() {
		return Err(ConfigError::validation_error("Product slug must be provided", None).into());
	}
	Ok(())
}

fn check_status(
	response: &ApiResponse,
	expected: u16,
	method: &str,
	path: &str,
) -> Result<(), PivnetError> {
	match response.status {
		status if status == expected => Ok(()),
		STATUS_UNAUTHORIZED => Err(PivnetError::auth_error(format!(
			"{} {} was rejected as unauthorized",
			method, path
		))),
		status => Err(PivnetError::unexpected_status(
			status,
			format!(
				"{} {} returned {}, expected {}: {}",
				method,
				path,
				status,
				expected,
				body_excerpt(&response.body)
			),
		)),
	}
}

fn body_excerpt(body: &[u8]) -> String {
	const MAX: usize = 256;
	let text = String::from_utf8_lossy(body);
	match text.char_indices().nth(MAX) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.into_owned(),
	}
}

fn encode(segment: &str) -> std::borrow::Cow<'_, str> {
	urlencoding::encode(segment)
}
