//! HTTP transport for the Pivotal Network API.
//!
//! The client speaks to the service through [`PivnetTransport`], which takes
//! an API-relative path and returns the raw status and body. [`HttpTransport`]
//! is the production implementation on top of `reqwest`; tests substitute
//! their own.

use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT},
	Client, Method,
};

use crate::{
	models::{ClientConfig, ConfigError},
	services::pivnet::PivnetError,
};

/// Prefix of every API path
pub const API_PREFIX: &str = "/api/v2";

/// A request against the API, addressed relative to [`API_PREFIX`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
	pub method: Method,
	/// Path below `/api/v2`, e.g. `/products/my-product/releases`
	pub path: String,
}

impl ApiRequest {
	pub fn get(path: impl Into<String>) -> Self {
		Self {
			method: Method::GET,
			path: path.into(),
		}
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self {
			method: Method::DELETE,
			path: path.into(),
		}
	}
}

/// Status and fully read body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
	pub status: u16,
	pub body: Vec<u8>,
}

impl ApiResponse {
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}
}

/// Sends one request and returns the complete response.
///
/// Implementations must not retry and must only fail with
/// [`PivnetError::TransportError`]; interpreting the status is the caller's job.
#[async_trait]
pub trait PivnetTransport: Send + Sync {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PivnetError>;
}

/// `reqwest` backed transport carrying the token and user agent on every request
#[derive(Clone)]
pub struct HttpTransport {
	client: Client,
	base_url: String,
	headers: HeaderMap,
}

impl HttpTransport {
	/// Creates a transport with a fresh `reqwest::Client`
	pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
		Self::with_client(config, Client::new())
	}

	/// Creates a transport around a caller-supplied `reqwest::Client`
	pub fn with_client(config: &ClientConfig, client: Client) -> Result<Self, ConfigError> {
		config.validate()?;

		let mut authorization =
			HeaderValue::from_str(&format!("Token {}", config.token.as_str())).map_err(|e| {
				ConfigError::parse_error_with_source("API token is not a valid header value", e, None)
			})?;
		authorization.set_sensitive(true);

		let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
			ConfigError::parse_error_with_source("User agent is not a valid header value", e, None)
		})?;

		let mut headers = HeaderMap::new();
		headers.insert(AUTHORIZATION, authorization);
		headers.insert(USER_AGENT, user_agent);

		Ok(Self {
			client,
			base_url: format!("{}{}", config.base_url(), API_PREFIX),
			headers,
		})
	}

	/// Absolute URL of an API-relative path
	pub fn url_for(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}
}

impl std::fmt::Debug for HttpTransport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HttpTransport")
			.field("base_url", &self.base_url)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl PivnetTransport for HttpTransport {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PivnetError> {
		let url = self.url_for(&request.path);
		tracing::debug!(method = %request.method, url = %url, "sending request");

		let response = self
			.client
			.request(request.method.clone(), url.as_str())
			.headers(self.headers.clone())
			.send()
			.await
			.map_err(|e| {
				PivnetError::transport_error_with_source(
					format!("{} {} failed", request.method, url),
					e,
				)
			})?;

		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(|e| {
			PivnetError::transport_error_with_source(
				format!("Failed to read response body of {} {}", request.method, url),
				e,
			)
		})?;

		tracing::debug!(status, bytes = body.len(), "received response");
		Ok(ApiResponse::new(status, body.to_vec()))
	}
}
