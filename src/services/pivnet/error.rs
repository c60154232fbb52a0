//! Pivotal Network client error types and handling.
//!
//! Every failure of a query operation maps to one of five categories:
//! transport failures, rejected credentials, undecodable responses, statuses
//! the operation did not expect, and domain-level absence. Invalid caller
//! input is reported as a configuration error before any request is sent.

use crate::{models::ConfigError, utils::ErrorContext};

/// Represents possible errors of Pivotal Network API operations
#[derive(Debug)]
pub enum PivnetError {
	/// The request never produced a response (connection, DNS, TLS, body read)
	TransportError(ErrorContext),

	/// The service rejected the API token
	AuthError(ErrorContext),

	/// The response body did not match the expected schema
	ProtocolError(ErrorContext),

	/// The service answered with a status the operation does not accept
	UnexpectedStatus { status: u16, context: ErrorContext },

	/// Nothing matched the query, e.g. no release with the requested version
	NotFound(ErrorContext),

	/// Required input such as the product slug is missing
	ConfigError(ConfigError),
}

impl PivnetError {
	/// Creates a new transport error with logging
	pub fn transport_error(msg: impl Into<String>) -> Self {
		Self::TransportError(ErrorContext::new("Transport Error", msg)).logged()
	}

	/// Creates a new transport error with logging and source error
	pub fn transport_error_with_source(
		msg: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		Self::TransportError(ErrorContext::new("Transport Error", msg).with_source(source)).logged()
	}

	/// Creates a new authentication error with logging
	pub fn auth_error(msg: impl Into<String>) -> Self {
		Self::AuthError(ErrorContext::new("Auth Error", msg)).logged()
	}

	/// Creates a new protocol error with logging
	pub fn protocol_error(msg: impl Into<String>) -> Self {
		Self::ProtocolError(ErrorContext::new("Protocol Error", msg)).logged()
	}

	/// Creates a new protocol error with logging and source error
	pub fn protocol_error_with_source(
		msg: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		Self::ProtocolError(ErrorContext::new("Protocol Error", msg).with_source(source)).logged()
	}

	/// Creates a new unexpected status error with logging
	pub fn unexpected_status(status: u16, msg: impl Into<String>) -> Self {
		Self::UnexpectedStatus {
			status,
			context: ErrorContext::new("Unexpected Status", msg)
				.with_metadata("status", status.to_string()),
		}
		.logged()
	}

	/// Creates a new not found error with logging
	pub fn not_found(msg: impl Into<String>) -> Self {
		Self::NotFound(ErrorContext::new("Not Found", msg)).logged()
	}

	/// Returns the underlying error context
	pub fn context(&self) -> &ErrorContext {
		match self {
			Self::TransportError(ctx) => ctx,
			Self::AuthError(ctx) => ctx,
			Self::ProtocolError(ctx) => ctx,
			Self::UnexpectedStatus { context, .. } => context,
			Self::NotFound(ctx) => ctx,
			Self::ConfigError(err) => err.context(),
		}
	}

	/// Returns true when the operation was rejected before sending a request
	pub fn is_config_error(&self) -> bool {
		matches!(self, Self::ConfigError(_))
	}

	/// Returns true for domain-level absence
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}

	fn logged(self) -> Self {
		tracing::debug!(target: "pivnet::error", trace_id = %self.context().trace_id, "{}", self);
		self
	}
}

impl std::error::Error for PivnetError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		std::error::Error::source(self.context())
	}
}

impl From<ConfigError> for PivnetError {
	fn from(err: ConfigError) -> Self {
		Self::ConfigError(err)
	}
}

// Standard error trait implementations
impl std::fmt::Display for PivnetError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.context().fmt(f)
	}
}
