//! Configuration error types.
//!
//! This module defines the error types that can occur while loading and
//! validating client and harness configuration. Configuration errors are
//! fatal at setup time.

use std::collections::HashMap;

use crate::utils::ErrorContext;

/// Errors that can occur during configuration operations
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// A required value is missing, empty or malformed
	ValidationError(ErrorContext),

	/// A value could not be parsed (e.g. an endpoint URL)
	ParseError(ErrorContext),
}

impl ConfigError {
	/// Create a new validation error with logging
	pub fn validation_error(
		msg: impl Into<String>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ValidationError(
			ErrorContext::new("Validation Error", msg).with_metadata_map(metadata),
		)
		.logged()
	}

	/// Create a new parse error with logging
	pub fn parse_error(msg: impl Into<String>, metadata: Option<HashMap<String, String>>) -> Self {
		Self::ParseError(ErrorContext::new("Parse Error", msg).with_metadata_map(metadata)).logged()
	}

	/// Create a new parse error with source
	pub fn parse_error_with_source(
		msg: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ParseError(
			ErrorContext::new("Parse Error", msg)
				.with_metadata_map(metadata)
				.with_source(source),
		)
		.logged()
	}

	/// Returns the underlying error context
	pub fn context(&self) -> &ErrorContext {
		match self {
			Self::ValidationError(ctx) => ctx,
			Self::ParseError(ctx) => ctx,
		}
	}

	fn logged(self) -> Self {
		tracing::error!(target: "config::error", trace_id = %self.context().trace_id, "{}", self);
		self
	}
}

impl std::error::Error for ConfigError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		std::error::Error::source(self.context())
	}
}

// Standard error trait implementations
impl std::fmt::Display for ConfigError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.context().fmt(f)
	}
}

impl From<url::ParseError> for ConfigError {
	fn from(err: url::ParseError) -> Self {
		Self::parse_error_with_source("Invalid endpoint URL", err, None)
	}
}
