//! Resource harness error types and handling.
//!
//! Covers staging the check/in/out executables, driving them as child
//! processes and decoding what they print.

use std::path::Path;

use crate::utils::ErrorContext;

/// Represents the failures of the check/in/out subprocess harness
#[derive(Debug)]
pub enum ResourceError {
	/// An expected executable is not present
	MissingExecutable(ErrorContext),

	/// The executable could not be started, fed or awaited
	ExecutionError(ErrorContext),

	/// Stdout did not contain the expected JSON response
	DecodeError(ErrorContext),

	/// A metadata entry was not present in a response
	MetadataNotFound(ErrorContext),

	/// Filesystem error while staging executables
	IoError(ErrorContext),
}

impl ResourceError {
	/// Creates a new missing executable error with logging
	pub fn missing_executable(path: &Path) -> Self {
		Self::MissingExecutable(
			ErrorContext::new("Missing Executable", "executable not found")
				.with_metadata("path", path.display().to_string()),
		)
		.logged()
	}

	/// Creates a new execution error with logging and source error
	pub fn execution_error_with_source(
		msg: impl Into<String>,
		path: &Path,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		Self::ExecutionError(
			ErrorContext::new("Execution Error", msg)
				.with_metadata("path", path.display().to_string())
				.with_source(source),
		)
		.logged()
	}

	/// Creates a new decode error with logging
	pub fn decode_error(source: serde_json::Error) -> Self {
		Self::DecodeError(
			ErrorContext::new("Decode Error", "invalid response on stdout").with_source(source),
		)
		.logged()
	}

	/// Creates a new metadata lookup error with logging
	pub fn metadata_not_found(name: &str) -> Self {
		Self::MetadataNotFound(
			ErrorContext::new("Metadata Not Found", format!("name not found: {}", name))
				.with_metadata("name", name),
		)
		.logged()
	}

	/// Creates a new io error with logging
	pub fn io_error(source: std::io::Error) -> Self {
		Self::IoError(ErrorContext::new("IO Error", "filesystem operation failed").with_source(source))
			.logged()
	}

	/// Returns the underlying error context
	pub fn context(&self) -> &ErrorContext {
		match self {
			Self::MissingExecutable(ctx) => ctx,
			Self::ExecutionError(ctx) => ctx,
			Self::DecodeError(ctx) => ctx,
			Self::MetadataNotFound(ctx) => ctx,
			Self::IoError(ctx) => ctx,
		}
	}

	fn logged(self) -> Self {
		tracing::debug!(target: "resource::error", trace_id = %self.context().trace_id, "{}", self);
		self
	}
}

impl From<serde_json::Error> for ResourceError {
	fn from(err: serde_json::Error) -> Self {
		Self::decode_error(err)
	}
}

impl From<std::io::Error> for ResourceError {
	fn from(err: std::io::Error) -> Self {
		Self::io_error(err)
	}
}

impl std::error::Error for ResourceError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		std::error::Error::source(self.context())
	}
}

impl std::fmt::Display for ResourceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.context().fmt(f)
	}
}
