//! Error handling utilities for the application.
//!
//! This module provides a structured approach to error handling with context and metadata.
//! The primary type is [`ErrorContext`], which wraps an error message with a kind label,
//! an optional source error, sorted key-value metadata, a timestamp and a trace ID.
//!
//! Domain error enums (for example `PivnetError` and `ConfigError`) wrap an
//! `ErrorContext` in each variant and delegate their `Display` to it.

use chrono::Utc;
use std::{
	collections::{BTreeMap, HashMap},
	fmt,
};
use uuid::Uuid;

/// A context wrapper for errors with additional metadata.
///
/// Each error context includes:
///
/// - A kind label (e.g. `"Transport Error"`) used as the display prefix
/// - A descriptive message
/// - An optional source error
/// - Optional key-value metadata, kept sorted for stable output
/// - A timestamp (automatically generated)
/// - A unique trace ID (automatically generated)
#[derive(Debug)]
pub struct ErrorContext {
	/// The kind label shown before the message
	pub kind: &'static str,
	/// The error message
	pub message: String,
	/// The source error that caused this error
	pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
	/// Additional metadata about the error
	pub metadata: BTreeMap<String, String>,
	/// The timestamp of the error in RFC 3339 format
	pub timestamp: String,
	/// The unique identifier for the error (UUID v4)
	pub trace_id: String,
}

impl ErrorContext {
	/// Creates a new error context with the given kind label and message.
	///
	/// # Arguments
	///
	/// * `kind` - A short label naming the error category
	/// * `message` - A descriptive error message
	///
	/// # Returns
	///
	/// A new `ErrorContext` instance with automatically generated timestamp and trace ID.
	pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
			source: None,
			metadata: BTreeMap::new(),
			timestamp: Utc::now().to_rfc3339(),
			trace_id: Uuid::new_v4().to_string(),
		}
	}

	/// Attaches the error that caused this one.
	pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
		self.source = Some(Box::new(source));
		self
	}

	/// Adds a single key-value metadata pair to the error context.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata.insert(key.into(), value.into());
		self
	}

	/// Merges an optional map of metadata into the error context.
	pub fn with_metadata_map(mut self, metadata: Option<HashMap<String, String>>) -> Self {
		if let Some(metadata) = metadata {
			self.metadata.extend(metadata);
		}
		self
	}

	/// Returns the metadata value stored under `key`, if any.
	pub fn metadata_value(&self, key: &str) -> Option<&str> {
		self.metadata.get(key).map(String::as_str)
	}

	/// Formats the error message with its metadata appended in a readable format.
	///
	/// The format is: `"message [key1=value1, key2=value2, ...]"`.
	pub fn format_with_metadata(&self) -> String {
		let mut result = self.message.clone();

		if !self.metadata.is_empty() {
			let parts: Vec<String> = self
				.metadata
				.iter()
				.map(|(key, value)| format!("{}={}", key, value))
				.collect();
			result.push_str(&format!(" [{}]", parts.join(", ")));
		}

		result
	}
}

impl fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.kind, self.format_with_metadata())?;
		if let Some(source) = &self.source {
			write!(f, " ({})", source)?;
		}
		Ok(())
	}
}

impl std::error::Error for ErrorContext {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_ref()
			.map(|source| source.as_ref() as &(dyn std::error::Error + 'static))
	}
}

// Helper function to format the complete error chain
pub fn format_error_chain(err: &anyhow::Error) -> String {
	let mut result = err.to_string();
	let mut source = err.source();

	while let Some(err) = source {
		result.push_str(&format!("\n  Caused by: {}", err));
		source = err.source();
	}

	result
}
