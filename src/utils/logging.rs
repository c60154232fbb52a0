//! Logging utilities for the application
//!
//! This module provides utilities for setting up and configuring logging for the application.
//! It uses the `tracing_subscriber` crate to configure the logging.
//!
//! Output goes to whatever writer the caller supplies. The binary and the harness pass a
//! [`Sanitizer`](crate::services::sanitizer::Sanitizer), so credentials never reach the
//! terminal even when they show up in request URLs or subprocess payloads.
use tracing_subscriber::{filter::EnvFilter, fmt, fmt::MakeWriter, prelude::*};

/// Setup logging for the application
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`, and writes compact
/// events to `writer`.
pub fn setup_logging<M>(writer: M)
where
	M: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
	// Create a filter based on environment variable or default to INFO
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let subscriber = tracing_subscriber::registry().with(filter).with(
		fmt::layer()
			.with_writer(writer)
			.event_format(
				fmt::format()
					.with_level(true)
					.with_target(true)
					.with_thread_ids(false)
					.with_thread_names(false)
					.with_ansi(false)
					.compact(),
			)
			.fmt_fields(fmt::format::PrettyFields::new()),
	);

	// Try to set the subscriber, but don't panic if it fails
	let _ = subscriber.try_init();
}
