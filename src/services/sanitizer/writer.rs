//! Redacting writer.

use std::{
	borrow::Cow,
	io::{self, Write},
	sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing_subscriber::fmt::MakeWriter;

use crate::services::sanitizer::SecretMapping;

/// Output sink that replaces secrets before forwarding bytes downstream.
///
/// Each `write` call is sanitized on its own: a secret split across two
/// writes is forwarded unredacted. Callers that need full coverage must hand
/// over whole lines (the tracing formatter and the resource runner both do).
///
/// Clones share the mapping and the downstream sink. Every chunk is written
/// under the sink's lock, so chunks from concurrent writers never interleave.
pub struct Sanitizer<W> {
	mapping: Arc<SecretMapping>,
	sink: Arc<Mutex<W>>,
}

impl<W> Clone for Sanitizer<W> {
	fn clone(&self) -> Self {
		Self {
			mapping: Arc::clone(&self.mapping),
			sink: Arc::clone(&self.sink),
		}
	}
}

impl<W: Write> Sanitizer<W> {
	/// Creates a sanitizer forwarding to a shared sink
	pub fn new(mapping: SecretMapping, sink: Arc<Mutex<W>>) -> Self {
		Self {
			mapping: Arc::new(mapping),
			sink,
		}
	}

	/// Creates a sanitizer that takes over `writer` as its sink
	pub fn wrap(mapping: SecretMapping, writer: W) -> Self {
		Self::new(mapping, Arc::new(Mutex::new(writer)))
	}

	pub fn mapping(&self) -> &SecretMapping {
		&self.mapping
	}

	/// Returns `chunk` with every secret replaced by its placeholder
	pub fn sanitize<'a>(&self, chunk: &'a [u8]) -> Cow<'a, [u8]> {
		self.mapping.apply(chunk)
	}

	/// String flavour of [`Sanitizer::sanitize`]
	pub fn sanitize_str(&self, text: &str) -> String {
		String::from_utf8_lossy(&self.mapping.apply(text.as_bytes())).into_owned()
	}

	fn lock_sink(&self) -> MutexGuard<'_, W> {
		// a writer that panicked mid-write leaves the sink usable
		self.sink.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl<W: Write> Write for Sanitizer<W> {
	/// Forwards the sanitized chunk and reports the length of the original chunk.
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let sanitized = self.mapping.apply(buf);
		self.lock_sink().write_all(&sanitized)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		self.lock_sink().flush()
	}
}

impl<'a, W> MakeWriter<'a> for Sanitizer<W>
where
	W: Write + Send + 'static,
{
	type Writer = Sanitizer<W>;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}

impl<W> std::fmt::Debug for Sanitizer<W> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Sanitizer")
			.field("mapping", &self.mapping)
			.finish_non_exhaustive()
	}
}
