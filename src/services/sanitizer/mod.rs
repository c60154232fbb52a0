//! Secret sanitization for log and harness output.
//!
//! A [`SecretMapping`] pairs literal secrets with placeholders; a [`Sanitizer`]
//! applies it to every chunk written through it before forwarding the chunk to
//! the wrapped sink. The sanitizer doubles as a `tracing_subscriber` writer.

mod mapping;
mod writer;

pub use mapping::SecretMapping;
pub use writer::Sanitizer;
