//! Utility modules for common functionality.
//!
//! - error: Error context type shared by the domain error enums
//! - fs: File copying used when staging executables
//! - logging: Tracing subscriber setup

mod error;
mod fs;
pub mod logging;

pub use error::*;
pub use fs::copy_file_contents;
