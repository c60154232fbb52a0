//! Check/in/out subprocess harness.
//!
//! - `executables`: locating the executables and staging `s3-out`
//! - `runner`: feeding requests on stdin and capturing the session
//! - `error`: harness errors

mod error;
mod executables;
mod runner;

pub use error::ResourceError;
pub use executables::{ResourceExecutables, S3_OUT_NAME};
pub use runner::{ResourceRunner, ResourceSession};
