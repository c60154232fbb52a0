//! Core services.
//!
//! - `pivnet`: Pivotal Network release query client
//! - `sanitizer`: secret redaction for every output sink
//! - `resource`: check/in/out executable harness

pub mod pivnet;
pub mod resource;
pub mod sanitizer;
