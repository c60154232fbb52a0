//! Pivotal Network resource support library.
//!
//! Provides the pieces a Concourse pivnet resource and its acceptance suite
//! share:
//!
//! - [`services::pivnet::PivnetClient`]: release, product file and user group
//!   queries against the Pivotal Network API, plus release deletion
//! - [`services::sanitizer::Sanitizer`]: a writer that scrubs credentials from
//!   everything passing through it
//! - [`services::resource::ResourceRunner`]: drives check/in/out executables
//!   over their stdin/stdout JSON protocol

pub mod models;
pub mod services;
pub mod utils;
