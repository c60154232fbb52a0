//! Security models
//!
//! - `secret`: Zeroizing storage for credentials

mod secret;

pub use secret::SecretString;
