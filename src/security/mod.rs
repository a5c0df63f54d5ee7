//! Credential handling.

pub mod credentials;

pub use credentials::ModelCredentials;
