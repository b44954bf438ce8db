//! On-disk storage
//!
//! Sessions are in-memory only; the one thing persisted is API credentials.

pub mod credentials;

pub use credentials::CredentialStore;
