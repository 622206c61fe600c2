//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, DELETE)

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
