//! HTTP client for the ticker brief API.
//!
//! Brief and history fetches fail with [`FetchError`] and are never retried.
//! Trending failures are absorbed and a fixed fallback list is returned
//! instead.

pub mod client;
pub mod error;
pub mod trending;

pub use client::BriefClient;
pub use error::FetchError;
pub use trending::FALLBACK_TRENDING;
