//! Blocking REST client for the movie service.
//!
//! # Overview
//! `MovieClient` exposes synchronous CRUD operations against the movie
//! service while driving a non-blocking reqwest transport underneath. Each
//! call issues exactly one HTTP request, parks the calling thread until the
//! async outcome resolves, and maps every failure mode into [`ClientError`].
//!
//! # Design
//! - `Transport` handles the wire exchange and knows nothing about status
//!   semantics: 404 and 500 are responses, not faults. Only connection- and
//!   protocol-level problems fail at that layer.
//! - `MovieClient` builds a `RequestSpec` per operation, blocks on the
//!   transport, and classifies the resolved outcome exactly once.
//! - No retries, no caching, no shared mutable state between calls. A failed
//!   attempt is the final outcome; retry policy belongs to the caller.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::MovieClient;
pub use error::ClientError;
pub use http::{RawResponse, RequestSpec, Transport, TransportConfig};
pub use types::{Movie, MovieUpdate};

pub type Result<T> = std::result::Result<T, ClientError>;
