//! Domain DTOs for the movie API.
//!
//! # Design
//! These types mirror the service's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch any schema drift between
//! the two. `Movie` is a plain value type — the client never mutates one it
//! receives or returns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single movie as returned by the API.
///
/// `movie_id` is `None` until the server assigns one (schema:
/// `integer|null`), so it serializes as an explicit `null` rather than being
/// omitted. `cast` is free text, comma-separated names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub movie_id: Option<i64>,
    pub name: String,
    pub cast: String,
    pub year: i32,
    pub release_date: NaiveDate,
}

impl Movie {
    /// A movie without a server-assigned identifier, as passed to
    /// [`crate::MovieClient::add_new_movie`].
    pub fn new(name: &str, cast: &str, year: i32, release_date: NaiveDate) -> Self {
        Self {
            movie_id: None,
            name: name.to_string(),
            cast: cast.to_string(),
            year,
            release_date,
        }
    }
}

/// Partial payload for updating an existing movie. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}
