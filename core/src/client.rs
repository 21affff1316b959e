//! Blocking facade over the async transport.
//!
//! # Design
//! Each operation is split into a `*_request` builder that produces a
//! `RequestSpec` and a decode step that consumes the resolved `RawResponse`,
//! with the transport exchange in between. The facade owns a current-thread
//! tokio runtime and parks the calling thread on `block_on` until the async
//! outcome resolves; concurrent calls from different threads are fine since
//! calls share no mutable state.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::http::{RawResponse, RequestSpec, Transport, TransportConfig};
use crate::types::{Movie, MovieUpdate};
use crate::Result;

pub const ALL_MOVIES: &str = "/movieservice/v1/movies";
pub const SINGLE_MOVIE: &str = "/movieservice/v1/movie";
pub const PARAM_MOVIE_NAME: &str = "movie_name";
pub const PARAM_YEAR: &str = "year";

/// Synchronous client for the movie service.
///
/// Every method performs exactly one HTTP request and yields exactly one
/// outcome: the decoded value, or a [`ClientError`] carrying the failure's
/// category and description. Calls never hang past the configured timeouts.
#[derive(Debug)]
pub struct MovieClient {
    transport: Transport,
    runtime: tokio::runtime::Runtime,
}

impl MovieClient {
    /// Client with default (finite) timeouts.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(TransportConfig::new(base_url))
    }

    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Transport {
                message: format!("failed to start I/O runtime: {e}"),
            })?;
        Ok(Self {
            transport: Transport::new(config)?,
            runtime,
        })
    }

    /// GET `/movieservice/v1/movies`. An empty array decodes to an empty
    /// vector — the server signals "no matches" with 404, not empty bodies.
    pub fn retrieve_all_movies(&self) -> Result<Vec<Movie>> {
        decode_json(self.execute(all_movies_request())?)
    }

    /// GET `/movieservice/v1/movie/{id}`.
    pub fn retrieve_movie_by_id(&self, movie_id: i64) -> Result<Movie> {
        decode_json(self.execute(movie_by_id_request(movie_id))?)
    }

    /// GET `/movieservice/v1/movie?movie_name={name}`.
    pub fn retrieve_movie_by_name(&self, movie_name: &str) -> Result<Vec<Movie>> {
        decode_json(self.execute(movie_by_name_request(movie_name))?)
    }

    /// GET `/movieservice/v1/movie?year={year}`.
    pub fn retrieve_movie_by_year(&self, year: i32) -> Result<Vec<Movie>> {
        decode_json(self.execute(movie_by_year_request(year))?)
    }

    /// POST `/movieservice/v1/movie`. On success the returned movie carries
    /// the server-assigned identifier.
    pub fn add_new_movie(&self, movie: &Movie) -> Result<Movie> {
        decode_json(self.execute(add_movie_request(movie)?)?)
    }

    /// PUT `/movieservice/v1/movie/{id}` with a partial body; omitted fields
    /// are left unchanged by the server.
    pub fn update_movie(&self, movie_id: i64, update: &MovieUpdate) -> Result<Movie> {
        decode_json(self.execute(update_movie_request(movie_id, update)?)?)
    }

    /// DELETE `/movieservice/v1/movie/{id}`. The response body text is the
    /// confirmation string, taken as-is without JSON decoding.
    pub fn delete_movie_by_id(&self, movie_id: i64) -> Result<String> {
        Ok(classify(self.execute(delete_by_id_request(movie_id))?)?.body)
    }

    /// DELETE `/movieservice/v1/movie?movie_name={name}`.
    pub fn delete_movie_by_name(&self, movie_name: &str) -> Result<String> {
        Ok(classify(self.execute(delete_by_name_request(movie_name))?)?.body)
    }

    /// Drive one exchange to completion, parking the calling thread.
    fn execute(&self, spec: RequestSpec) -> Result<RawResponse> {
        self.runtime.block_on(self.transport.execute(&spec))
    }
}

// ---------------------------------------------------------------------------
// Request builders
// ---------------------------------------------------------------------------

fn all_movies_request() -> RequestSpec {
    RequestSpec::get(ALL_MOVIES.to_string())
}

fn movie_by_id_request(movie_id: i64) -> RequestSpec {
    RequestSpec::get(format!("{SINGLE_MOVIE}/{movie_id}"))
}

fn movie_by_name_request(movie_name: &str) -> RequestSpec {
    RequestSpec::get(SINGLE_MOVIE.to_string()).with_query(PARAM_MOVIE_NAME, movie_name)
}

fn movie_by_year_request(year: i32) -> RequestSpec {
    RequestSpec::get(SINGLE_MOVIE.to_string()).with_query(PARAM_YEAR, year)
}

fn add_movie_request(movie: &Movie) -> Result<RequestSpec> {
    Ok(RequestSpec::post(SINGLE_MOVIE.to_string(), encode(movie)?))
}

fn update_movie_request(movie_id: i64, update: &MovieUpdate) -> Result<RequestSpec> {
    Ok(RequestSpec::put(
        format!("{SINGLE_MOVIE}/{movie_id}"),
        encode(update)?,
    ))
}

fn delete_by_id_request(movie_id: i64) -> RequestSpec {
    RequestSpec::delete(format!("{SINGLE_MOVIE}/{movie_id}"))
}

fn delete_by_name_request(movie_name: &str) -> RequestSpec {
    RequestSpec::delete(SINGLE_MOVIE.to_string()).with_query(PARAM_MOVIE_NAME, movie_name)
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ClientError::Decode {
        message: format!("request body could not be serialized: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Outcome classification
// ---------------------------------------------------------------------------

/// Split a resolved response on the 2xx boundary. Anything else becomes the
/// appropriate `ClientError`, so no status handling leaks into the callers.
fn classify(response: RawResponse) -> Result<RawResponse> {
    if (200..300).contains(&response.status) {
        Ok(response)
    } else {
        Err(ClientError::from_status(response.status, response.body))
    }
}

fn decode_json<T: DeserializeOwned>(response: RawResponse) -> Result<T> {
    let response = classify(response)?;
    serde_json::from_str(&response.body).map_err(|e| ClientError::Decode {
        message: e.to_string(),
    })
}
