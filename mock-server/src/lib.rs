//! In-memory implementation of the movie service used by integration tests.
//!
//! Mirrors the real service's conventions the client depends on: 404s carry
//! a JSON `message` body, a POST with missing fields yields a 400 listing
//! them, and deletes answer with a plain-text confirmation.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const DELETED_MESSAGE: &str = "Movie Deleted Successfully";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: Option<i64>,
    pub name: String,
    pub cast: String,
    pub year: i32,
    pub release_date: NaiveDate,
}

/// Create payload. Every field is optional at the wire level so validation
/// can report exactly which ones are missing, the way the real service does.
#[derive(Deserialize)]
pub struct NewMovie {
    pub name: Option<String>,
    pub cast: Option<String>,
    pub year: Option<i32>,
    pub release_date: Option<NaiveDate>,
}

/// Partial update; only present fields are applied.
#[derive(Deserialize)]
pub struct MovieUpdate {
    pub name: Option<String>,
    pub cast: Option<String>,
    pub year: Option<i32>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct MovieQuery {
    pub movie_name: Option<String>,
    pub year: Option<i32>,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error(status: StatusCode, message: String) -> ErrorResponse {
    (status, Json(ErrorBody { message }))
}

fn not_found_by_id(movie_id: i64) -> ErrorResponse {
    error(
        StatusCode::NOT_FOUND,
        format!("No Movie Available with the given Id - {movie_id}"),
    )
}

#[derive(Default)]
pub struct Store {
    movies: HashMap<i64, Movie>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/movieservice/v1/movies", get(list_movies))
        .route(
            "/movieservice/v1/movie",
            get(search_movies).post(add_movie).delete(delete_movie_by_name),
        )
        .route(
            "/movieservice/v1/movie/{id}",
            get(get_movie).put(update_movie).delete(delete_movie_by_id),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_movies(State(db): State<Db>) -> Json<Vec<Movie>> {
    let store = db.read().await;
    let mut movies: Vec<Movie> = store.movies.values().cloned().collect();
    movies.sort_by_key(|m| m.movie_id);
    Json(movies)
}

async fn get_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Movie>, ErrorResponse> {
    let store = db.read().await;
    store
        .movies
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found_by_id(id))
}

async fn search_movies(
    State(db): State<Db>,
    Query(params): Query<MovieQuery>,
) -> Result<Json<Vec<Movie>>, ErrorResponse> {
    let store = db.read().await;
    let mut matches: Vec<Movie> = if let Some(name) = &params.movie_name {
        let needle = name.to_lowercase();
        store
            .movies
            .values()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    } else if let Some(year) = params.year {
        store
            .movies
            .values()
            .filter(|m| m.year == year)
            .cloned()
            .collect()
    } else {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "Please provide one of the query params : [movie_name, year]".to_string(),
        ));
    };

    if matches.is_empty() {
        // The service signals "no matches" with a 404, never an empty array.
        let detail = match (&params.movie_name, params.year) {
            (Some(name), _) => format!("No Movie Available with the given name - {name}"),
            (None, Some(year)) => format!("No Movie Available with the given year - {year}"),
            (None, None) => unreachable!(),
        };
        return Err(error(StatusCode::NOT_FOUND, detail));
    }
    matches.sort_by_key(|m| m.movie_id);
    Ok(Json(matches))
}

async fn add_movie(
    State(db): State<Db>,
    Json(input): Json<NewMovie>,
) -> Result<Json<Movie>, ErrorResponse> {
    let mut missing = Vec::new();
    if input.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
        missing.push("name");
    }
    if input.cast.as_deref().map_or(true, |c| c.trim().is_empty()) {
        missing.push("cast");
    }
    if input.year.is_none() {
        missing.push("year");
    }
    if input.release_date.is_none() {
        missing.push("release_date");
    }
    if !missing.is_empty() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            format!("Please pass all the input fields : [{}]", missing.join(", ")),
        ));
    }

    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    let movie = Movie {
        movie_id: Some(id),
        name: input.name.unwrap(),
        cast: input.cast.unwrap(),
        year: input.year.unwrap(),
        release_date: input.release_date.unwrap(),
    };
    store.movies.insert(id, movie.clone());
    Ok(Json(movie))
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<MovieUpdate>,
) -> Result<Json<Movie>, ErrorResponse> {
    let mut store = db.write().await;
    let movie = store.movies.get_mut(&id).ok_or_else(|| not_found_by_id(id))?;
    if let Some(name) = input.name {
        movie.name = name;
    }
    if let Some(cast) = input.cast {
        movie.cast = cast;
    }
    if let Some(year) = input.year {
        movie.year = year;
    }
    if let Some(release_date) = input.release_date {
        movie.release_date = release_date;
    }
    Ok(Json(movie.clone()))
}

async fn delete_movie_by_id(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<String, ErrorResponse> {
    let mut store = db.write().await;
    store
        .movies
        .remove(&id)
        .map(|_| DELETED_MESSAGE.to_string())
        .ok_or_else(|| not_found_by_id(id))
}

async fn delete_movie_by_name(
    State(db): State<Db>,
    Query(params): Query<MovieQuery>,
) -> Result<String, ErrorResponse> {
    let Some(name) = params.movie_name else {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "Please provide the query param : [movie_name]".to_string(),
        ));
    };
    let mut store = db.write().await;
    let ids: Vec<i64> = store
        .movies
        .iter()
        .filter(|(_, m)| m.name == name)
        .map(|(id, _)| *id)
        .collect();
    if ids.is_empty() {
        return Err(error(
            StatusCode::NOT_FOUND,
            format!("No Movie Available with the given name - {name}"),
        ));
    }
    for id in ids {
        store.movies.remove(&id);
    }
    Ok(DELETED_MESSAGE.to_string())
}
