//! Full CRUD lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock movie service on a random port, then exercises every
//! facade operation over real HTTP, including the 4xx paths whose error
//! messages come from the server's JSON bodies.

use chrono::NaiveDate;
use movie_client::{
    ClientError, Movie, MovieClient, MovieUpdate, RequestSpec, Transport, TransportConfig,
};

/// Spawn the mock server on a random port and return its address.
fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Spawn the mock server and return a client bound to it.
fn start() -> MovieClient {
    MovieClient::new(&format!("http://{}", start_server())).unwrap()
}

fn toy_story() -> Movie {
    Movie::new(
        "Toys Story 4",
        "Tom Hanks, Tim Allen",
        2019,
        NaiveDate::from_ymd_opt(2019, 6, 20).unwrap(),
    )
}

#[test]
fn movie_crud_lifecycle() {
    let client = start();

    // Empty catalogue: an empty 200 array is an empty Vec, not an error.
    let movies = client.retrieve_all_movies().unwrap();
    assert!(movies.is_empty(), "expected empty catalogue");

    // Add: the server assigns the identifier, everything else round-trips.
    let input = toy_story();
    let added = client.add_new_movie(&input).unwrap();
    let id = added.movie_id.expect("server must assign an id");
    assert_eq!(added.name, input.name);
    assert_eq!(added.cast, input.cast);
    assert_eq!(added.year, input.year);
    assert_eq!(added.release_date, input.release_date);

    // Retrieve by id equals the created movie in all fields.
    let fetched = client.retrieve_movie_by_id(id).unwrap();
    assert_eq!(fetched, added);

    // Retrieve by (partial) name and by year.
    let by_name = client.retrieve_movie_by_name("Toys").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0], added);

    let by_year = client.retrieve_movie_by_year(2019).unwrap();
    assert_eq!(by_year.len(), 1);

    // Partial update: only the cast changes.
    let update = MovieUpdate {
        cast: Some("ABC".to_string()),
        ..MovieUpdate::default()
    };
    let updated = client.update_movie(id, &update).unwrap();
    assert_eq!(updated.cast, "ABC");
    assert_eq!(updated.name, added.name);
    assert_eq!(updated.year, added.year);

    // Delete by id returns the confirmation body verbatim.
    let confirmation = client.delete_movie_by_id(id).unwrap();
    assert_eq!(confirmation, "Movie Deleted Successfully");

    // Gone now: 404 with the server's JSON message surfaced verbatim.
    let err = client.retrieve_movie_by_id(id).unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 404, .. }));
    assert_eq!(
        err.message(),
        format!("No Movie Available with the given Id - {id}")
    );

    // Deleting again misses as well.
    let err = client.delete_movie_by_id(id).unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 404, .. }));
}

#[test]
fn retrieve_by_year_returns_every_match() {
    let client = start();

    client.add_new_movie(&toy_story()).unwrap();
    client
        .add_new_movie(&Movie::new(
            "The Avengers",
            "Robert Downey Jr, Chris Evans , Chris HemsWorth",
            2012,
            NaiveDate::from_ymd_opt(2012, 5, 4).unwrap(),
        ))
        .unwrap();
    client
        .add_new_movie(&Movie::new(
            "The Dark Knight Rises",
            "Christian Bale, Tom Hardy",
            2012,
            NaiveDate::from_ymd_opt(2012, 7, 20).unwrap(),
        ))
        .unwrap();

    let matches = client.retrieve_movie_by_year(2012).unwrap();
    assert_eq!(matches.len(), 2);
}

#[test]
fn retrieve_by_name_miss_is_request_error_with_server_message() {
    let client = start();

    let err = client.retrieve_movie_by_name("ABC").unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 404, .. }));
    assert_eq!(err.message(), "No Movie Available with the given name - ABC");

    let err = client.retrieve_movie_by_year(1950).unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 404, .. }));
    assert_eq!(err.message(), "No Movie Available with the given year - 1950");
}

#[test]
fn add_movie_with_blank_name_surfaces_validation_message() {
    let client = start();

    let mut movie = toy_story();
    movie.name = String::new();
    let err = client.add_new_movie(&movie).unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 400, .. }));
    assert_eq!(err.message(), "Please pass all the input fields : [name]");
}

#[test]
fn delete_by_name_round_trip() {
    let client = start();

    client.add_new_movie(&toy_story()).unwrap();
    let confirmation = client.delete_movie_by_name("Toys Story 4").unwrap();
    assert_eq!(confirmation, "Movie Deleted Successfully");

    let err = client.delete_movie_by_name("Toys Story 4").unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 404, .. }));
}

#[tokio::test]
async fn transport_surfaces_response_headers() {
    let addr = start_server();
    let transport = Transport::new(TransportConfig::new(&format!("http://{addr}"))).unwrap();

    let response = transport
        .execute(&RequestSpec::get("/movieservice/v1/movies".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let content_type = response
        .headers
        .iter()
        .find(|(name, _)| name == "content-type")
        .map(|(_, value)| value.as_str());
    assert_eq!(content_type, Some("application/json"));
}

#[test]
fn concurrent_calls_observe_their_own_outcomes() {
    use std::sync::Arc;

    let client = Arc::new(start());
    client.add_new_movie(&toy_story()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || client.retrieve_all_movies().unwrap())
        })
        .collect();

    for handle in handles {
        let movies = handle.join().unwrap();
        assert_eq!(movies.len(), 1);
    }
}
