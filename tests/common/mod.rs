#![allow(dead_code)]

use axum::http::header::SET_COOKIE;
use axum_test::{TestResponse, TestServer};
use tinylinks::state::AppState;
use tinylinks::web::routes::router;
use tinylinks::web::session::{SESSION_COOKIE, SessionCodec};

pub const BASE_URL: &str = "http://localhost:8080";
pub const PASSWORD: &str = "hunter22";

pub fn test_codec() -> SessionCodec {
    SessionCodec::new(vec![b"k".repeat(32)], 3600, false).unwrap()
}

pub fn create_test_state() -> AppState {
    AppState::in_memory(test_codec(), BASE_URL.to_string())
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// `name=value` part of the session cookie set by a response, if any.
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with(SESSION_COOKIE))
        .filter_map(|v| v.split(';').next())
        .map(|pair| pair.to_string())
        .next()
}

/// True when the response tells the browser to drop the session cookie.
pub fn clears_session(response: &TestResponse) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(SESSION_COOKIE) && v.contains("Max-Age=0"))
}

/// Registers a user and returns their session cookie.
pub async fn register(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/register")
        .form(&[("email", email), ("password", PASSWORD)])
        .await;

    assert_eq!(response.status_code(), 303);
    session_cookie(&response).unwrap()
}

/// Creates a short link as the given user and returns its id.
pub async fn create_url(server: &TestServer, cookie: &str, long_url: &str) -> String {
    let response = server
        .post("/urls")
        .add_header("Cookie", cookie)
        .form(&[("longUrl", long_url)])
        .await;

    assert_eq!(response.status_code(), 303);
    let location = response.header("location");
    location
        .to_str()
        .unwrap()
        .trim_start_matches("/urls/")
        .to_string()
}
