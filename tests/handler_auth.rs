mod common;

use tinylinks::domain::entities::{SessionData, SessionUser};
use tinylinks::web::session::SESSION_COOKIE;

#[tokio::test]
async fn test_register_logs_in_and_redirects_home() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/register")
        .form(&[("email", "a@test.com"), ("password", "hunter22")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");

    let cookie = common::session_cookie(&response).unwrap();
    let home = server.get("/").add_header("Cookie", cookie.as_str()).await;
    assert_eq!(home.status_code(), 303);
    assert_eq!(home.header("location"), "/urls");
}

#[tokio::test]
async fn test_register_empty_fields_rerenders_form() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/register")
        .form(&[("email", ""), ("password", "")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("be empty."));
    assert!(common::session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = common::create_test_server(common::create_test_state());
    common::register(&server, "dup@test.com").await;

    let response = server
        .post("/register")
        .form(&[("email", "dup@test.com"), ("password", "other-pass")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("dup@test.com already in use."));
}

#[tokio::test]
async fn test_login_success() {
    let server = common::create_test_server(common::create_test_state());
    common::register(&server, "b@test.com").await;

    let response = server
        .post("/login")
        .form(&[("email", "b@test.com"), ("password", common::PASSWORD)])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
    assert!(common::session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = common::create_test_server(common::create_test_state());
    common::register(&server, "c@test.com").await;

    let response = server
        .post("/login")
        .form(&[("email", "c@test.com"), ("password", "wrong")])
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(response.text().contains("User name or password incorrect."));
    assert!(common::session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/login")
        .form(&[("email", "nobody@test.com"), ("password", "whatever")])
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(response.text().contains("User name or password incorrect."));
}

#[tokio::test]
async fn test_forms_redirect_when_logged_in() {
    let server = common::create_test_server(common::create_test_state());
    let cookie = common::register(&server, "d@test.com").await;

    for path in ["/login", "/register"] {
        let response = server.get(path).add_header("Cookie", cookie.as_str()).await;
        assert_eq!(response.status_code(), 303);
        assert_eq!(response.header("location"), "/");
    }
}

#[tokio::test]
async fn test_forms_render_for_anonymous() {
    let server = common::create_test_server(common::create_test_state());

    server.get("/login").await.assert_status_ok();
    server.get("/register").await.assert_status_ok();
}

#[tokio::test]
async fn test_home_anonymous_goes_to_login() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = common::create_test_server(common::create_test_state());
    let cookie = common::register(&server, "e@test.com").await;

    let response = server
        .post("/logout")
        .add_header("Cookie", cookie.as_str())
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
    assert!(common::clears_session(&response));
}

#[tokio::test]
async fn test_logout_requires_session() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.post("/logout").await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_tampered_cookie_reads_as_anonymous() {
    let server = common::create_test_server(common::create_test_state());
    let cookie = common::register(&server, "f@test.com").await;
    let tampered = format!("{cookie}x");

    let response = server
        .get("/urls")
        .add_header("Cookie", tampered.as_str())
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_error_page_shows_logged_in_user() {
    let server = common::create_test_server(common::create_test_state());
    let cookie = common::register(&server, "g@test.com").await;

    let response = server
        .get("/no/such/page")
        .add_header("Cookie", cookie.as_str())
        .await;

    assert_eq!(response.status_code(), 404);
    assert!(response.text().contains("g@test.com"));
}

#[tokio::test]
async fn test_error_page_ignores_stale_session_user() {
    let server = common::create_test_server(common::create_test_state());
    let stale = SessionData {
        user: Some(SessionUser {
            id: "ghost0".to_string(),
            email: "ghost@test.com".to_string(),
        }),
        tracking_id: None,
    };
    let value = common::test_codec().encode(&stale).unwrap();
    let cookie = format!("{SESSION_COOKIE}={value}");

    let response = server
        .get("/no/such/page")
        .add_header("Cookie", cookie.as_str())
        .await;

    assert_eq!(response.status_code(), 404);
    assert!(!response.text().contains("ghost@test.com"));
}
