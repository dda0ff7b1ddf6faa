//! Cookie strategy, end to end through the router.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use vote_core::Account;
use vote_security::{Session, SessionHandle, SessionStore};

use common::*;

#[tokio::test]
async fn test_login_sets_cookie_and_opens_dashboard() {
    let app = TestApp::cookie();

    let response = app.login("user1", "password123").await;
    assert_eq!(location(&response), "/dashboard");
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("music_vote.sid="));
    assert_eq!(app.state.sessions.active_sessions().await, 1);

    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<strong class="username">user1</strong>"#));
    assert!(html.contains("Sample Song 3"));
}

#[tokio::test]
async fn test_wrong_password_creates_no_session() {
    let app = TestApp::cookie();

    let response = app.login("user1", "wrong").await;
    assert_eq!(location(&response), "/login?error=Invalid%20credentials");
    assert_eq!(app.state.sessions.active_sessions().await, 0);

    let response = app.login("nobody", "password123").await;
    assert_eq!(location(&response), "/login?error=Invalid%20credentials");
}

#[tokio::test]
async fn test_json_login_is_accepted() {
    let app = TestApp::cookie();

    let response = app
        .send(post_json("/login", r#"{"username":"user1","password":"password123"}"#))
        .await;
    assert_eq!(location(&response), "/dashboard");
    let cookie = session_cookie(&response);

    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(post_json("/login", r#"{"username":"user1","password":"nope"}"#))
        .await;
    assert_eq!(location(&response), "/login?error=Invalid%20credentials");
}

#[tokio::test]
async fn test_unreadable_login_redirects_with_server_error() {
    let app = TestApp::cookie();

    let response = app
        .send(post_raw("/login", "username=user1&password=password123", None))
        .await;
    assert_eq!(location(&response), "/login?error=Server%20error");

    let response = app.send(post_json("/login", "{not json")).await;
    assert_eq!(location(&response), "/login?error=Server%20error");
    assert_eq!(app.state.sessions.active_sessions().await, 0);
}

#[tokio::test]
async fn test_unreadable_track_form_renders_failure_page() {
    let app = TestApp::cookie();
    let cookie = session_cookie(&app.login("user1", "password123").await);

    let response = app
        .send(post_raw("/add-music", "title=Song&artist=Band", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("location").is_none());
    assert!(body_text(response).await.contains("Something went wrong"));

    let response = app
        .send(post_raw("/edit-music/1", "title=Song&artist=Band", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.state.tracks.leaderboard().await.unwrap().len(), 3);
    assert_eq!(app.state.tracks.get(1).await.unwrap().title, "Sample Song 1");
}

#[tokio::test]
async fn test_login_page_shows_error() {
    let app = TestApp::cookie();
    let response = app.send(get("/login?error=Invalid%20credentials", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_root_redirects_to_login() {
    let app = TestApp::cookie();
    let response = app.send(get("/", None)).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_gated_routes_without_cookie_redirect_to_login() {
    let app = TestApp::cookie();

    let response = app.send(get("/dashboard", None)).await;
    assert!(location(&response).starts_with("/login?error="));

    let response = app.send(post_form("/vote/1", "", None)).await;
    assert!(location(&response).starts_with("/login?error="));

    let response = app.send(get("/api/tracks", None)).await;
    assert!(location(&response).starts_with("/login?error="));
}

#[tokio::test]
async fn test_forged_cookie_is_rejected() {
    let app = TestApp::cookie();
    app.login("user1", "password123").await;

    let response = app
        .send(get("/dashboard", Some("music_vote.sid=not-a-signed-value")))
        .await;
    assert!(location(&response).starts_with("/login?error="));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::cookie();
    let response = app.send(get("/no-such-page", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = TestApp::cookie();
    let cookie = session_cookie(&app.login("user1", "password123").await);

    let response = app.send(get("/logout", Some(&cookie))).await;
    assert_eq!(location(&response), "/login");
    assert_eq!(app.state.sessions.active_sessions().await, 0);

    // the browser is told to drop the cookie
    let removal = set_cookie_header(&response);
    assert!(removal.starts_with("music_vote.sid=;"), "{}", removal);
    assert!(removal.contains("Max-Age=0"), "{}", removal);

    // replaying the old cookie does not get back in
    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(
        location(&response),
        "/login?error=Session%20not%20found%2C%20please%20log%20in"
    );
}

#[tokio::test]
async fn test_vote_reorders_leaderboard() {
    let app = TestApp::cookie();
    let cookie = session_cookie(&app.login("user1", "password123").await);

    for _ in 0..3 {
        let response = app.send(post_form("/vote/2", "", Some(&cookie))).await;
        assert_eq!(location(&response), "/dashboard");
    }

    let board = app.state.tracks.leaderboard().await.unwrap();
    let order: Vec<(i64, u32)> = board.iter().map(|t| (t.id, t.votes)).collect();
    assert_eq!(order, vec![(3, 7), (2, 6), (1, 5)]);

    app.send(post_form("/vote/2", "", Some(&cookie))).await;
    app.send(post_form("/vote/2", "", Some(&cookie))).await;
    let board = app.state.tracks.leaderboard().await.unwrap();
    assert_eq!(board[0].id, 2);
    assert_eq!(board[0].votes, 8);
}

#[tokio::test]
async fn test_add_edit_delete_track() {
    let app = TestApp::cookie();
    let cookie = session_cookie(&app.login("user2", "password123").await);

    let response = app
        .send(post_form("/add-music", "title=New+Song&artist=New+Band", Some(&cookie)))
        .await;
    assert_eq!(location(&response), "/dashboard");
    let added = app.state.tracks.get(4).await.unwrap();
    assert_eq!((added.title.as_str(), added.votes), ("New Song", 0));

    let response = app.send(get("/edit-music/4", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"value="New Song""#));

    let response = app
        .send(post_form("/edit-music/4", "title=Renamed&artist=New+Band", Some(&cookie)))
        .await;
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(app.state.tracks.get(4).await.unwrap().title, "Renamed");

    let response = app.send(post_form("/delete-music/4", "", Some(&cookie))).await;
    assert_eq!(location(&response), "/dashboard");
    assert!(app.state.tracks.get(4).await.is_err());
}

#[tokio::test]
async fn test_invalid_track_input_reports_on_dashboard() {
    let app = TestApp::cookie();
    let cookie = session_cookie(&app.login("user1", "password123").await);

    let response = app
        .send(post_form("/add-music", "title=&artist=Band", Some(&cookie)))
        .await;
    assert!(location(&response).starts_with("/dashboard?error="));
    assert_eq!(app.state.tracks.leaderboard().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_track_reports_on_dashboard() {
    let app = TestApp::cookie();
    let cookie = session_cookie(&app.login("user1", "password123").await);
    let expected = "/dashboard?error=Track%20not%20found";

    let response = app.send(post_form("/vote/99", "", Some(&cookie))).await;
    assert_eq!(location(&response), expected);

    let response = app.send(post_form("/delete-music/99", "", Some(&cookie))).await;
    assert_eq!(location(&response), expected);

    let response = app.send(get("/edit-music/99", Some(&cookie))).await;
    assert_eq!(location(&response), expected);

    let response = app
        .send(post_form("/edit-music/99", "title=A&artist=B", Some(&cookie)))
        .await;
    assert_eq!(location(&response), expected);

    let response = app.send(get(expected, Some(&cookie))).await;
    assert!(body_text(response).await.contains("Track not found"));
}

#[tokio::test]
async fn test_sessions_are_isolated_per_user() {
    let app = TestApp::cookie();
    let first = session_cookie(&app.login("user1", "password123").await);
    let second = session_cookie(&app.login("user2", "password123").await);

    app.send(get("/logout", Some(&first))).await;

    let response = app.send(get("/dashboard", Some(&second))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"<strong class="username">user2</strong>"#));
}

#[tokio::test]
async fn test_expired_session_redirects_and_is_removed() {
    let app = TestApp::cookie();

    // log in to obtain a correctly signed cookie, then age its session
    let cookie = session_cookie(&app.login("user1", "password123").await);
    let raw = cookie.split_once('=').map(|(_, v)| v.to_string()).unwrap();
    let stale = Session::for_account(
        &Account::new(1, "user1", "password123"),
        Utc::now() - Duration::hours(25),
    );
    // signed cookie values are the MAC followed by the plain handle
    let handle = SessionHandle::from(&raw[raw.len() - 64..]);
    app.store.insert(handle.clone(), stale).await;

    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(
        location(&response),
        "/login?error=Session%20expired%2C%20please%20log%20in%20again"
    );
    assert!(!app.store.contains(&handle).await);
}

#[tokio::test]
async fn test_health_reports_strategy() {
    let app = TestApp::cookie();
    let response = app.send(get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["session_strategy"], "cookie");
    assert_eq!(body["active_sessions"], 0);
}
