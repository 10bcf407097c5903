//! Sign-in, session restore and sign-out against a scripted backend.

mod support;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use pawsconnect::forms::account::LoginForm;
use pawsconnect::pages::dashboard::DashboardPage;
use pawsconnect::pages::guard::{GuardDecision, LOGIN_ROUTE};
use pawsconnect::storage::{ACCESS_TOKEN_KEY, USER_KEY};
use pawsconnect::{AuthContext, KeyValueStore, MemoryStore};
use serde_json::json;

fn login_form() -> LoginForm {
    LoginForm { email: " ada@example.com ".to_owned(), password: "secret123".to_owned(), ..LoginForm::default() }
}

#[tokio::test]
async fn login_persists_session_and_next_start_restores_it() {
    let (mock, base) = support::start().await;
    let ada = support::user_json("u1", "ada", false);
    mock.reply(Method::POST, "/api/auth/login/", StatusCode::OK, json!({ "token": "tok-1", "user": ada }));
    mock.reply(Method::GET, "/api/users/profile/", StatusCode::OK, json!({ "data": ada }));
    let store = Arc::new(MemoryStore::new());

    let mut auth = AuthContext::new(support::client(&base, store.clone()));
    auth.init().await;
    assert!(auth.user().is_none());
    assert!(!auth.is_loading());
    assert!(mock.hits().is_empty(), "empty storage must not call the profile endpoint");

    let user = login_form().submit(&mut auth).await.unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-1"));
    assert!(store.get(USER_KEY).is_some());
    let login = &mock.hits_to(&Method::POST, "/api/auth/login/")[0];
    assert_eq!(login.json(), json!({ "email": "ada@example.com", "password": "secret123" }));

    let mut restarted = AuthContext::new(support::client(&base, store.clone()));
    restarted.init().await;
    assert_eq!(restarted.user().map(|u| u.id.as_str()), Some("u1"));
    let profile = &mock.hits_to(&Method::GET, "/api/users/profile/")[0];
    assert_eq!(profile.authorization.as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn rejected_stored_session_is_cleared_on_start() {
    let (mock, base) = support::start().await;
    mock.reply(Method::GET, "/api/users/profile/", StatusCode::UNAUTHORIZED, json!({ "detail": "expired" }));
    let store = Arc::new(MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "stale").unwrap();
    store.set(USER_KEY, &support::user_json("u1", "ada", false).to_string()).unwrap();

    let mut auth = AuthContext::new(support::client(&base, store.clone()));
    auth.init().await;

    assert!(auth.user().is_none());
    assert!(store.get(ACCESS_TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
}

#[tokio::test]
async fn failed_login_surfaces_server_message_and_keeps_storage_empty() {
    let (mock, base) = support::start().await;
    mock.reply(Method::POST, "/api/auth/login/", StatusCode::BAD_REQUEST, json!({ "error": "Invalid credentials" }));
    let store = Arc::new(MemoryStore::new());
    let mut auth = AuthContext::new(support::client(&base, store.clone()));
    auth.init().await;

    let mut form = login_form();
    assert_eq!(form.submit(&mut auth).await, Err("Invalid credentials".to_owned()));
    assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
    assert!(auth.user().is_none());
    assert!(store.get(ACCESS_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn logout_clears_local_session_even_when_backend_fails() {
    let (mock, base) = support::start().await;
    mock.reply(
        Method::POST,
        "/api/auth/login/",
        StatusCode::OK,
        json!({ "token": "tok-1", "user": support::user_json("u1", "ada", false) }),
    );
    mock.reply(Method::POST, "/api/auth/logout/", StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" }));
    let store = Arc::new(MemoryStore::new());
    let mut auth = AuthContext::new(support::client(&base, store.clone()));
    auth.init().await;
    login_form().submit(&mut auth).await.unwrap();

    auth.logout().await;

    assert_eq!(mock.hits_to(&Method::POST, "/api/auth/logout/").len(), 1);
    assert!(auth.user().is_none());
    assert!(store.get(ACCESS_TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
}

#[tokio::test]
async fn dashboard_without_session_redirects_without_fetching() {
    let (mock, base) = support::start().await;
    let mut auth = AuthContext::new(support::client(&base, Arc::new(MemoryStore::new())));
    auth.init().await;

    assert_eq!(DashboardPage::open(&auth).await, Err(GuardDecision::Redirect(LOGIN_ROUTE)));
    assert!(mock.hits().is_empty());
}

#[tokio::test]
async fn dashboard_loads_all_sections_for_signed_in_user() {
    let (mock, base) = support::start().await;
    mock.reply(
        Method::POST,
        "/api/auth/login/",
        StatusCode::OK,
        json!({ "token": "tok-1", "user": support::user_json("u1", "ada", false) }),
    );
    mock.reply(
        Method::GET,
        "/api/posts/",
        StatusCode::OK,
        json!({ "data": [{ "id": "p1", "title": "Bella" }, { "id": "p2", "title": "Rex" }], "count": 2 }),
    );
    mock.reply(Method::GET, "/api/donations/", StatusCode::OK, json!([support::donation_json("d1", "10.00", "verified")]));
    mock.reply(Method::GET, "/api/badges/user/u1/", StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    let mut auth = AuthContext::new(support::client(&base, Arc::new(MemoryStore::new())));
    auth.init().await;
    login_form().submit(&mut auth).await.unwrap();

    let page = DashboardPage::open(&auth).await.unwrap();

    assert_eq!(page.recent_pets.len(), 2);
    assert_eq!(page.recent_donations.len(), 1);
    assert!(page.badges.is_empty());
    let posts = &mock.hits_to(&Method::GET, "/api/posts/")[0];
    assert_eq!(posts.query.as_deref(), Some("limit=5"));
}
