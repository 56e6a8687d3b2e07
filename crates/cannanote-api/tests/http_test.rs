//! HTTP-level tests driving the full app over in-memory storage
//!
//! Run with: cargo test -p cannanote-api --test http_test

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use cannanote_api::{app, auth::SESSION_COOKIE, config::AppConfig, App, AppState};
use cannanote_core::SEED_COUNT;
use cannanote_storage::StorageBackend;
use http_body_util::BodyExt;
use tower::ServiceExt;

struct TestApp {
    app: App,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        let backend = StorageBackend::in_memory();
        let state = AppState::new(&backend, &AppConfig::default()).unwrap();
        Self {
            app: app(state.clone()),
            state,
        }
    }

    async fn send(&self, req: Request<Body>) -> Response {
        self.app.clone().oneshot(req).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Sign up and return the `name=value` cookie pair for later requests
    async fn signup(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/signup",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/entries");
        session_cookie(&response).expect("signup should set a session cookie")
    }

    /// Create an entry and return its id
    async fn create_entry(&self, cookie: &str, strain: &str) -> String {
        let response = self
            .post_form(
                "/entries",
                &format!("strain={strain}&type=flower&amount=1g&consumption=joint&description=ok&tags=a%2C+b"),
                Some(cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = location(&response);
        location
            .strip_prefix("/entries/")
            .expect("redirect to the new entry")
            .to_string()
    }
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` of the session cookie set by a response, if any
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================
// Access gate
// ============================================

#[tokio::test]
async fn test_protected_routes_redirect_without_session() {
    let t = TestApp::new();

    for uri in ["/entries", "/entries/new", "/entries/seed"] {
        let response = t.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/");
    }

    let response = t
        .post_form("/entries", "strain=x&amount=1g", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // Nothing was created
    assert!(t.state.entries.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_session_token_is_rejected() {
    let t = TestApp::new();
    let cookie = format!("{SESSION_COOKIE}=deadbeef");

    let response = t.get("/entries", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_public_pages() {
    let t = TestApp::new();

    for uri in ["/", "/signup", "/login"] {
        let response = t.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let response = t.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

// ============================================
// Signup / login / logout
// ============================================

#[tokio::test]
async fn test_signup_logs_in() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;

    let response = t.get("/entries", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Landing page now links to the entries
    let body = body_string(t.get("/", Some(&cookie)).await).await;
    assert!(body.contains("href=\"/entries\""));
}

#[tokio::test]
async fn test_session_cookie_is_http_only() {
    let t = TestApp::new();
    let response = t
        .post_form("/signup", "username=kim&password=pw1", None)
        .await;

    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("Path=/"));
}

#[tokio::test]
async fn test_duplicate_signup_shows_not_unique() {
    let t = TestApp::new();
    t.signup("kim", "pw1").await;

    let response = t
        .post_form("/signup", "username=kim&password=other", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_string(response).await.contains("already taken"));

    // The original password still works, the second one does not
    let ok = t
        .post_form("/login", "username=kim&password=pw1", None)
        .await;
    assert_eq!(ok.status(), StatusCode::SEE_OTHER);
    let rejected = t
        .post_form("/login", "username=kim&password=other", None)
        .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_signup_input() {
    let t = TestApp::new();
    let response = t
        .post_form("/signup", "username=has+space&password=pw", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_login_failures_are_generic() {
    let t = TestApp::new();
    t.signup("kim", "pw1").await;

    let wrong = t
        .post_form("/login", "username=kim&password=nope", None)
        .await;
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&wrong).is_none());

    let unknown = t
        .post_form("/login", "username=lee&password=pw1", None)
        .await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let wrong_body = body_string(wrong).await;
    let unknown_body = body_string(unknown).await;
    assert!(wrong_body.contains("Invalid username or password"));
    assert!(unknown_body.contains("Invalid username or password"));
}

#[tokio::test]
async fn test_login_then_logout() {
    let t = TestApp::new();
    t.signup("kim", "pw1").await;

    let response = t
        .post_form("/login", "username=kim&password=pw1", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/entries");
    let cookie = session_cookie(&response).unwrap();

    assert_eq!(
        t.get("/entries", Some(&cookie)).await.status(),
        StatusCode::OK
    );

    let response = t.post_form("/logout", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // The old token no longer opens the protected group
    let response = t.get("/entries", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

// ============================================
// Entries
// ============================================

#[tokio::test]
async fn test_create_then_show() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;
    let id = t.create_entry(&cookie, "Blue+Dream").await;

    let response = t.get(&format!("/entries/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Blue Dream"));
    assert!(body.contains("<dd class=\"favorites\">0</dd>"));
    assert!(body.contains("<dd class=\"votes\">0</dd>"));

    let entry = t
        .state
        .entries
        .get(id.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(entry.username.as_deref(), Some("kim"));
    assert_eq!(entry.tags, vec!["a", "b"]);
    assert_eq!(entry.date, entry.created_at);
}

#[tokio::test]
async fn test_create_rejects_missing_strain() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;

    let response = t
        .post_form("/entries", "strain=&amount=1g", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(t.state.entries.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_two_likes_make_two_favorites() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;
    let id = t.create_entry(&cookie, "Gelato").await;

    for _ in 0..2 {
        let response = t
            .post_form(&format!("/entries/{id}/like?_method=PUT"), "", Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/entries");
    }

    let body = body_string(t.get(&format!("/entries/{id}"), Some(&cookie)).await).await;
    assert!(body.contains("<dd class=\"favorites\">2</dd>"));
}

#[tokio::test]
async fn test_edit_and_update() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;
    let id = t.create_entry(&cookie, "Gelato").await;

    let response = t.get(&format!("/entries/{id}/edit"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("value=\"Gelato\""));

    let response = t
        .post_form(
            &format!("/entries/{id}?_method=PUT"),
            "strain=Sour+Diesel&amount=2g&tags=day",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/entries/{id}"));

    let entry = t.state.entries.get(id.parse().unwrap()).await.unwrap();
    assert_eq!(entry.strain, "Sour Diesel");
    assert_eq!(entry.amount, "2g");
    assert_eq!(entry.tags, vec!["day"]);
}

#[tokio::test]
async fn test_invalid_update_shows_edit_form() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;
    let id = t.create_entry(&cookie, "Gelato").await;

    let response = t
        .post_form(
            &format!("/entries/{id}?_method=PUT"),
            "strain=&amount=2g",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("value=\"Gelato\""));
    assert!(body.contains("?_method=PUT"));

    // The stored entry is unchanged
    let entry = t.state.entries.get(id.parse().unwrap()).await.unwrap();
    assert_eq!(entry.strain, "Gelato");
    assert_eq!(entry.amount, "1g");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;
    let id = t.create_entry(&cookie, "Gelato").await;

    let response = t.get(&format!("/entries/{id}/delete"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("_method=DELETE"));

    let response = t
        .post_form(&format!("/entries/{id}?_method=DELETE"), "", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/entries");

    let response = t.get(&format!("/entries/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;

    let response = t.get("/entries/not-an-id", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = t
        .post_form("/entries/not-an-id/like?_method=PUT", "", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seed_reset() {
    let t = TestApp::new();
    let cookie = t.signup("kim", "pw1").await;
    t.create_entry(&cookie, "Leftover").await;

    let response = t.get("/entries/seed", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/entries");

    let entries = t.state.entries.list().await.unwrap();
    assert_eq!(entries.len(), SEED_COUNT);
    assert!(entries.iter().all(|e| e.strain != "Leftover"));

    let body = body_string(t.get("/entries", Some(&cookie)).await).await;
    assert!(body.contains("Blue Dream"));
}
