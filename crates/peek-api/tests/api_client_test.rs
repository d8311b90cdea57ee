#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` hooks and endpoints using wiremock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use peek_api::transport::default_headers;
use peek_api::{
    ApiClient, Error, ImageUpload, MemorySessionStore, Registration, SessionStore,
    SessionStoreError,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Harness {
    server: MockServer,
    client: ApiClient,
    store: Arc<MemorySessionStore>,
    redirects: Arc<AtomicUsize>,
}

async fn setup_with(store: MemorySessionStore) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(store);
    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&redirects);

    let http = reqwest::Client::builder()
        .default_headers(default_headers())
        .build()
        .unwrap();
    let client = ApiClient::with_client(
        http,
        Url::parse(&server.uri()).unwrap(),
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    Harness {
        server,
        client,
        store,
        redirects,
    }
}

async fn setup() -> Harness {
    setup_with(MemorySessionStore::new()).await
}

/// A store whose reads always fail.
struct BrokenStore;

impl SessionStore for BrokenStore {
    fn load(&self) -> Result<Option<SecretString>, SessionStoreError> {
        Err(SessionStoreError::Backend("disk on fire".into()))
    }
    fn save(&self, _token: &SecretString) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Backend("disk on fire".into()))
    }
    fn clear(&self) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Backend("disk on fire".into()))
    }
}

// ── Outgoing hook ───────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_header_attached_when_token_present() {
    let h = setup_with(MemorySessionStore::with_token("abc123")).await;

    Mock::given(method("GET"))
        .and(path("/api/screens"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;

    let screens = h.client.list_screens().await.unwrap();
    assert!(screens.is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/screens/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalScreens": 0, "onlineScreens": 0, "offlineScreens": 0, "errorScreens": 0
        })))
        .mount(&h.server)
        .await;

    h.client.screen_stats().await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_unreadable_store_sends_anonymously() {
    let server = MockServer::start().await;
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        Arc::new(BrokenStore),
        peek_api::noop_hook(),
    );

    Mock::given(method("GET"))
        .and(path("/api/screens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.list_screens().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

// ── Incoming hook ───────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_clears_token_and_fires_hook_once() {
    let h = setup_with(MemorySessionStore::with_token("expired")).await;

    Mock::given(method("GET"))
        .and(path("/api/screens"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Could not validate credentials" })),
        )
        .mount(&h.server)
        .await;

    let result = h.client.list_screens().await;

    match result {
        Err(Error::Unauthorized { ref detail }) => {
            assert_eq!(detail.as_deref(), Some("Could not validate credentials"));
        }
        other => panic!("expected Unauthorized, got: {other:?}"),
    }
    assert!(h.store.load().unwrap().is_none());
    assert_eq!(h.redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unauthorized_with_broken_store_still_fails_and_redirects() {
    let server = MockServer::start().await;
    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&redirects);
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        Arc::new(BrokenStore),
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_server_error_passes_through_untouched() {
    let h = setup_with(MemorySessionStore::with_token("still-valid")).await;

    Mock::given(method("GET"))
        .and(path("/api/screens"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&h.server)
        .await;

    let err = h.client.list_screens().await.unwrap_err();

    match err {
        Error::Api {
            status,
            ref detail,
            ref body,
        } => {
            assert_eq!(status, 500);
            assert!(detail.is_none());
            assert_eq!(body, "boom");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(h.redirects.load(Ordering::SeqCst), 0);
    assert!(h.store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/screens"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&h.server)
        .await;

    let err = h.client.list_screens().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
}

// ── Auth endpoints ──────────────────────────────────────────────────

#[tokio::test]
async fn test_register_sends_exactly_the_registration_fields() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "Acme",
            "description": "Lobby displays",
            "owner_email": "owner@acme.test",
            "owner_password": "hunter2",
            "owner_full_name": "Ada Owner"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t-1",
            "name": "Acme",
            "description": "Lobby displays"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let tenant = h
        .client
        .register(&Registration {
            name: "Acme".into(),
            description: Some("Lobby displays".into()),
            owner_email: "owner@acme.test".into(),
            owner_password: SecretString::from("hunter2".to_owned()),
            owner_full_name: "Ada Owner".into(),
        })
        .await
        .unwrap();

    assert_eq!(tenant.unwrap().id, "t-1");
}

#[tokio::test]
async fn test_register_accepts_empty_created_response() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&h.server)
        .await;

    let tenant = h
        .client
        .register(&Registration {
            name: "Acme".into(),
            description: None,
            owner_email: "owner@acme.test".into(),
            owner_password: SecretString::from("pw".to_owned()),
            owner_full_name: "Ada Owner".into(),
        })
        .await
        .unwrap();

    assert!(tenant.is_none());
}

#[tokio::test]
async fn test_register_surfaces_detail() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Email already registered" })),
        )
        .mount(&h.server)
        .await;

    let err = h
        .client
        .register(&Registration {
            name: "Acme".into(),
            description: None,
            owner_email: "owner@acme.test".into(),
            owner_password: SecretString::from("pw".to_owned()),
            owner_full_name: "Ada Owner".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.detail(), Some("Email already registered"));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_login_posts_form_and_returns_token() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .and(body_string_contains("username=owner%40acme.test"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-abc",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let token = h
        .client
        .login("owner@acme.test", &SecretString::from("hunter2".to_owned()))
        .await
        .unwrap();

    assert_eq!(token.expose_secret(), "jwt-abc");
    // Storing is the caller's job.
    assert!(h.store.load().unwrap().is_none());

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn test_me_decodes_user() {
    let h = setup_with(MemorySessionStore::with_token("jwt")).await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-1",
            "tenant_id": "t-1",
            "email": "owner@acme.test",
            "full_name": "Ada Owner",
            "role": "owner"
        })))
        .mount(&h.server)
        .await;

    let user = h.client.me().await.unwrap();
    assert_eq!(user.email.as_deref(), Some("owner@acme.test"));
    assert_eq!(user.role.as_deref(), Some("owner"));
}

// ── Screen endpoints ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_screens_decodes_records() {
    let h = setup_with(MemorySessionStore::with_token("jwt")).await;

    Mock::given(method("GET"))
        .and(path("/api/screens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "name": "Lobby",
                "image_url": "https://cdn.test/lobby.png",
                "status": "online",
                "last_check": "2025-03-01T10:00:00",
                "response_time": 120
            },
            {
                "id": "2",
                "name": "Cafeteria",
                "status": "offline"
            }
        ])))
        .mount(&h.server)
        .await;

    let screens = h.client.list_screens().await.unwrap();

    assert_eq!(screens.len(), 2);
    assert_eq!(screens[0].id, "1");
    assert_eq!(screens[0].response_time, Some(120.0));
    assert_eq!(screens[1].status, "offline");
    assert!(screens[1].last_check.is_none());
}

#[tokio::test]
async fn test_create_screen_uploads_multipart() {
    let h = setup_with(MemorySessionStore::with_token("jwt")).await;

    Mock::given(method("POST"))
        .and(path("/api/screens"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9 })))
        .expect(1)
        .mount(&h.server)
        .await;

    let image = ImageUpload::from_bytes("lobby.png", b"\x89PNG fake".to_vec());
    h.client.create_screen("Lobby", &image).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "unexpected content type: {content_type}"
    );

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("Lobby"));
    assert!(body.contains("name=\"image\"; filename=\"lobby.png\""));
    assert!(body.contains("image/png"));
}
