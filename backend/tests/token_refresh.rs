//! End-to-end exercise of the refresh-and-retry rule against a stub
//! backend: a 401 triggers exactly one token exchange and one replay,
//! and a second 401 ends the session.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use reqwest::Url;
use serde_json::json;

use techzone_backend::domain::ports::{AuthGateway, CartStore, CartStoreError, SessionAuth};
use techzone_backend::outbound::backend_api::{
    BackendApiClient, RemoteAuthGateway, RemoteCartStore,
};

const STALE_BEARER: &str = "Bearer stale-access";
const ROTATED_BEARER: &str = "Bearer rotated-access";

/// Stub backend recording every Authorization header it sees.
struct StubBackend {
    bearers: Mutex<Vec<String>>,
    refresh_calls: AtomicUsize,
    accept_rotated: bool,
}

impl StubBackend {
    fn recorded_bearers(&self) -> Vec<String> {
        self.bearers.lock().expect("bearers lock").clone()
    }
}

fn unauthorized_envelope() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "isSuccess": false,
        "message": "Token expired",
        "statusCode": 401,
        "errors": []
    }))
}

async fn cart_endpoint(stub: web::Data<StubBackend>, req: HttpRequest) -> HttpResponse {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let accepted = stub.accept_rotated && bearer == ROTATED_BEARER;
    stub.bearers.lock().expect("bearers lock").push(bearer);
    if accepted {
        HttpResponse::Ok().json(json!({
            "isSuccess": true,
            "statusCode": 200,
            "data": {"items": []}
        }))
    } else {
        unauthorized_envelope()
    }
}

async fn refresh_endpoint(stub: web::Data<StubBackend>) -> HttpResponse {
    stub.refresh_calls.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(json!({
        "isSuccess": true,
        "statusCode": 200,
        "data": {"token": "rotated-access", "refreshToken": "rotated-refresh"}
    }))
}

async fn login_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "isSuccess": true,
        "statusCode": 200,
        "data": {
            "isAuthenticated": false,
            "username": "ada",
            "email": "ada@example.com",
            "roles": ["User"],
            "token": "jwt-access",
            "emailConfirmed": true
        }
    }))
}

async fn start_backend(accept_rotated: bool) -> (Arc<StubBackend>, Url, ServerHandle) {
    let stub = Arc::new(StubBackend {
        bearers: Mutex::new(Vec::new()),
        refresh_calls: AtomicUsize::new(0),
        accept_rotated,
    });
    let data = web::Data::from(Arc::clone(&stub));
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/api/cart", web::get().to(cart_endpoint))
            .route("/api/Auth/refresh-token", web::post().to(refresh_endpoint))
            .route("/api/Auth/login", web::post().to(login_endpoint))
    })
    .listen(listener)
    .expect("bind test server")
    .workers(1)
    .disable_signals()
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    let base = Url::parse(&format!("http://{addr}")).expect("base url");
    (stub, base, handle)
}

fn cart_store(base: Url) -> RemoteCartStore {
    let client = BackendApiClient::new(base, Duration::from_secs(5)).expect("client");
    RemoteCartStore::new(Arc::new(client))
}

#[actix_rt::test]
async fn expired_access_token_is_exchanged_and_the_call_replayed() {
    let (stub, base, _server) = start_backend(true).await;
    let store = cart_store(base);
    let auth = SessionAuth::bearer("stale-access", Some("refresh-1".to_owned()));

    let refreshed = store.fetch(&auth).await.expect("fetch after rotation");
    assert!(refreshed.value.items.is_empty());
    let tokens = refreshed.renewed.expect("rotated tokens surfaced");
    assert_eq!(tokens.access_token, "rotated-access");
    assert_eq!(tokens.refresh_token.as_deref(), Some("rotated-refresh"));

    assert_eq!(stub.recorded_bearers(), vec![STALE_BEARER, ROTATED_BEARER]);
    assert_eq!(stub.refresh_calls.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn a_second_rejection_ends_the_session_after_one_replay() {
    let (stub, base, _server) = start_backend(false).await;
    let store = cart_store(base);
    let auth = SessionAuth::bearer("stale-access", Some("refresh-1".to_owned()));

    let err = store.fetch(&auth).await.expect_err("second 401");
    assert!(matches!(err, CartStoreError::SessionExpired));

    // Exactly one replay with the rotated token, never a third attempt.
    assert_eq!(stub.recorded_bearers(), vec![STALE_BEARER, ROTATED_BEARER]);
    assert_eq!(stub.refresh_calls.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn missing_refresh_token_fails_without_an_exchange() {
    let (stub, base, _server) = start_backend(false).await;
    let store = cart_store(base);
    let auth = SessionAuth::bearer("stale-access", None);

    let err = store.fetch(&auth).await.expect_err("no refresh token");
    assert!(matches!(err, CartStoreError::SessionExpired));

    assert_eq!(stub.recorded_bearers(), vec![STALE_BEARER]);
    assert_eq!(stub.refresh_calls.load(Ordering::SeqCst), 0);
}

#[actix_rt::test]
async fn login_tolerates_a_bundle_flagged_unauthenticated() {
    let (_stub, base, _server) = start_backend(true).await;
    let client = BackendApiClient::new(base, Duration::from_secs(5)).expect("client");
    let gateway = RemoteAuthGateway::new(Arc::new(client));

    let outcome = gateway
        .login("ada@example.com", "pw-long-enough")
        .await
        .expect("login with a token still succeeds");
    assert_eq!(outcome.user_id, "ada");
    assert_eq!(outcome.tokens.access_token, "jwt-access");
}
