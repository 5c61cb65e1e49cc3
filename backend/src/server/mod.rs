//! Server construction and middleware wiring.

mod config;
mod session_key;

pub use config::{ConfigError, ServerConfig, StoreMode, DEFAULT_BIND_ADDR, DEFAULT_SESSION_KEY_FILE};
pub use session_key::{key_fingerprint, load_session_key, SessionKeyError};

use std::sync::Arc;
use std::time::Duration;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::session::SESSION_TTL_DAYS;
use crate::inbound::http::{self, HttpState};
use crate::middleware::RequestLog;
use crate::outbound::backend_api::{
    BackendApiClient, RemoteAuthGateway, RemoteCartStore, RemoteCatalogSource, DEFAULT_TIMEOUT,
};
use crate::outbound::local::{
    FixtureAuthGateway, FixtureCatalog, JsonFileStorage, LocalCartStore, MemoryStorage,
};

/// Wire the port adapters selected by the store mode.
///
/// # Errors
/// Fails when the backend HTTP client cannot be constructed.
pub fn build_http_state(mode: &StoreMode) -> std::io::Result<HttpState> {
    match mode {
        StoreMode::Remote { base_url } => {
            let client = BackendApiClient::new(base_url.clone(), DEFAULT_TIMEOUT)
                .map(Arc::new)
                .map_err(|e| std::io::Error::other(format!("backend client setup failed: {e}")))?;
            Ok(HttpState::new(
                Arc::new(RemoteAuthGateway::new(Arc::clone(&client))),
                Arc::new(RemoteCatalogSource::new(Arc::clone(&client))),
                Arc::new(RemoteCartStore::new(client)),
            ))
        }
        StoreMode::Local { cart_file } => {
            let cart: Arc<dyn crate::domain::ports::CartStore> = match cart_file {
                Some(path) => Arc::new(LocalCartStore::new(JsonFileStorage::new(path.clone()))),
                None => Arc::new(LocalCartStore::new(MemoryStorage::default())),
            };
            Ok(HttpState::new(
                Arc::new(FixtureAuthGateway),
                Arc::new(FixtureCatalog),
                cart,
            ))
        }
    }
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(
            actix_web::cookie::time::Duration::days(SESSION_TTL_DAYS),
        ))
        .build()
}

/// Assemble the application: logging, sessions, and every route under
/// `/api/v1`.
pub fn build_app(
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .wrap(session_middleware(key, cookie_secure, same_site))
        .configure(http::configure);

    let app = App::new()
        .app_data(http_state)
        .wrap(RequestLog)
        .service(api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct the HTTP server from a prepared configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter wiring or socket binding
/// fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config.store_mode)?);
    let ServerConfig {
        store_mode: _,
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(http_state.clone(), key.clone(), cookie_secure, same_site)
    })
    .keep_alive(Duration::from_secs(75))
    .bind(bind_addr)?
    .run();

    Ok(server)
}
