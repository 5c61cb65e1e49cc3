//! Backend entry-point: reads configuration and starts the HTTP server.

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use techzone_backend::server::{create_server, ServerConfig, StoreMode};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    let mode = match config.store_mode() {
        StoreMode::Remote { base_url } => format!("remote ({base_url})"),
        StoreMode::Local { cart_file: None } => "local (in-memory cart)".to_owned(),
        StoreMode::Local {
            cart_file: Some(path),
        } => format!("local (cart at {})", path.display()),
    };
    info!(bind_addr = %config.bind_addr(), store = %mode, "starting storefront backend");

    create_server(config)?.await
}
