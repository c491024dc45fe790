//! Service entry-point: loads settings, prepares storage, and runs the pages.

mod server;

use std::io;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use user_directory::inbound::http::session_config::{BuildMode, session_settings_from_env};
use user_directory::outbound::persistence::{DbPool, PoolConfig, run_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(url) = settings.database_url() {
        run_migrations(url).await.map_err(io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
            .await
            .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(%bind_addr, "starting server");
    create_server(config)?.await
}
