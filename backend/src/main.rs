//! Backend entry-point: loads settings, prepares persistence, and serves the
//! chat and report endpoints.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use leerstand::inbound::http::health::HealthState;
use leerstand::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid LEERSTAND_BIND_ADDR")?;

    let mut config = ServerConfig::new(bind_addr, settings.media_dir())
        .with_admins(settings.admins())
        .with_leaderboard_size(settings.leaderboard_size());

    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(
        bind_addr = %config.bind_addr(),
        media_dir = %config.media_dir().display(),
        "starting server"
    );
    let server = create_server(health_state.clone(), config).wrap_err("failed to start server")?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}
