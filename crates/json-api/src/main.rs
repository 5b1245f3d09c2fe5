//! Larder JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tokio::sync::watch;
use tracing::{error, info};

use larder_app::{
    clock::SystemClock,
    context::AppContext,
    database::{self, Db},
};

use crate::{config::ServerConfig, scheduler::SweepSchedule, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod brands;
mod categories;
mod config;
mod extensions;
mod healthcheck;
mod lots;
mod observability;
mod products;
mod router;
mod scheduler;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Larder JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let time_zone = match config.sweep.time_zone() {
        Ok(time_zone) => time_zone,
        Err(source) => {
            error!("invalid sweep time zone: {source}");

            process::exit(1);
        }
    };

    let pool = match database::connect(&config.database.database_url).await {
        Ok(pool) => pool,
        Err(source) => {
            error!("failed to connect to database: {source}");

            process::exit(1);
        }
    };

    if config.database.skip_migrations {
        info!("skipping database migrations");
    } else if let Err(source) = database::migrate(&pool).await {
        error!("failed to apply database migrations: {source}");

        process::exit(1);
    }

    let clock = Arc::new(SystemClock::new(time_zone.clone()));
    let state = State::from_app_context(AppContext::new(Db::new(pool), clock));

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(state.clone()))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router());

    let router = if config.server.api_docs_enabled {
        let doc = OpenApi::new("Larder API", env!("CARGO_PKG_VERSION")).merge_router(&router);

        router
            .push(doc.into_router("/api-doc/openapi.json"))
            .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
    } else {
        router
    };

    let (stop, stopped) = watch::channel(false);

    let sweeper = if config.sweep.sweep_enabled {
        let schedule = SweepSchedule::new(config.sweep.sweep_at, time_zone);

        Some(tokio::spawn(scheduler::run(state, schedule, stopped)))
    } else {
        info!("daily lot sweep disabled");

        None
    };

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, stop).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    if let Some(sweeper) = sweeper
        && let Err(source) = sweeper.await
    {
        error!("lot sweep timer ended abnormally: {source}");
    }
}
