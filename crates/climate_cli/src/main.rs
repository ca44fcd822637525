//! `climate-server` entry point.
//!
//! # Responsibility
//! - Parse configuration, start logging and check the dataset.
//! - Serve the climate router until Ctrl-C or SIGTERM.

use clap::Parser;
use climate_api::{create_router, AppState, ServerConfig};
use climate_core::db::open_db;
use climate_core::init_logging;
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("climate-server: {err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_start module=cli status=error error={err}");
            eprintln!("climate-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), String> {
    // Only startup checks the schema; request sessions skip it.
    let startup = open_db(&config.database).map_err(|err| {
        format!(
            "cannot open dataset `{}`: {err}",
            config.database.display()
        )
    })?;
    drop(startup);

    let state = AppState::with_anchor(config.database.clone(), config.anchor_date);
    let app = create_router(state);

    let listener = config.bind().await?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("failed to read bound address: {err}"))?;

    info!(
        "event=server_start module=cli status=ok addr={} database={} anchor_date={} version={}",
        addr,
        config.database.display(),
        config.anchor_date,
        climate_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {err}"))?;

    info!("event=server_shutdown module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=signal_install module=cli status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("event=signal_install module=cli status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("event=server_shutdown module=cli status=start");
}
