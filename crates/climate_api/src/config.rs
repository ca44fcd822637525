//! Server configuration from command-line flags and environment.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

/// Runtime configuration for `climate-server`.
#[derive(Debug, Clone, Parser)]
#[command(name = "climate-server")]
#[command(about = "Read-only JSON API over the Honolulu climate dataset")]
#[command(version)]
pub struct ServerConfig {
    /// Path to the SQLite climate dataset
    #[arg(long, env = "CLIMATE_DB", default_value = "Resources/hawaii.sqlite")]
    pub database: PathBuf,

    /// Address to bind to
    #[arg(long, env = "CLIMATE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "CLIMATE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "CLIMATE_LOG_LEVEL", default_value = climate_core::default_log_level())]
    pub log_level: String,

    /// Absolute directory for rolling log files; logs go to stderr when unset
    #[arg(long, env = "CLIMATE_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Most recent date of the dataset; the tobs route covers the 365 days before it
    #[arg(long, env = "CLIMATE_ANCHOR_DATE", default_value = "2017-08-23")]
    pub anchor_date: NaiveDate,
}

impl ServerConfig {
    /// Binds a listener on `host:port`; host names are resolved by tokio.
    pub async fn bind(&self) -> Result<TcpListener, String> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|err| format!("failed to bind {}:{}: {err}", self.host, self.port))
    }
}
