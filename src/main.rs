use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::extract::FromRef;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod serve;
}
mod config;
mod error;
mod form;
mod name;
mod page;
mod storage;

use config::Config;
pub(crate) use error::{ApiError, ApiResult};
use storage::FileStorage;

/// ShPasteBin is a simple paste bin server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The address to listen to [default: 0.0.0.0]
    #[arg(short, long)]
    address: Option<IpAddr>,

    /// The port to listen to [default: 8701]
    #[arg(short, long)]
    port: Option<u16>,

    /// The directory where the pastes are stored [default: ./pastes]
    #[arg(short = 'd', long, alias = "pastes_dir")]
    pastes_dir: Option<PathBuf>,
}

impl Cli {
    /// Override values from the config file with the flags that were given.
    fn apply(self, config: &mut Config) {
        if let Some(address) = self.address {
            config.address = address;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.pastes_dir {
            config.storage.dir = dir;
        }
    }
}

#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub storage: FileStorage,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    cli.apply(&mut config);

    let storage = FileStorage::new(&config.storage.dir)
        .await
        .context("failed to open pastes directory")?;

    commands::serve::run(App { config, storage }).await
}
