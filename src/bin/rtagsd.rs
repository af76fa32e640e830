//! rtagsd: the rtags daemon.
//!
//! Serves tag extraction (`POST /rtags`) and subtitle translation
//! (`POST /translate`) over HTTP.

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use rtags::RtagsError;
use rtags::server::config::{Config, Secrets};
use rtags::server::{TokenAllowList, build_state, router};

/// rtags daemon: cached tagging and subtitle translation service.
#[derive(Parser)]
#[command(name = "rtagsd")]
#[command(version = rtags::PKG_VERSION)]
#[command(about = "rtags tagging and translation daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "RTAGS_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Address to bind to, overriding the configuration file.
    #[arg(short, long, env = "RTAGS_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration; a missing API key stops startup here.
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }
    let secrets = Secrets::from_env()?;

    let allow_list = TokenAllowList::new(secrets.authorized_tokens.clone());
    if allow_list.is_empty() {
        warn!("AUTHORIZED_USER_TOKENS is empty; every request will be rejected");
    }

    let state = build_state(&config, &secrets)?;

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| RtagsError::Configuration(format!("Invalid address: {e}")))?;

    info!(
        version = rtags::version_string(),
        built = rtags::build_timestamp().unwrap_or("unknown"),
        %addr,
        "rtagsd starting"
    );

    let app = router(state, allow_list, config.server.max_upload_bytes);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
