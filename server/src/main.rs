//! SmartFit Server binary.
//!
//! Usage: `smartfit-server [CONFIG.toml]`. Without a path the built-in
//! defaults apply; `SMARTFIT_*` variables and `.env` override either way.

use std::path::PathBuf;

use smartfit_server::{LogFormat, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ServerConfig::load(config_path.as_deref())?;

    init_tracing(config.server.log_format);

    smartfit_server::start_server(config).await?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
