// Serve command - start HTTP server
use anyhow::{Context, Result};
use clap::Args;
use rostergrid::server::{start_server, StartupConfig};
use std::path::PathBuf;

#[derive(Args)]
#[command(about = "Start the HTTP server")]
pub struct ServeCommand {
    /// HTTP server host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// HTTP server port
    #[arg(long, default_value = "8011")]
    pub port: u16,

    /// JSON seed file with initial records
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,
}

pub fn run(cmd: ServeCommand, global_verbose: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    let startup_config = StartupConfig {
        host: cmd.host,
        port: cmd.port,
        data: cmd.data,
        verbose: global_verbose,
    };

    rt.block_on(start_server(startup_config))
}
