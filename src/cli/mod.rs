use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd_serve;
mod logger;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rostergrid")]
#[command(version = VERSION)]
#[command(about = "Person-record service with paginated search and batch reconciliation", long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(cmd_serve::ServeCommand),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve(cmd) => cmd_serve::run(cmd, cli.verbose),
    }
}
