//! RegNeS CLI - Command line tool for the news sentiment dashboard backend.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "regnes-cli",
    version,
    about = "Regional news sentiment dashboard toolkit"
)]
struct Cli {
    #[command(flatten)]
    api: regnes_cmd::ApiArgs,

    #[command(subcommand)]
    command: regnes_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Using backend at {}", cli.api.base_url);
    regnes_cmd::run(&cli.api, cli.command).await
}
