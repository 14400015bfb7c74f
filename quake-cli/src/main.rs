//! quake-cli - Command line tool for paging, filtering and charting the
//! USGS earthquake feed.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "quake-cli",
    version,
    about = "Earthquake feed browser: paged table, scatter projection, record details"
)]
struct Cli {
    #[command(subcommand)]
    command: quake_cmd::Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting quake-cli");
    quake_cmd::run(cli.command).await
}
