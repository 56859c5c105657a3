mod analysis;
mod auth;
mod cli;
mod config;
mod error;
mod ingest;
mod insights;
mod models;
mod remote;
mod render;
mod store;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting TicketLens - IT Support Ticket Insights Tool");
    cli.execute().await?;

    Ok(())
}
