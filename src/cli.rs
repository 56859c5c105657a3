use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::analysis::run_local_analysis;
use crate::config::Config;
use crate::ingest::load_file;
use crate::remote::CorrelationAnalyzer;
use crate::render;
use crate::store::TicketStore;

#[derive(Parser)]
#[command(name = "ticketlens")]
#[command(author, version, about = "IT Support Ticket Insights Tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file with the API key and database name
    #[arg(short, long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a ticket export workbook into the local database
    Load {
        /// Spreadsheet with the hardware, system, service and network sheets
        file: PathBuf,
    },

    /// Category counts and text clustering over all stored tickets
    Analyze,

    /// Ask the remote model to correlate a sample of stored tickets
    Correlate,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(&self.config)?;
        let mut store = TicketStore::open(&config.db_path)?;

        match &self.command {
            Commands::Load { file } => {
                let report = load_file(file, &mut store)?;
                self.emit(&report, render::render_ingest)
            }
            Commands::Analyze => {
                let records = store.load_all()?;
                let analysis = run_local_analysis(&records)?;
                self.emit(&analysis, render::render_local)
            }
            Commands::Correlate => {
                let records = store.load_all()?;
                let analyzer = CorrelationAnalyzer::from_config(&config)?;
                let report = analyzer.run(&records).await?;
                self.emit(&report, render::render_correlation)
            }
        }
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl Fn(&T) -> String) -> Result<()> {
        let output = match self.format {
            OutputFormat::Text => text(value),
            OutputFormat::Json if self.pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Json => serde_json::to_string(value)?,
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, output)?;
            info!("Results written to: {}", output_path.display());
        } else {
            println!("{output}");
        }

        Ok(())
    }
}
