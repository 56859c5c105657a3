pub mod client;
pub mod prompt;
pub mod reply;

use indexmap::IndexMap;
use log::{info, warn};

use crate::config::Config;
use crate::error::{Result, TicketLensError};
use crate::insights::CorrelationReport;
use crate::models::TicketRecord;

use client::{ChatClient, CompletionParams};
use prompt::build_prompt;
use reply::parse_reply;

pub struct CorrelationAnalyzer {
    client: ChatClient,
    params: CompletionParams,
}

impl CorrelationAnalyzer {
    pub fn new(client: ChatClient, params: CompletionParams) -> Self {
        Self { client, params }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ChatClient::new(&config.api_base_url, config.api_key.clone())?;
        Ok(Self::new(
            client,
            CompletionParams {
                model: config.model.clone(),
                temperature: config.temperature,
                max_tokens: config.max_tokens,
            },
        ))
    }

    /// One completion call over a sample of `records`. Call failures become
    /// the summary text rather than an error.
    pub async fn run(&self, records: &[TicketRecord]) -> Result<CorrelationReport> {
        if records.is_empty() {
            return Err(TicketLensError::NoData(
                "No data available for remote analysis.".to_string(),
            ));
        }

        let prompt = build_prompt(records);
        info!("Requesting correlation analysis from {}", self.params.model);

        match self.client.complete(&prompt, &self.params).await {
            Ok(text) => Ok(parse_reply(&text)),
            Err(e) => {
                warn!("Remote API call failed: {e}");
                Ok(CorrelationReport {
                    categories: IndexMap::new(),
                    summary: format!("Error in remote API call: {e}"),
                })
            }
        }
    }
}
