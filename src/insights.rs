use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetOutcome {
    Loaded { rows: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetReport {
    pub sheet: String,
    pub outcome: SheetOutcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestReport {
    pub file: PathBuf,
    pub loaded_at: DateTime<Utc>,
    pub sheets: Vec<SheetReport>,
    pub rows_stored: usize,
    pub total_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClusterOutcome {
    Clustered { counts: IndexMap<usize, usize> },
    Skipped { reason: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocalAnalysis {
    pub generated_at: DateTime<Utc>,
    pub total_tickets: usize,
    pub category_counts: IndexMap<String, usize>,
    pub clusters: ClusterOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub categories: IndexMap<String, u64>,
    pub summary: String,
}
