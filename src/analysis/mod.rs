pub mod kmeans;
pub mod tfidf;

use chrono::Utc;
use indexmap::IndexMap;
use log::{info, warn};

use crate::error::{Result, TicketLensError};
use crate::insights::{ClusterOutcome, LocalAnalysis};
use crate::models::TicketRecord;

use kmeans::KMeans;
use tfidf::TfidfVectorizer;

/// Tickets per category, most frequent first.
pub fn category_counts(records: &[TicketRecord]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        *counts.entry(record.category.clone()).or_default() += 1;
    }
    counts.sort_by(|a_name, a_count, b_name, b_count| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });
    counts
}

fn cluster_counts(labels: &[usize]) -> IndexMap<usize, usize> {
    let mut counts: IndexMap<usize, usize> = IndexMap::new();
    for &label in labels {
        *counts.entry(label).or_default() += 1;
    }
    counts.sort_by(|a_id, a_count, b_id, b_count| {
        b_count.cmp(a_count).then_with(|| a_id.cmp(b_id))
    });
    counts
}

pub fn cluster_records(records: &[TicketRecord], kmeans: &KMeans) -> ClusterOutcome {
    let texts: Vec<String> = records.iter().map(TicketRecord::combined_text).collect();

    match TfidfVectorizer::english().fit_transform(&texts) {
        Ok(matrix) => {
            let labels = kmeans.fit_predict(&matrix.rows, matrix.n_features());
            ClusterOutcome::Clustered {
                counts: cluster_counts(&labels),
            }
        }
        Err(e) => {
            warn!("Clustering skipped: {e}");
            ClusterOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}

pub fn run_local_analysis(records: &[TicketRecord]) -> Result<LocalAnalysis> {
    if records.is_empty() {
        return Err(TicketLensError::NoData(
            "No data available for analysis.".to_string(),
        ));
    }

    info!("Running local analysis over {} tickets", records.len());

    Ok(LocalAnalysis {
        generated_at: Utc::now(),
        total_tickets: records.len(),
        category_counts: category_counts(records),
        clusters: cluster_records(records, &KMeans::default()),
    })
}
