use unicode_width::UnicodeWidthStr;

use crate::insights::{
    ClusterOutcome, CorrelationReport, IngestReport, LocalAnalysis, SheetOutcome,
};

const BAR_WIDTH: usize = 40;

/// Horizontal bar chart, bars scaled to the largest value. Labels are padded
/// by terminal display width, so wide (CJK) labels stay aligned.
pub fn bar_chart(title: &str, entries: &[(String, u64)]) -> Vec<String> {
    let mut lines = vec![title.to_string(), "-".repeat(title.width())];

    let label_width = entries
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    let max = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);

    for (label, value) in entries {
        let len = if max == 0 {
            0
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let scaled = (u128::from(*value) * BAR_WIDTH as u128 / u128::from(max)) as usize;
            scaled.max(usize::from(*value > 0))
        };
        let padding = label_width - label.width();
        lines.push(format!(
            "{label}{} | {} {value}",
            " ".repeat(padding),
            "#".repeat(len)
        ));
    }

    lines
}

fn as_entries<K: ToString>(counts: impl IntoIterator<Item = (K, usize)>) -> Vec<(String, u64)> {
    counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v as u64))
        .collect()
}

pub fn render_ingest(report: &IngestReport) -> String {
    let mut lines = vec![format!("Loaded {}", report.file.display())];
    for sheet in &report.sheets {
        match &sheet.outcome {
            SheetOutcome::Loaded { rows } => lines.push(format!("  {}: {rows} rows", sheet.sheet)),
            SheetOutcome::Skipped { reason } => {
                lines.push(format!("  {}: skipped ({reason})", sheet.sheet));
            }
        }
    }
    lines.push(format!(
        "Rows stored: {} (table now holds {})",
        report.rows_stored, report.total_rows
    ));
    lines.push("Data loaded and stored successfully!".to_string());
    lines.join("\n")
}

pub fn render_local(analysis: &LocalAnalysis) -> String {
    let mut lines = bar_chart(
        "Ticket Count per Category",
        &as_entries(analysis.category_counts.iter().map(|(k, v)| (k, *v))),
    );
    lines.push(String::new());

    match &analysis.clusters {
        ClusterOutcome::Clustered { counts } => {
            lines.extend(bar_chart(
                "Ticket Clusters (Based on Title & Description)",
                &as_entries(counts.iter().map(|(k, v)| (format!("Cluster {k}"), *v))),
            ));
        }
        ClusterOutcome::Skipped { .. } => {
            lines.push("Not enough text data for clustering".to_string());
        }
    }

    lines.push(String::new());
    lines.push("Local Analysis Summary:".to_string());
    lines.push(format!("Total Tickets: {}", analysis.total_tickets));
    lines.push("Tickets per Category:".to_string());
    for (category, count) in &analysis.category_counts {
        lines.push(format!("  {category}: {count}"));
    }
    lines.push(String::new());
    lines.push("Cluster Analysis:".to_string());
    match &analysis.clusters {
        ClusterOutcome::Clustered { counts } => {
            for (cluster, count) in counts {
                lines.push(format!("  Cluster {cluster}: {count}"));
            }
        }
        ClusterOutcome::Skipped { .. } => lines.push("  Clustering not performed.".to_string()),
    }

    lines.join("\n")
}

pub fn render_correlation(report: &CorrelationReport) -> String {
    let mut lines = if report.categories.is_empty() {
        vec!["No valid category data returned from the remote model.".to_string()]
    } else {
        let entries: Vec<(String, u64)> = report
            .categories
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        bar_chart("Ticket Correlation by Issue / Workstation/Robot", &entries)
    };

    lines.push(String::new());
    lines.push("Remote Analysis Summary:".to_string());
    lines.push(report.summary.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::SheetReport;
    use chrono::Utc;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    #[test]
    fn test_bar_chart_scales_to_widest_value() {
        let lines = bar_chart(
            "Counts",
            &[("Network".to_string(), 4), ("HW".to_string(), 2)],
        );

        assert_eq!(lines[0], "Counts");
        assert_eq!(lines[1], "------");
        assert_eq!(lines[2], format!("Network | {} 4", "#".repeat(40)));
        assert_eq!(lines[3], format!("HW      | {} 2", "#".repeat(20)));
    }

    #[test]
    fn test_bar_chart_aligns_wide_labels() {
        let lines = bar_chart(
            "Ticket Count per Category",
            &[("网络工单".to_string(), 2), ("Other".to_string(), 2)],
        );

        // Four CJK characters occupy eight terminal columns.
        assert!(lines[2].starts_with("网络工单 | "));
        assert!(lines[3].starts_with("Other    | "));
        assert_eq!(lines[2].find('|').map(|i| lines[2][..i].width()), Some(9));
        assert_eq!(lines[3].find('|'), Some(9));
    }

    #[test]
    fn test_bar_chart_small_values_stay_visible() {
        let lines = bar_chart("c", &[("a".to_string(), 1000), ("b".to_string(), 1)]);

        assert_eq!(lines[3], "b | # 1");
    }

    #[test]
    fn test_render_local_with_clusters() {
        let mut category_counts = IndexMap::new();
        category_counts.insert("网络工单".to_string(), 3);
        category_counts.insert("硬件工单".to_string(), 1);
        let mut counts = IndexMap::new();
        counts.insert(1, 3);
        counts.insert(0, 1);

        let text = render_local(&LocalAnalysis {
            generated_at: Utc::now(),
            total_tickets: 4,
            category_counts,
            clusters: ClusterOutcome::Clustered { counts },
        });

        assert!(text.contains("Ticket Count per Category"));
        assert!(text.contains("Ticket Clusters (Based on Title & Description)"));
        assert!(text.contains(
            "Local Analysis Summary:\nTotal Tickets: 4\nTickets per Category:\n  网络工单: 3\n  硬件工单: 1\n"
        ));
        assert!(text.ends_with("Cluster Analysis:\n  Cluster 1: 3\n  Cluster 0: 1"));
    }

    #[test]
    fn test_render_local_without_clusters() {
        let mut category_counts = IndexMap::new();
        category_counts.insert("系统工单".to_string(), 2);

        let text = render_local(&LocalAnalysis {
            generated_at: Utc::now(),
            total_tickets: 2,
            category_counts,
            clusters: ClusterOutcome::Skipped {
                reason: "empty vocabulary".to_string(),
            },
        });

        assert!(text.contains("Not enough text data for clustering"));
        assert!(text.ends_with("Cluster Analysis:\n  Clustering not performed."));
        assert!(!text.contains("Ticket Clusters"));
    }

    #[test]
    fn test_render_correlation_chart_and_summary() {
        let mut categories = IndexMap::new();
        categories.insert("Network".to_string(), 3);
        categories.insert("Hardware".to_string(), 2);

        let text = render_correlation(&CorrelationReport {
            categories,
            summary: "Replace AP near WS-12.".to_string(),
        });

        assert!(text.starts_with("Ticket Correlation by Issue / Workstation/Robot"));
        assert!(text.contains("Network  | "));
        assert!(text.ends_with("Remote Analysis Summary:\nReplace AP near WS-12."));
    }

    #[test]
    fn test_render_correlation_without_categories() {
        let text = render_correlation(&CorrelationReport {
            categories: IndexMap::new(),
            summary: "raw model text".to_string(),
        });

        assert!(text.starts_with("No valid category data returned from the remote model."));
        assert!(text.ends_with("raw model text"));
    }

    #[test]
    fn test_render_ingest_lists_sheets() {
        let text = render_ingest(&IngestReport {
            file: PathBuf::from("tickets.xlsx"),
            loaded_at: Utc::now(),
            sheets: vec![
                SheetReport {
                    sheet: "硬件工单".to_string(),
                    outcome: SheetOutcome::Loaded { rows: 5 },
                },
                SheetReport {
                    sheet: "系统工单".to_string(),
                    outcome: SheetOutcome::Skipped {
                        reason: "sheet not found".to_string(),
                    },
                },
            ],
            rows_stored: 5,
            total_rows: 12,
        });

        assert!(text.contains("硬件工单: 5 rows"));
        assert!(text.contains("系统工单: skipped (sheet not found)"));
        assert!(text.contains("Rows stored: 5 (table now holds 12)"));
        assert!(text.ends_with("Data loaded and stored successfully!"));
    }
}
