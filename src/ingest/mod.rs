mod mapping;
mod workbook;

use chrono::Utc;
use log::{info, warn};
use std::path::Path;

use crate::error::{Result, TicketLensError};
use crate::insights::{IngestReport, SheetOutcome, SheetReport};
use crate::models::{TicketField, TicketRecord};
use crate::store::TicketStore;

pub use mapping::{field_for_header, EXPECTED_SHEETS};
pub use workbook::{CalamineWorkbook, SheetTable, Workbook};

#[derive(Debug)]
pub struct IngestOutcome {
    pub records: Vec<TicketRecord>,
    pub sheets: Vec<SheetReport>,
}

/// Keeps mapped columns only and tags every row with `sheet_name`.
/// A repeated header maps from its first column; later copies are dropped.
pub fn normalize_sheet(sheet_name: &str, table: &SheetTable) -> Vec<TicketRecord> {
    let mut columns: Vec<(usize, TicketField)> = Vec::new();
    for (idx, header) in table.headers.iter().enumerate() {
        if let Some(field) = field_for_header(header) {
            if columns.iter().all(|&(_, seen)| seen != field) {
                columns.push((idx, field));
            }
        }
    }

    table
        .rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| {
            let mut record = TicketRecord::new(sheet_name);
            for &(idx, field) in &columns {
                let value = row.get(idx).filter(|cell| !cell.is_empty()).cloned();
                record.set_field(field, value);
            }
            record
        })
        .collect()
}

pub fn ingest_workbook<W: Workbook>(workbook: &mut W) -> Result<IngestOutcome> {
    let available = workbook.sheet_names();
    let mut records = Vec::new();
    let mut sheets = Vec::with_capacity(EXPECTED_SHEETS.len());

    for sheet_name in EXPECTED_SHEETS {
        let outcome = if available.iter().any(|name| name == sheet_name) {
            match workbook.read_sheet(sheet_name) {
                Ok(table) => {
                    let rows = normalize_sheet(sheet_name, &table);
                    info!("Sheet {sheet_name}: {} rows", rows.len());
                    let outcome = SheetOutcome::Loaded { rows: rows.len() };
                    records.extend(rows);
                    outcome
                }
                Err(e) => {
                    warn!("Error processing sheet {sheet_name}: {e}");
                    SheetOutcome::Skipped {
                        reason: e.to_string(),
                    }
                }
            }
        } else {
            warn!("Error processing sheet {sheet_name}: sheet not found");
            SheetOutcome::Skipped {
                reason: "sheet not found".to_string(),
            }
        };

        sheets.push(SheetReport {
            sheet: sheet_name.to_string(),
            outcome,
        });
    }

    let any_loaded = sheets
        .iter()
        .any(|s| matches!(s.outcome, SheetOutcome::Loaded { .. }));
    if !any_loaded {
        return Err(TicketLensError::NoData(
            "No data loaded from file.".to_string(),
        ));
    }

    Ok(IngestOutcome { records, sheets })
}

pub fn load_file(path: &Path, store: &mut TicketStore) -> Result<IngestReport> {
    info!("Loading ticket export: {}", path.display());

    let mut workbook = CalamineWorkbook::open(path)?;
    let outcome = ingest_workbook(&mut workbook)?;
    let rows_stored = store.append(&outcome.records)?;

    Ok(IngestReport {
        file: path.to_path_buf(),
        loaded_at: Utc::now(),
        sheets: outcome.sheets,
        rows_stored,
        total_rows: store.count()?,
    })
}
