use log::{debug, info};
use rusqlite::{params_from_iter, Connection, Row};
use std::path::Path;

use crate::error::Result;
use crate::models::{TicketField, TicketRecord};

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_no TEXT,
    ticket_status TEXT,
    ticket_type TEXT,
    project_name TEXT,
    title TEXT,
    description TEXT,
    resolve_method TEXT,
    level TEXT,
    response_sla TEXT,
    process_duration TEXT,
    complete_duration TEXT,
    category TEXT
)";

/// Append-only ticket table.
pub struct TicketStore {
    conn: Connection,
}

impl TicketStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        debug!("Opened ticket store at {}", path.display());
        Self::bootstrap(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn })
    }

    fn column_list() -> String {
        TicketField::ALL
            .iter()
            .map(|f| f.as_column())
            .chain(std::iter::once("category"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn append(&mut self, records: &[TicketRecord]) -> Result<usize> {
        let columns = Self::column_list();
        let placeholders = (1..=TicketField::ALL.len() + 1)
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("INSERT INTO tickets ({columns}) VALUES ({placeholders})");

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for record in records {
                let values = TicketField::ALL
                    .iter()
                    .map(|&f| record.field(f))
                    .chain(std::iter::once(Some(record.category.as_str())));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        info!("Appended {} ticket records", records.len());
        Ok(records.len())
    }

    pub fn load_all(&self) -> Result<Vec<TicketRecord>> {
        let sql = format!(
            "SELECT {} FROM tickets ORDER BY id ASC",
            Self::column_list()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::map_row)?;

        let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("Loaded {} ticket records", records.len());
        Ok(records)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<TicketRecord> {
        let mut record = TicketRecord::default();
        for (idx, &field) in TicketField::ALL.iter().enumerate() {
            record.set_field(field, row.get::<_, Option<String>>(idx)?);
        }
        record.category = row
            .get::<_, Option<String>>(TicketField::ALL.len())?
            .unwrap_or_default();
        Ok(record)
    }
}
