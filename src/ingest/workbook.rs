use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader, Sheets};
use chrono::{NaiveDate, TimeDelta};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;

/// One sheet as cell text: the first row is the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;

    fn read_sheet(&mut self, name: &str) -> Result<SheetTable>;
}

pub struct CalamineWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl CalamineWorkbook {
    /// Opens `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods`, picked by extension.
    pub fn open(path: &Path) -> Result<Self> {
        let sheets = open_workbook_auto(path)?;
        Ok(Self { sheets })
    }
}

/// Durations as `HH:MM:SS` (hours may exceed 24), rounded to the second.
fn duration_text(duration: TimeDelta) -> String {
    let total = (duration.num_milliseconds() + 500).div_euclid(1000);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Serial date cells as text: time-only values as `HH:MM:SS`, anything
/// else as `YYYY-MM-DD HH:MM:SS`.
fn excel_datetime_text(value: &ExcelDateTime) -> Option<String> {
    if value.is_duration() {
        return value.as_duration().map(duration_text);
    }

    let datetime = value.as_datetime()? + TimeDelta::milliseconds(500);
    let time_only = NaiveDate::from_ymd_opt(1900, 1, 1).is_some_and(|d| datetime.date() < d);
    let pattern = if time_only {
        "%H:%M:%S"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };
    Some(datetime.format(pattern).to_string())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(value) => excel_datetime_text(value).unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

impl Workbook for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<SheetTable> {
        let range = self.sheets.worksheet_range(name)?;
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

        let headers = rows.next().unwrap_or_default();
        Ok(SheetTable {
            headers,
            rows: rows.collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTimeType;
    use rust_xlsxwriter::Format;

    fn serial(value: f64, kind: ExcelDateTimeType) -> Data {
        Data::DateTime(ExcelDateTime::new(value, kind, false))
    }

    #[test]
    fn test_plain_cells_keep_their_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("T-1".to_string())), "T-1");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
    }

    #[test]
    fn test_duration_cell_is_clock_text() {
        let half_hour = serial(0.5 / 24.0, ExcelDateTimeType::TimeDelta);
        let long = serial(26.5 / 24.0, ExcelDateTimeType::TimeDelta);

        assert_eq!(cell_text(&half_hour), "00:30:00");
        assert_eq!(cell_text(&long), "26:30:00");
    }

    #[test]
    fn test_datetime_cell_is_timestamp_text() {
        let cell = serial(45292.5, ExcelDateTimeType::DateTime);

        assert_eq!(cell_text(&cell), "2024-01-01 12:00:00");
    }

    #[test]
    fn test_time_of_day_cell_drops_the_epoch_date() {
        let cell = serial(0.5 / 24.0, ExcelDateTimeType::DateTime);

        assert_eq!(cell_text(&cell), "00:30:00");
    }

    #[test]
    fn test_iso_cells_are_unchanged() {
        assert_eq!(
            cell_text(&Data::DurationIso("PT30M".to_string())),
            "PT30M"
        );
        assert_eq!(
            cell_text(&Data::DateTimeIso("2024-01-01T12:00:00".to_string())),
            "2024-01-01T12:00:00"
        );
    }

    #[test]
    fn test_formatted_numbers_read_from_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("硬件工单").unwrap();
        worksheet.write_string(0, 0, "响应时长(Response SLA)").unwrap();
        worksheet.write_string(0, 1, "处理时长(Process Duration)").unwrap();
        worksheet.write_string(0, 2, "Opened").unwrap();
        worksheet
            .write_number_with_format(1, 0, 0.5 / 24.0, &Format::new().set_num_format("hh:mm:ss"))
            .unwrap();
        worksheet
            .write_number_with_format(1, 1, 26.5 / 24.0, &Format::new().set_num_format("[h]:mm:ss"))
            .unwrap();
        worksheet
            .write_number_with_format(
                1,
                2,
                45292.5,
                &Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            )
            .unwrap();
        workbook.save(&path).unwrap();

        let mut reader = CalamineWorkbook::open(&path).unwrap();
        let table = reader.read_sheet("硬件工单").unwrap();

        assert_eq!(
            table.rows,
            vec![vec![
                "00:30:00".to_string(),
                "26:30:00".to_string(),
                "2024-01-01 12:00:00".to_string(),
            ]]
        );
    }
}
