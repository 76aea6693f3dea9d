use super::error::DataError;
use super::model::{MeasurementTable, ThreadTiming};

/// Header of the thread-count column.
pub const THREADS_COLUMN: &str = "Number of threads";
/// Header of the wall-clock time column (seconds).
pub const TIME_COLUMN: &str = "Real time used";
/// Header naming the table in long-format sources (CSV, Parquet).
pub const SHEET_COLUMN: &str = "Sheet";

// ---------------------------------------------------------------------------
// Cell / RawSheet – format-independent view of one table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as produced by any of the readers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Classify a textual cell (CSV, JSON strings).
    pub fn guess(s: &str) -> Cell {
        let s = s.trim();
        if s.is_empty() {
            return Cell::Empty;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Cell::Int(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Text(s.to_string())
    }

    fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Header row plus data rows, before any validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Turn a raw sheet into a [`MeasurementTable`].
///
/// Both mandatory columns must be present; other columns are ignored. Rows
/// whose cells are all empty are skipped, any other row must carry a positive
/// integral thread count and a finite, non-negative time.
pub fn validate_sheet(table: &str, sheet: &RawSheet) -> Result<MeasurementTable, DataError> {
    let threads_idx = sheet
        .column_index(THREADS_COLUMN)
        .ok_or_else(|| DataError::missing_column(table, THREADS_COLUMN))?;
    let time_idx = sheet
        .column_index(TIME_COLUMN)
        .ok_or_else(|| DataError::missing_column(table, TIME_COLUMN))?;

    let mut rows = Vec::with_capacity(sheet.rows.len());
    for (i, cells) in sheet.rows.iter().enumerate() {
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        let row = i + 1;
        let invalid = |column: &str, reason: String| DataError::InvalidValue {
            table: table.to_string(),
            row,
            column: column.to_string(),
            reason,
        };

        let empty = Cell::Empty;
        let threads = cells.get(threads_idx).unwrap_or(&empty);
        let time = cells.get(time_idx).unwrap_or(&empty);

        let thread_count = to_thread_count(threads).map_err(|r| invalid(THREADS_COLUMN, r))?;
        let real_time_used = to_seconds(time).map_err(|r| invalid(TIME_COLUMN, r))?;
        rows.push(ThreadTiming::new(thread_count, real_time_used));
    }

    Ok(MeasurementTable::new(table, rows))
}

fn to_thread_count(cell: &Cell) -> Result<u32, String> {
    let value = match cell {
        Cell::Int(i) => *i as f64,
        Cell::Float(f) => *f,
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{s}' is not a number"))?,
        Cell::Empty => return Err("empty cell".to_string()),
        Cell::Bool(b) => return Err(format!("expected a thread count, got boolean {b}")),
    };

    if value.fract() != 0.0 || !value.is_finite() {
        return Err(format!("thread count {value} is not an integer"));
    }
    if value < 1.0 || value > f64::from(u32::MAX) {
        return Err(format!("thread count {value} is out of range"));
    }
    Ok(value as u32)
}

fn to_seconds(cell: &Cell) -> Result<f64, String> {
    let value = match cell {
        Cell::Int(i) => *i as f64,
        Cell::Float(f) => *f,
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{s}' is not a number"))?,
        Cell::Empty => return Err("empty cell".to_string()),
        Cell::Bool(b) => return Err(format!("expected seconds, got boolean {b}")),
    };

    if !value.is_finite() || value < 0.0 {
        return Err(format!("time {value} is not a non-negative number of seconds"));
    }
    Ok(value)
}
