use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    UInt32Array,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{ConfigLabel, DatasetPair, MeasurementTable};
use super::schema::{validate_sheet, Cell, RawSheet, SHEET_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the table of every [`ConfigLabel`] from `path`.
pub fn load_pair(path: &Path) -> Result<DatasetPair, DataError> {
    let [first, second] = ConfigLabel::ALL.map(ConfigLabel::table_name);
    let (a, b) = load_tables(path, first, second)?;
    Ok(DatasetPair::new(a, b))
}

/// Load two named tables from a source, returned in argument order.
///
/// All-or-nothing: if either table is absent or invalid, neither is returned.
///
/// Supported formats (dispatch by extension):
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – one sheet per table, header in the first row
/// * `.json` – `{ "<table>": [{ "Number of threads": 1, "Real time used": 10.2 }, ...], ... }`
/// * `.csv` / `.parquet` – long format, one row per measurement plus a `Sheet` column
pub fn load_tables(
    path: &Path,
    first: &str,
    second: &str,
) -> Result<(MeasurementTable, MeasurementTable), DataError> {
    // Surface a missing / unreadable file before any format-specific parsing.
    std::fs::metadata(path).map_err(|e| DataError::resource(path, e))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let names = [first, second];
    let [raw_a, raw_b] = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, names)?,
        "json" => read_json(path, names)?,
        "csv" => read_csv(path, names)?,
        "parquet" | "pq" => read_parquet(path, names)?,
        other => {
            return Err(DataError::resource(
                path,
                format!("unsupported file extension `.{other}`"),
            ))
        }
    };

    let raw_a = raw_a.ok_or_else(|| DataError::missing_table(first))?;
    let raw_b = raw_b.ok_or_else(|| DataError::missing_table(second))?;

    let a = validate_sheet(first, &raw_a)?;
    let b = validate_sheet(second, &raw_b)?;
    log::info!(
        "Loaded `{}` ({} rows) and `{}` ({} rows) from {}",
        first,
        a.len(),
        second,
        b.len(),
        path.display()
    );
    Ok((a, b))
}

type Sheets = [Option<RawSheet>; 2];

// ---------------------------------------------------------------------------
// Workbook loader (calamine)
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path, names: [&str; 2]) -> Result<Sheets, DataError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| DataError::resource(path, e.to_string()))?;
    let available = workbook.sheet_names();

    let mut out: Sheets = [None, None];
    for (slot, name) in out.iter_mut().zip(names) {
        if !available.iter().any(|s| s == name) {
            continue;
        }
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| DataError::resource(path, e.to_string()))?;
        *slot = Some(range_to_sheet(&range));
    }
    Ok(out)
}

fn range_to_sheet(range: &Range<Data>) -> RawSheet {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();
    RawSheet { headers, rows }
}

fn workbook_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::guess(s),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON layout (one `orient='records'` array per table):
///
/// ```json
/// {
///   "MACOS-M1PRO": [
///     { "Number of threads": 1, "Real time used": 10.2 },
///     ...
///   ],
///   "UBUNTU-I7": [ ... ]
/// }
/// ```
fn read_json(path: &Path, names: [&str; 2]) -> Result<Sheets, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::resource(path, e))?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| DataError::resource(path, e))?;
    let root = root
        .as_object()
        .ok_or_else(|| DataError::resource(path, "expected a top-level JSON object"))?;

    let mut out: Sheets = [None, None];
    for (slot, name) in out.iter_mut().zip(names) {
        let Some(value) = root.get(name) else {
            continue;
        };
        let records = value.as_array().ok_or_else(|| {
            DataError::resource(path, format!("table `{name}` is not an array of records"))
        })?;
        *slot = Some(records_to_sheet(path, name, records)?);
    }
    Ok(out)
}

fn records_to_sheet(path: &Path, name: &str, records: &[JsonValue]) -> Result<RawSheet, DataError> {
    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| {
            DataError::resource(path, format!("table `{name}`, record {i} is not a JSON object"))
        })?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map_or(Cell::Empty, json_cell))
                .collect()
        })
        .collect();

    Ok(RawSheet { headers, rows })
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Empty,
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map_or_else(|| Cell::Text(n.to_string()), Cell::Float),
        },
        JsonValue::String(s) => Cell::guess(s),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Long-format sources (CSV, Parquet)
// ---------------------------------------------------------------------------

/// Splits long-format rows into per-table sheets by their `Sheet` value.
struct LongFormat<'a> {
    names: [&'a str; 2],
    sheet_idx: usize,
    sheets: Sheets,
}

impl<'a> LongFormat<'a> {
    fn new(path: &Path, headers: &[String], names: [&'a str; 2]) -> Result<Self, DataError> {
        let sheet_idx = headers
            .iter()
            .position(|h| h.trim() == SHEET_COLUMN)
            .ok_or_else(|| DataError::missing_column(&path.display().to_string(), SHEET_COLUMN))?;

        let table_headers: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != sheet_idx)
            .map(|(_, h)| h.clone())
            .collect();

        Ok(Self {
            names,
            sheet_idx,
            sheets: [(); 2].map(|_| {
                Some(RawSheet {
                    headers: table_headers.clone(),
                    rows: Vec::new(),
                })
            }),
        })
    }

    /// Route one row (all columns, `Sheet` included) to its table.
    fn push(&mut self, sheet: &str, mut cells: Vec<Cell>) {
        let Some(pos) = self.names.iter().position(|n| *n == sheet.trim()) else {
            return;
        };
        if self.sheet_idx < cells.len() {
            cells.remove(self.sheet_idx);
        }
        if let Some(raw) = &mut self.sheets[pos] {
            raw.rows.push(cells);
        }
    }

    /// A table with no rows in a long-format source does not exist.
    fn finish(self) -> Sheets {
        self.sheets
            .map(|raw| raw.filter(|raw| !raw.rows.is_empty()))
    }
}

/// CSV layout: header row with `Sheet`, `Number of threads`, `Real time used`
/// (any order, other columns ignored), one measurement per line.
fn read_csv(path: &Path, names: [&str; 2]) -> Result<Sheets, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::resource(path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::resource(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut long = LongFormat::new(path, &headers, names)?;
    for result in reader.records() {
        let record = result.map_err(|e| DataError::resource(path, e))?;
        let sheet = record.get(long.sheet_idx).unwrap_or("").to_string();
        long.push(&sheet, record.iter().map(Cell::guess).collect());
    }
    Ok(long.finish())
}

/// Parquet layout: same columns as the CSV form. Works with files written by
/// Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn read_parquet(path: &Path, names: [&str; 2]) -> Result<Sheets, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::resource(path, e))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| DataError::resource(path, e))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(|e| DataError::resource(path, e))?;

    let mut long = LongFormat::new(path, &headers, names)?;
    for batch_result in reader {
        let batch = batch_result.map_err(|e| DataError::resource(path, e))?;
        let columns = batch
            .columns()
            .iter()
            .map(plain_column)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DataError::resource(path, e))?;

        for row in 0..batch.num_rows() {
            let cells: Vec<Cell> = columns.iter().map(|col| arrow_cell(col, row)).collect();
            let sheet = match &cells[long.sheet_idx] {
                Cell::Text(s) => s.clone(),
                Cell::Int(i) => i.to_string(),
                _ => continue,
            };
            long.push(&sheet, cells);
        }
    }
    Ok(long.finish())
}

/// Decode dictionary and view encodings (Pandas `category`, Polars strings)
/// into the plain array types `arrow_cell` reads.
fn plain_column(col: &ArrayRef) -> Result<ArrayRef, ArrowError> {
    match col.data_type() {
        DataType::Dictionary(_, value) => plain_column(&cast(col, value)?),
        DataType::Utf8View => cast(col, &DataType::Utf8),
        _ => Ok(Arc::clone(col)),
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Empty;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map_or(Cell::Empty, |a| Cell::Int(i64::from(a.value(row)))),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map_or(Cell::Empty, |a| Cell::Int(a.value(row))),
        DataType::UInt32 => col
            .as_any()
            .downcast_ref::<UInt32Array>()
            .map_or(Cell::Empty, |a| Cell::Int(i64::from(a.value(row)))),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map_or(Cell::Empty, |a| Cell::Float(f64::from(a.value(row)))),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map_or(Cell::Empty, |a| Cell::Float(a.value(row))),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map_or(Cell::Empty, |a| Cell::Bool(a.value(row))),
        other => Cell::Text(format!("{other:?}")),
    }
}
