use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::DataError;

// ---------------------------------------------------------------------------
// ConfigLabel – the closed set of benchmarked configurations
// ---------------------------------------------------------------------------

/// One benchmarked hardware / OS combination.
///
/// The set is closed: every label owns exactly one table in the source, and the
/// table carries the label's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConfigLabel {
    #[serde(rename = "MACOS-M1PRO")]
    MacosM1Pro,
    #[serde(rename = "UBUNTU-I7")]
    UbuntuI7,
}

impl ConfigLabel {
    /// All labels, in pairing order (table A first).
    pub const ALL: [ConfigLabel; 2] = [ConfigLabel::MacosM1Pro, ConfigLabel::UbuntuI7];

    /// Name of the table holding this configuration's measurements.
    pub const fn table_name(self) -> &'static str {
        match self {
            ConfigLabel::MacosM1Pro => "MACOS-M1PRO",
            ConfigLabel::UbuntuI7 => "UBUNTU-I7",
        }
    }

    /// Position in [`ConfigLabel::ALL`].
    pub const fn index(self) -> usize {
        match self {
            ConfigLabel::MacosM1Pro => 0,
            ConfigLabel::UbuntuI7 => 1,
        }
    }
}

impl fmt::Display for ConfigLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for ConfigLabel {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigLabel::ALL
            .into_iter()
            .find(|label| label.table_name() == s)
            .ok_or_else(|| DataError::UnknownLabel(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ThreadTiming – one row of a measurement table
// ---------------------------------------------------------------------------

/// A single benchmark measurement: how long a run took with a given number of
/// worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadTiming {
    /// Always >= 1.
    pub thread_count: u32,
    /// Wall-clock seconds, finite and >= 0.
    pub real_time_used: f64,
}

impl ThreadTiming {
    pub const fn new(thread_count: u32, real_time_used: f64) -> Self {
        Self {
            thread_count,
            real_time_used,
        }
    }

    /// The row as a plot point `[threads, seconds]`.
    pub fn as_point(&self) -> [f64; 2] {
        [f64::from(self.thread_count), self.real_time_used]
    }
}

// ---------------------------------------------------------------------------
// MeasurementTable – one validated table
// ---------------------------------------------------------------------------

/// Rows of one table in source order. Repeated trials may share a thread count.
///
/// Tables are built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    name: String,
    rows: Vec<ThreadTiming>,
}

impl MeasurementTable {
    pub fn new(name: impl Into<String>, rows: Vec<ThreadTiming>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Table (sheet) name as found in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[ThreadTiming] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DatasetPair – both tables of one source
// ---------------------------------------------------------------------------

/// The two tables loaded from one source, one per [`ConfigLabel`].
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPair {
    tables: [MeasurementTable; 2],
}

impl DatasetPair {
    /// Pair tables in [`ConfigLabel::ALL`] order.
    pub fn new(first: MeasurementTable, second: MeasurementTable) -> Self {
        Self {
            tables: [first, second],
        }
    }

    pub fn table(&self, label: ConfigLabel) -> &MeasurementTable {
        &self.tables[label.index()]
    }

    /// `(label, table)` for every label, in pairing order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigLabel, &MeasurementTable)> {
        ConfigLabel::ALL.into_iter().zip(self.tables.iter())
    }
}

/// Serialized as `{"MACOS-M1PRO": rows, "UBUNTU-I7": rows}`.
impl Serialize for DatasetPair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (label, table) in self.iter() {
            map.serialize_entry(label.table_name(), table.rows())?;
        }
        map.end()
    }
}
