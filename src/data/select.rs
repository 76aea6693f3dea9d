use serde::Serialize;

use super::error::DataError;
use super::model::{ConfigLabel, DatasetPair, MeasurementTable, ThreadTiming};

/// The table chosen for single-view display, together with its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDataset<'a> {
    pub label: ConfigLabel,
    pub table: &'a MeasurementTable,
}

impl<'a> ActiveDataset<'a> {
    pub fn rows(&self) -> &'a [ThreadTiming] {
        self.table.rows()
    }
}

/// Serialized as `{"label": "...", "rows": [...]}`.
impl Serialize for ActiveDataset<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("ActiveDataset", 2)?;
        s.serialize_field("label", &self.label)?;
        s.serialize_field("rows", self.rows())?;
        s.end()
    }
}

/// Pick the table for an already-parsed label.
pub fn select(label: ConfigLabel, tables: &DatasetPair) -> ActiveDataset<'_> {
    ActiveDataset {
        label,
        table: tables.table(label),
    }
}

/// Pick the table for a label given by name.
///
/// Fails with [`DataError::UnknownLabel`] for names outside the closed set.
pub fn select_by_name<'a>(label: &str, tables: &'a DatasetPair) -> Result<ActiveDataset<'a>, DataError> {
    let label = label.parse::<ConfigLabel>().inspect_err(|e| log::error!("{e}"))?;
    Ok(select(label, tables))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> DatasetPair {
        DatasetPair::new(
            MeasurementTable::new("MACOS-M1PRO", vec![ThreadTiming::new(4, 3.1)]),
            MeasurementTable::new("UBUNTU-I7", vec![ThreadTiming::new(8, 2.9)]),
        )
    }

    #[test]
    fn returns_exactly_the_table_loaded_for_the_label() {
        let tables = pair();
        for label in ConfigLabel::ALL {
            let active = select(label, &tables);
            assert_eq!(active.label, label);
            assert!(std::ptr::eq(active.table, tables.table(label)));
            assert_eq!(active.table.name(), label.table_name());
        }
    }

    #[test]
    fn selection_is_idempotent() {
        let tables = pair();
        let first = select_by_name("UBUNTU-I7", &tables).unwrap();
        let second = select_by_name("UBUNTU-I7", &tables).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = select_by_name("FREEBSD-XEON", &pair()).unwrap_err();
        assert!(matches!(err, DataError::UnknownLabel(_)));
    }

    #[test]
    fn serializes_label_and_rows() {
        let tables = pair();
        let json = serde_json::to_value(select(ConfigLabel::MacosM1Pro, &tables)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": "MACOS-M1PRO",
                "rows": [{ "threadCount": 4, "realTimeUsed": 3.1 }],
            })
        );
    }
}
