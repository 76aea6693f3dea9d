use std::path::Path;

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;

use threadscope::data::schema::{THREADS_COLUMN, TIME_COLUMN};
use threadscope::data::{
    find_minimum, minimum, ConfigLabel, DataError, LoaderCache, Missing, ThreadTiming,
};
use threadscope::pipeline::{Session, ViewContext};

const MACOS: &[(u32, f64)] = &[(1, 10.2), (2, 5.6), (4, 3.1), (8, 3.4)];
const UBUNTU: &[(u32, f64)] = &[(1, 12.0), (2, 7.0), (4, 4.0), (8, 2.9)];

fn timings(rows: &[(u32, f64)]) -> Vec<ThreadTiming> {
    rows.iter().map(|&(t, s)| ThreadTiming::new(t, s)).collect()
}

fn write_workbook(path: &Path, sheets: &[(&str, &[(u32, f64)])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(*name).expect("set sheet name");
        ws.write_string(0, 0, THREADS_COLUMN).unwrap();
        ws.write_string(0, 1, TIME_COLUMN).unwrap();
        for (i, (threads, secs)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            ws.write_number(r, 0, f64::from(*threads)).unwrap();
            ws.write_number(r, 1, *secs).unwrap();
        }
    }
    workbook.save(path).expect("write xlsx");
}

fn open(path: &Path) -> Session {
    let mut cache = LoaderCache::new();
    Session::open(&mut cache, path).expect("open session")
}

#[test]
fn end_to_end_minima_per_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("execution_time.xlsx");
    write_workbook(&path, &[("MACOS-M1PRO", MACOS), ("UBUNTU-I7", UBUNTU)]);
    let session = open(&path);

    let macos = session
        .prepare(&ViewContext {
            selected_label: ConfigLabel::MacosM1Pro,
            comparison_enabled: false,
        })
        .unwrap();
    assert_eq!(macos.minimum, ThreadTiming::new(4, 3.1));

    let ubuntu = session
        .prepare(&ViewContext {
            selected_label: ConfigLabel::UbuntuI7,
            comparison_enabled: false,
        })
        .unwrap();
    assert_eq!(ubuntu.minimum, ThreadTiming::new(8, 2.9));
}

#[test]
fn comparison_returns_both_tables_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("execution_time.xlsx");
    write_workbook(&path, &[("MACOS-M1PRO", MACOS), ("UBUNTU-I7", UBUNTU)]);
    let session = open(&path);

    let view = session
        .prepare(&ViewContext {
            selected_label: ConfigLabel::UbuntuI7,
            comparison_enabled: true,
        })
        .unwrap();

    let both = session.both_datasets();
    assert_eq!(both.table(ConfigLabel::MacosM1Pro).rows(), timings(MACOS).as_slice());
    assert_eq!(both.table(ConfigLabel::UbuntuI7).rows(), timings(UBUNTU).as_slice());

    let [a, b] = view.comparison.expect("comparison requested");
    assert_eq!((a.label, a.minimum), (ConfigLabel::MacosM1Pro, Some(ThreadTiming::new(4, 3.1))));
    assert_eq!((b.label, b.minimum), (ConfigLabel::UbuntuI7, Some(ThreadTiming::new(8, 2.9))));
}

#[test]
fn consumer_contract_json_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("execution_time.xlsx");
    write_workbook(&path, &[("MACOS-M1PRO", &MACOS[..2]), ("UBUNTU-I7", &UBUNTU[3..])]);
    let session = open(&path);

    let active = session.active_dataset("MACOS-M1PRO").unwrap();
    assert_eq!(
        serde_json::to_value(active).unwrap(),
        serde_json::json!({
            "label": "MACOS-M1PRO",
            "rows": [
                { "threadCount": 1, "realTimeUsed": 10.2 },
                { "threadCount": 2, "realTimeUsed": 5.6 },
            ],
        })
    );

    let min = minimum(active.rows()).unwrap();
    assert_eq!(
        serde_json::to_value(min).unwrap(),
        serde_json::json!({ "threadCount": 2, "realTimeUsed": 5.6 })
    );

    assert_eq!(
        serde_json::to_value(session.both_datasets()).unwrap(),
        serde_json::json!({
            "MACOS-M1PRO": [
                { "threadCount": 1, "realTimeUsed": 10.2 },
                { "threadCount": 2, "realTimeUsed": 5.6 },
            ],
            "UBUNTU-I7": [{ "threadCount": 8, "realTimeUsed": 2.9 }],
        })
    );
}

#[test]
fn selection_is_exact_and_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("execution_time.xlsx");
    write_workbook(&path, &[("MACOS-M1PRO", MACOS), ("UBUNTU-I7", UBUNTU)]);
    let session = open(&path);

    for label in ConfigLabel::ALL {
        let once = session.active_dataset(label.table_name()).unwrap();
        let twice = session.active_dataset(label.table_name()).unwrap();
        assert_eq!(once, twice);
        assert!(std::ptr::eq(once.table, session.both_datasets().table(label)));
    }
    assert!(matches!(
        session.active_dataset("AMIGA-68000"),
        Err(DataError::UnknownLabel(_))
    ));
}

#[test]
fn missing_ubuntu_sheet_fails_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("execution_time.xlsx");
    write_workbook(&path, &[("MACOS-M1PRO", MACOS)]);

    let mut cache = LoaderCache::new();
    let err = Session::open(&mut cache, &path).unwrap_err();
    assert!(matches!(err, DataError::SchemaMissing(Missing::Table(ref t)) if t == "UBUNTU-I7"));
    assert!(cache.is_empty());
}

#[test]
fn empty_sheet_loads_but_has_no_minimum() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("execution_time.xlsx");
    write_workbook(&path, &[("MACOS-M1PRO", MACOS), ("UBUNTU-I7", &[])]);
    let session = open(&path);

    let ubuntu = session.both_datasets().table(ConfigLabel::UbuntuI7);
    assert!(ubuntu.is_empty());
    assert!(matches!(find_minimum(ubuntu), Err(DataError::EmptyTable(_))));
}
