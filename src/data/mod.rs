//! Data layer: core types, loading, validation, selection and the minimum lookup.
//!
//! Architecture:
//! ```text
//!  .xlsx / .ods / .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read both named tables → RawSheet × 2
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  schema   │  mandatory columns, cell checks → MeasurementTable
//!   └──────────┘
//!        │            (memoized per source path by `cache`)
//!        ▼
//!   ┌──────────┐
//!   │  select   │  ConfigLabel → active table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ extremum  │  minimum-time row (first on ties)
//!   └──────────┘
//! ```

pub mod cache;
pub mod error;
pub mod extremum;
pub mod loader;
pub mod model;
pub mod schema;
pub mod select;

pub use cache::LoaderCache;
pub use error::{DataError, Missing};
pub use extremum::{find_minimum, minimum};
pub use model::{ConfigLabel, DatasetPair, MeasurementTable, ThreadTiming};
pub use select::ActiveDataset;
