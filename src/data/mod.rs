/// Data layer: core types, loading, and field coercion.
///
/// Architecture:
/// ```text
///  .txt (legacy) / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  dispatch on extension, read records
///   └──────────┘
///        │  each record
///        ▼
///   ┌──────────┐
///   │  coerce   │  Ok(Sample) or Err(RecordError) → skipped + warning
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SeriesBuilder │  sizes, times, last-seen unit
///   └──────────────┘
/// ```

pub mod coerce;
pub mod error;
pub mod loader;
pub mod model;

pub use error::{DocumentDecodeError, LoadError, LoadResult, RecordError};
pub use loader::{InputFormat, load_as, load_file};
pub use model::{DEFAULT_UNIT, Ingested, LEGACY_UNIT, Sample, Series, SeriesBuilder};
