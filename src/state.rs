use std::path::PathBuf;

use crate::data::{Ingested, Series};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Series being shown.
    pub series: Series,

    /// File the series was read from.
    pub source: PathBuf,

    /// PNG written by the plotting sink, if any.
    pub image_path: Option<PathBuf>,

    /// Number of records dropped during ingestion.
    pub skipped: usize,

    /// Distinct units supplied by records.
    pub units_seen: Vec<String>,

    /// Records disagreed about the time unit.
    pub mixed_units: bool,

    /// Draw a marker on every sample.
    pub show_markers: bool,
}

impl AppState {
    pub fn new(source: PathBuf, ingested: Ingested) -> Self {
        let mixed_units = ingested.has_mixed_units();
        Self {
            series: ingested.series,
            source,
            image_path: None,
            skipped: ingested.skipped.len(),
            mixed_units,
            units_seen: ingested.units_seen,
            show_markers: true,
        }
    }

    pub fn with_image(mut self, path: PathBuf) -> Self {
        self.image_path = Some(path);
        self
    }

    /// One-line description for the top bar.
    pub fn summary(&self) -> String {
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string());
        format!("{name}: {} samples, time in {}", self.series.len(), self.series.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    #[test]
    fn summary_names_file_and_unit() {
        let ingested = read_csv("sample_size,time_value,time_unit\n1,0.5,ms\nx,1,ms\n".as_bytes()).unwrap();
        let state = AppState::new(PathBuf::from("out/bench.csv"), ingested);
        assert_eq!(state.summary(), "bench.csv: 1 samples, time in ms");
        assert_eq!(state.skipped, 1);
        assert!(!state.mixed_units);
        assert!(state.image_path.is_none());
    }

    #[test]
    fn mixed_units_flag_comes_from_ingestion() {
        let ingested = read_csv("sample_size,time_value,time_unit\n1,0.5,ms\n2,0.7,s\n".as_bytes()).unwrap();
        let state = AppState::new(PathBuf::from("bench.csv"), ingested);
        assert!(state.mixed_units);
        assert_eq!(state.units_seen, vec!["ms".to_string(), "s".to_string()]);
    }
}
