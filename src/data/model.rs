use std::fmt;

/// Unit label used when no record supplies one.
pub const DEFAULT_UNIT: &str = "units";

/// Unit label of the legacy whitespace-delimited format, which always
/// recorded wall-clock seconds.
pub const LEGACY_UNIT: &str = "seconds";

// ---------------------------------------------------------------------------
// Sample – one coerced record
// ---------------------------------------------------------------------------

/// A single benchmark observation after field coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub sample_size: i64,
    pub time_value: f64,
    /// `None` when the record did not carry a unit of its own.
    pub time_unit: Option<String>,
}

// ---------------------------------------------------------------------------
// Series – the normalized result handed to the plotting sink
// ---------------------------------------------------------------------------

/// Index-aligned sizes and times plus one resolved unit label.
///
/// The fields are public for reading. Readers in this crate only produce a
/// series through [`SeriesBuilder`], which pushes size and time together;
/// callers building one by hand must keep `sizes` and `times` the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub sizes: Vec<i64>,
    pub times: Vec<f64>,
    pub unit: String,
}

impl Series {
    /// An empty series carrying the given unit.
    pub fn empty(unit: impl Into<String>) -> Self {
        Series {
            sizes: Vec::new(),
            times: Vec::new(),
            unit: unit.into(),
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// `(size, time)` pairs as plot coordinates.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.sizes
            .iter()
            .zip(self.times.iter())
            .map(|(&s, &t)| (s as f64, t))
    }
}

impl Default for Series {
    fn default() -> Self {
        Series::empty(DEFAULT_UNIT)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} samples ({})", self.len(), self.unit)
    }
}

// ---------------------------------------------------------------------------
// SeriesBuilder – accumulator for the per-record fold
// ---------------------------------------------------------------------------

/// Accumulates samples in file order.
///
/// The unit is resolved last-seen-wins: every sample that carries a unit
/// replaces the current one, samples without a unit keep it.
#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    series: Series,
    units_seen: Vec<String>,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::with_unit(DEFAULT_UNIT)
    }

    pub fn with_unit(unit: impl Into<String>) -> Self {
        SeriesBuilder {
            series: Series::empty(unit),
            units_seen: Vec::new(),
        }
    }

    /// Unit a record without `time_unit` would inherit right now.
    pub fn current_unit(&self) -> &str {
        &self.series.unit
    }

    pub fn push(&mut self, sample: Sample) {
        self.series.sizes.push(sample.sample_size);
        self.series.times.push(sample.time_value);
        if let Some(unit) = sample.time_unit {
            if !self.units_seen.contains(&unit) {
                self.units_seen.push(unit.clone());
            }
            self.series.unit = unit;
        }
    }

    /// Distinct units supplied by records, in first-seen order.
    pub fn units_seen(&self) -> &[String] {
        &self.units_seen
    }

    pub fn finish(self) -> (Series, Vec<String>) {
        (self.series, self.units_seen)
    }
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Ingested – the full outcome of one load
// ---------------------------------------------------------------------------

/// Result of reading one input file.
///
/// Record-level problems and the JSON document decode failure are reported
/// here instead of being returned as errors.
#[derive(Debug, Default)]
pub struct Ingested {
    pub series: Series,
    /// Records that were skipped, in file order.
    pub skipped: Vec<super::error::RecordError>,
    /// Set when a JSON document could not be decoded at all.
    pub decode_error: Option<super::error::DocumentDecodeError>,
    /// Distinct units supplied by records, in first-seen order.
    pub units_seen: Vec<String>,
}

impl Ingested {
    pub(crate) fn from_builder(
        builder: SeriesBuilder,
        skipped: Vec<super::error::RecordError>,
    ) -> Self {
        let (series, units_seen) = builder.finish();
        Ingested {
            series,
            skipped,
            decode_error: None,
            units_seen,
        }
    }

    /// True when records disagreed about the time unit.
    pub fn has_mixed_units(&self) -> bool {
        self.units_seen.len() > 1
    }
}
