use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::coerce::{self, SAMPLE_SIZE, TIME_UNIT, TIME_VALUE};
use super::error::{DocumentDecodeError, LoadError, LoadResult, RecordError};
use super::model::{Ingested, LEGACY_UNIT, Sample, SeriesBuilder};

/// Initial CSV read buffer. The csv crate grows fields without a size cap,
/// this only avoids repeated reallocation on very wide cells.
const CSV_BUFFER_CAPACITY: usize = 1 << 20;

// ---------------------------------------------------------------------------
// Format dispatch
// ---------------------------------------------------------------------------

/// The closed set of input layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Legacy `<size> <time>` lines. Never chosen by extension.
    DelimitedText,
    Csv,
    Json,
}

impl InputFormat {
    /// Map a path's lower-cased extension to a format. Pure: the file is not
    /// touched.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            other => Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InputFormat::DelimitedText => "delimited text",
            InputFormat::Csv => "CSV",
            InputFormat::Json => "JSON",
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a benchmark series from a `.csv` or `.json` file. Dispatch by extension.
pub fn load_file(path: &Path) -> LoadResult<Ingested> {
    let format = InputFormat::from_path(path)?;
    load_as(path, format)
}

/// Load a benchmark series with an explicitly chosen format.
pub fn load_as(path: &Path, format: InputFormat) -> LoadResult<Ingested> {
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    log::debug!("Reading {} as {}", path.display(), format.name());

    let ingested = match format {
        InputFormat::DelimitedText => read_delimited_str(&std::fs::read_to_string(path)?)?,
        InputFormat::Csv => read_csv(File::open(path)?)?,
        InputFormat::Json => read_json_slice(&std::fs::read(path)?),
    };

    log::info!(
        "Loaded {} from {} ({} skipped)",
        ingested.series,
        path.display(),
        ingested.skipped.len()
    );
    Ok(ingested)
}

fn skip(skipped: &mut Vec<RecordError>, err: RecordError) {
    log::warn!("Skipping {err}");
    skipped.push(err);
}

// ---------------------------------------------------------------------------
// Legacy delimited text (strict)
// ---------------------------------------------------------------------------

/// Parse `<integer> <float>` lines. Blank lines are ignored; any other
/// malformed line fails the whole read.
pub fn read_delimited_str(text: &str) -> LoadResult<Ingested> {
    let mut builder = SeriesBuilder::with_unit(LEGACY_UNIT);

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let strict = |message: String| LoadError::StrictRowParse {
            line: idx + 1,
            raw: trimmed.to_string(),
            message,
        };

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let [size, time] = tokens.as_slice() else {
            return Err(strict(format!(
                "expected 2 whitespace-separated fields, found {}",
                tokens.len()
            )));
        };

        let sample_size = size
            .parse::<i64>()
            .map_err(|e| strict(format!("invalid sample size '{size}': {e}")))?;
        let time_value = time
            .parse::<f64>()
            .map_err(|e| strict(format!("invalid time '{time}': {e}")))?;

        builder.push(Sample {
            sample_size,
            time_value,
            time_unit: None,
        });
    }

    Ok(Ingested::from_builder(builder, Vec::new()))
}

// ---------------------------------------------------------------------------
// CSV (tolerant)
// ---------------------------------------------------------------------------

/// CSV layout: header row, columns located by name.
/// `sample_size`, `time_value` and `time_unit` are read; every other column
/// (e.g. `sample_id`) is ignored. Rows may be shorter than the header.
pub fn read_csv<R: Read>(input: R) -> LoadResult<Ingested> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .buffer_capacity(CSV_BUFFER_CAPACITY)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
    };
    let size_idx = column(SAMPLE_SIZE);
    let time_idx = column(TIME_VALUE);
    let unit_idx = column(TIME_UNIT);

    let mut builder = SeriesBuilder::new();
    let mut skipped = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record_no = row_no + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                skip(
                    &mut skipped,
                    RecordError::Malformed {
                        record: record_no,
                        message: e.to_string(),
                    },
                );
                continue;
            }
        };

        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));
        match coerce::sample_from_text(record_no, cell(size_idx), cell(time_idx), cell(unit_idx)) {
            Ok(sample) => builder.push(sample),
            Err(e) => skip(&mut skipped, e),
        }
    }

    Ok(Ingested::from_builder(builder, skipped))
}

// ---------------------------------------------------------------------------
// JSON (tolerant)
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "sample_id": 1, "time_unit": "ms", "time_value": 0.12, "sample_size": 1000 },
///   ...
/// ]
/// ```
///
/// A document that does not decode (including invalid UTF-8), or whose top
/// level is not an array, yields an empty series and a
/// [`DocumentDecodeError`] in the result.
pub fn read_json_slice(bytes: &[u8]) -> Ingested {
    let root: JsonValue = match serde_json::from_slice(bytes) {
        Ok(root) => root,
        Err(e) => return decode_failure(e.into()),
    };

    let records = match root {
        JsonValue::Array(records) => records,
        other => {
            return decode_failure(DocumentDecodeError::NotAnArray {
                found: json_kind(&other),
            });
        }
    };

    let mut builder = SeriesBuilder::new();
    let mut skipped = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        match coerce::sample_from_json(i + 1, rec) {
            Ok(sample) => builder.push(sample),
            Err(e) => skip(&mut skipped, e),
        }
    }

    Ingested::from_builder(builder, skipped)
}

fn decode_failure(err: DocumentDecodeError) -> Ingested {
    log::error!("Failed to decode JSON: {err}");
    Ingested {
        decode_error: Some(err),
        ..Ingested::default()
    }
}

fn json_kind(val: &JsonValue) -> &'static str {
    match val {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_is_case_insensitive() {
        assert_eq!(
            InputFormat::from_path(Path::new("a/b/results.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("results.Json")).unwrap(),
            InputFormat::Json
        );
    }

    #[test]
    fn dispatch_rejects_other_extensions() {
        match InputFormat::from_path(Path::new("runtime_metrics.txt")) {
            Err(LoadError::UnsupportedFormat { extension }) => assert_eq!(extension, "txt"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            InputFormat::from_path(Path::new("no_extension")),
            Err(LoadError::UnsupportedFormat { extension }) if extension.is_empty()
        ));
    }

    #[test]
    fn csv_ignores_unknown_columns_and_reordering() {
        let input = "sample_id,time_unit,time_value,sample_size\n1,ns,12.5,100\n2,ns,30,200\n";
        let got = read_csv(input.as_bytes()).unwrap();
        assert_eq!(got.series.sizes, vec![100, 200]);
        assert_eq!(got.series.times, vec![12.5, 30.0]);
        assert_eq!(got.series.unit, "ns");
        assert!(got.skipped.is_empty());
    }

    #[test]
    fn csv_short_rows_use_defaults() {
        let input = "sample_size,time_value,time_unit\n5\n";
        let got = read_csv(input.as_bytes()).unwrap();
        assert_eq!(got.series.sizes, vec![5]);
        assert_eq!(got.series.times, vec![0.0]);
        assert_eq!(got.series.unit, "units");
    }

    #[test]
    fn csv_header_only_is_empty() {
        let got = read_csv("sample_size,time_value,time_unit\n".as_bytes()).unwrap();
        assert!(got.series.is_empty());
        assert_eq!(got.series.unit, "units");
    }

    #[test]
    fn csv_very_wide_cells_are_read() {
        let wide = "x".repeat(512 * 1024);
        let input = format!("sample_size,time_value,note\n7,0.5,{wide}\n");
        let got = read_csv(input.as_bytes()).unwrap();
        assert_eq!(got.series.sizes, vec![7]);
    }

    #[test]
    fn json_top_level_object_is_a_decode_error() {
        let got = read_json_slice(br#"{"sample_size": 1}"#);
        assert!(got.series.is_empty());
        assert!(matches!(
            got.decode_error,
            Some(DocumentDecodeError::NotAnArray { found: "an object" })
        ));
    }

    #[test]
    fn json_invalid_utf8_is_a_decode_error() {
        let got = read_json_slice(b"[{\"sample_size\": 1, \"time_unit\": \"\xff\"}]");
        assert!(got.series.is_empty());
        assert_eq!(got.series.unit, "units");
        assert!(matches!(got.decode_error, Some(DocumentDecodeError::Syntax(_))));
    }

    #[test]
    fn json_skips_non_object_elements() {
        let got = read_json_slice(br#"[{"sample_size": 1, "time_value": 0.1}, 42, {"sample_size": 2}]"#);
        assert_eq!(got.series.sizes, vec![1, 2]);
        assert_eq!(got.series.times, vec![0.1, 0.0]);
        assert_eq!(got.skipped, vec![RecordError::NotAnObject { record: 2 }]);
    }

    #[test]
    fn delimited_text_reads_pairs() {
        let got = read_delimited_str("1000 0.0012\n\n5000\t0.0071\n").unwrap();
        assert_eq!(got.series.sizes, vec![1000, 5000]);
        assert_eq!(got.series.times, vec![0.0012, 0.0071]);
        assert_eq!(got.series.unit, LEGACY_UNIT);
    }

    #[test]
    fn delimited_text_is_strict() {
        match read_delimited_str("1000 0.1\nabc 0.2\n3000 0.3\n") {
            Err(LoadError::StrictRowParse { line, raw, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(raw, "abc 0.2");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            read_delimited_str("1000 0.1 extra\n"),
            Err(LoadError::StrictRowParse { line: 1, .. })
        ));
    }
}
