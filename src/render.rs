use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use eframe::egui::FontDefinitions;
use plotters::prelude::*;
use plotters::style::register_font;

use crate::data::Series;

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_TITLE: &str = "Execution Time Growth by Sample Size";

const LINE_COLOUR: RGBColor = RGBColor(31, 119, 180);

/// egui's bundled proportional font, registered as plotters' `sans-serif`.
const FONT_NAME: &str = "Ubuntu-Light";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything the plotting sink needs besides the series itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Open the interactive viewer after writing the image.
    pub display: bool,
}

impl RenderOptions {
    /// Defaults for an input file: image next to it, display enabled.
    pub fn for_input(input: &Path) -> Self {
        RenderOptions {
            output: output_path_for(input),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            display: true,
        }
    }
}

/// `results/bench.csv` → `results/bench.png`.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("png")
}

/// Padded `min..max` of the finite values; `0..1` when there are none.
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - pad)..(hi + pad);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

// ---------------------------------------------------------------------------
// PNG rendering
// ---------------------------------------------------------------------------

fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

    REGISTERED
        .get_or_init(|| {
            let fonts = FontDefinitions::default();
            let data = fonts
                .font_data
                .get(FONT_NAME)
                .ok_or_else(|| format!("font '{FONT_NAME}' is not bundled"))?;
            let bytes: &'static [u8] = match &data.font {
                Cow::Borrowed(bytes) => *bytes,
                Cow::Owned(bytes) => Box::leak(bytes.clone().into_boxed_slice()),
            };
            register_font("sans-serif", FontStyle::Normal, bytes)
                .map_err(|_| format!("font '{FONT_NAME}' is not a valid TrueType font"))
        })
        .clone()
        .map_err(|e| anyhow!("registering plot font: {e}"))
}

/// Draw `series` as a line plot with point markers and write it as PNG.
pub fn render_png(series: &Series, options: &RenderOptions) -> Result<()> {
    ensure_font()?;
    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_range = axis_range(series.sizes.iter().map(|&s| s as f64));
        let y_range = axis_range(series.times.iter().copied());

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 28).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Sample Size")
            .y_desc(format!("Time ({})", series.unit))
            .draw()?;

        chart
            .draw_series(LineSeries::new(series.points(), LINE_COLOUR.stroke_width(2)))?
            .label("Execution Time")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], LINE_COLOUR));
        chart.draw_series(
            series
                .points()
                .map(|p| Circle::new(p, 4, LINE_COLOUR.filled())),
        )?;

        chart
            .configure_series_labels()
            .background_style(WHITE.filled())
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .context("plot buffer does not match image dimensions")?;
    image
        .save_with_format(&options.output, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", options.output.display()))?;

    log::info!("Wrote plot to {}", options.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_swaps_extension() {
        assert_eq!(
            output_path_for(Path::new("data/intro_sort_report.csv")),
            PathBuf::from("data/intro_sort_report.png")
        );
        assert_eq!(
            output_path_for(Path::new("runtime_metrics.txt")),
            PathBuf::from("runtime_metrics.png")
        );
        assert_eq!(output_path_for(Path::new("report")), PathBuf::from("report.png"));
    }

    #[test]
    fn options_for_input_use_defaults() {
        let opts = RenderOptions::for_input(Path::new("bench.json"));
        assert_eq!(opts.output, PathBuf::from("bench.png"));
        assert_eq!((opts.width, opts.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert!(opts.display);
    }

    #[test]
    fn axis_range_pads_span() {
        assert_eq!(axis_range([0.0, 10.0, 4.0]), -0.5..10.5);
    }

    #[test]
    fn axis_range_handles_degenerate_input() {
        assert_eq!(axis_range(Vec::<f64>::new()), 0.0..1.0);
        assert_eq!(axis_range([0.0]), -1.0..1.0);
        assert_eq!(axis_range([5.0, 5.0]), 4.5..5.5);
        assert_eq!(axis_range([f64::NAN, f64::INFINITY]), 0.0..1.0);
    }
}
