use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;

use runtime_plot::app;
use runtime_plot::data::{self, InputFormat};
use runtime_plot::render::{self, RenderOptions};
use runtime_plot::state::AppState;

/// Plot execution time against sample size from a benchmark report.
#[derive(Parser, Debug)]
#[command(name = "runtime-plot")]
#[command(version)]
struct Cli {
    /// Benchmark report (.csv or .json; any file with --legacy)
    path: PathBuf,

    /// Read the legacy `<size> <time>` whitespace-delimited format
    #[arg(long)]
    legacy: bool,

    /// Image to write (defaults to the input path with a .png extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = render::DEFAULT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = render::DEFAULT_HEIGHT)]
    height: u32,

    /// Only write the image, do not open the viewer
    #[arg(
        long,
        env = "RUNTIME_PLOT_NO_DISPLAY",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_display: bool,

    /// Fail instead of warning when records use different time units
    #[arg(long)]
    strict_units: bool,
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::for_input(&self.path);
        if let Some(output) = &self.output {
            options.output = output.clone();
        }
        options.width = self.width;
        options.height = self.height;
        options.display = !self.no_display;
        options
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    ExitCode::from(exit_status(run(Cli::parse())))
}

/// `0` on success; otherwise print the error chain and return `1`.
fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let ingested = if cli.legacy {
        data::load_as(&cli.path, InputFormat::DelimitedText)
    } else {
        data::load_file(&cli.path)
    }
    .with_context(|| format!("loading {}", cli.path.display()))?;

    if ingested.has_mixed_units() {
        let units = ingested.units_seen.join(", ");
        if cli.strict_units {
            bail!("records use different time units ({units})");
        }
        log::warn!(
            "Records use different time units ({units}); plotting with '{}'",
            ingested.series.unit
        );
    }

    let options = cli.render_options();

    render::render_png(&ingested.series, &options).context("rendering plot")?;

    if options.display {
        let state = AppState::new(cli.path, ingested).with_image(options.output);
        app::show(state)?;
    }
    Ok(())
}
