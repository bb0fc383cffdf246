use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use parfilter::io::{load_grayscale, save_grayscale};
use parfilter::{hardware_band_count, orchestrator, FilterParams, Mode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT: &str = "img/input.jpg";
const DEFAULT_EDGES_OUTPUT: &str = "img/edge.jpg";
const DEFAULT_BLUR_OUTPUT: &str = "img/blur.jpg";

/// Overrides the detected band count for data parallelism.
const BANDS_ENV: &str = "PARFILTER_BANDS";

struct Paths {
    input: PathBuf,
    edges: PathBuf,
    blurred: PathBuf,
}

impl Paths {
    /// `parfilter [INPUT] [EDGES_OUT] [BLUR_OUT]`
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut next = |default: &str| args.next().map_or_else(|| default.into(), PathBuf::from);
        let paths = Self {
            input: next(DEFAULT_INPUT),
            edges: next(DEFAULT_EDGES_OUTPUT),
            blurred: next(DEFAULT_BLUR_OUTPUT),
        };
        if let Some(extra) = args.next() {
            bail!("unexpected argument `{extra}`; usage: parfilter [INPUT] [EDGES_OUT] [BLUR_OUT]");
        }
        Ok(paths)
    }
}

fn band_count() -> Result<usize> {
    match env::var(BANDS_ENV) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{BANDS_ENV} must be a positive integer, got `{value}`")),
        Err(_) => Ok(hardware_band_count()),
    }
}

fn read_mode() -> Result<Mode> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(Mode::MENU.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read choice from stdin")?;
    Ok(Mode::from_choice(&line)?)
}

fn run() -> Result<()> {
    let paths = Paths::from_args(env::args().skip(1))?;
    let input = load_grayscale(&paths.input)?;

    let mode = read_mode()?;
    let bands = band_count()?;
    debug!(?mode, bands, "mode selected");

    let report = orchestrator::run(mode, input.view(), &FilterParams::default(), bands)?;
    for timing in &report.timings {
        println!("{timing}");
    }

    save_grayscale(&paths.edges, report.buffers.edges.view())?;
    save_grayscale(&paths.blurred, report.buffers.blurred.view())?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(-1);
    }
}
