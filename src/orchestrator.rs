//! Mode selection and timing of the runners.
//!
//! A run executes the selected parallel strategy (or both, task first), then
//! always executes the sequential strategy last as the reference timing. The
//! sequential pass leaves its results in the buffers, which are identical to
//! what the parallel passes produced.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use ndarray::ArrayView2;
use tracing::info;

use crate::error::{Error, Result};
use crate::filters::FilterParams;
use crate::runners::{run_sequential, run_task_parallel, DataParallelRunner, OutputBuffers};

/// Parallelism strategy picked from the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    TaskParallel,
    DataParallel,
    Both,
}

impl Mode {
    /// Menu shown to the user, one option per line.
    pub const MENU: &'static str =
        "Choose parallelism method:\n1. Task parallelism\n2. Data parallelism\n3. Both\n";

    /// Parse a menu choice (`1`, `2` or `3`, surrounding whitespace ignored).
    pub fn from_choice(choice: &str) -> Result<Self> {
        match choice.trim() {
            "1" => Ok(Mode::TaskParallel),
            "2" => Ok(Mode::DataParallel),
            "3" => Ok(Mode::Both),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }

    fn phases(self) -> &'static [Phase] {
        match self {
            Mode::TaskParallel => &[Phase::TaskParallel],
            Mode::DataParallel => &[Phase::DataParallel],
            Mode::Both => &[Phase::TaskParallel, Phase::DataParallel],
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::from_choice(s)
    }
}

/// A timed stage of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    TaskParallel,
    DataParallel,
    Sequential,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::TaskParallel => "Task parallelism",
            Phase::DataParallel => "Data parallelism",
            Phase::Sequential => "Sequential",
        }
    }
}

/// Wall-clock duration of one phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTiming {
    pub phase: Phase,
    pub elapsed: Duration,
}

impl fmt::Display for PhaseTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} time: {} s", self.phase.label(), self.elapsed.as_secs_f64())
    }
}

/// Filtered images plus the timing of every phase, in execution order.
#[derive(Clone, Debug)]
pub struct Report {
    pub buffers: OutputBuffers,
    pub timings: Vec<PhaseTiming>,
}

/// Number of bands for data parallelism: logical CPUs, at least one.
///
/// Query this once per run and reuse the value for every filter.
pub fn hardware_band_count() -> usize {
    num_cpus::get().max(1)
}

/// Run the phases for `mode`, then the sequential reference, timing each.
pub fn run(
    mode: Mode,
    input: ArrayView2<u8>,
    params: &FilterParams,
    band_count: usize,
) -> Result<Report> {
    params.validate()?;

    let mut buffers = OutputBuffers::from_input(input);
    let data_runner = DataParallelRunner::new(band_count);
    let mut timings = Vec::with_capacity(mode.phases().len() + 1);
    info!(
        ?mode,
        rows = input.nrows(),
        cols = input.ncols(),
        bands = data_runner.band_count(),
        "starting run"
    );

    for &phase in mode.phases() {
        let start = Instant::now();
        match phase {
            Phase::TaskParallel => run_task_parallel(input, &mut buffers, params)?,
            Phase::DataParallel => data_runner.run_both(input, &mut buffers, params)?,
            Phase::Sequential => run_sequential(input, &mut buffers, params),
        }
        timings.push(record(phase, start.elapsed()));
    }

    let start = Instant::now();
    run_sequential(input, &mut buffers, params);
    timings.push(record(Phase::Sequential, start.elapsed()));

    Ok(Report { buffers, timings })
}

fn record(phase: Phase, elapsed: Duration) -> PhaseTiming {
    info!(phase = phase.label(), seconds = elapsed.as_secs_f64(), "phase finished");
    PhaseTiming { phase, elapsed }
}
