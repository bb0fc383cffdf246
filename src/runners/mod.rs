//! Strategies for applying both filters to one image.
//!
//! Every runner reads the input through a shared `ArrayView2` and writes into
//! [`OutputBuffers`]. Parallel runners build a fresh thread pool sized to the
//! number of tasks in their phase and spawn those tasks inside
//! [`rayon::ThreadPool::scope`]; the scope returns only once every task has
//! finished, so buffers are complete as soon as a runner returns.

pub mod data;
pub mod sequential;
pub mod task;

use ndarray::{Array2, ArrayView2};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

pub use data::DataParallelRunner;
pub use sequential::run_sequential;
pub use task::run_task_parallel;

/// Destination images for the two filters.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputBuffers {
    pub edges: Array2<u8>,
    pub blurred: Array2<u8>,
}

impl OutputBuffers {
    /// Both buffers start as copies of the input.
    pub fn from_input(input: ArrayView2<u8>) -> Self {
        Self {
            edges: input.to_owned(),
            blurred: input.to_owned(),
        }
    }
}

/// Thread pool with exactly `workers` threads (at least one) for one phase.
pub(crate) fn phase_pool(phase: &str, workers: usize) -> Result<ThreadPool> {
    let phase = phase.to_string();
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(move |i| format!("{phase}-{i}"))
        .build()?;
    Ok(pool)
}
