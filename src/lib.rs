//! parfilter
//!
//! Edge detection and Gaussian blur on a grayscale image, run three ways so
//! their wall-clock times can be compared:
//! - **Sequential**: both filters on the calling thread
//! - **Task parallelism**: one thread per filter, each over the whole image
//! - **Data parallelism**: the image is split into row bands, one thread per
//!   (band, filter) pair
//!
//! ## Image Format
//! Images are single-channel 8-bit `ndarray::Array2<u8>` with shape
//! (rows, cols). Filters read through `ArrayView2<u8>`.
//!
//! ## Concurrency
//! Each parallel phase gets a fresh rayon pool sized to its task count and
//! joins every task before returning. Band workers write through disjoint
//! mutable views of the output, so no locking is involved.

pub mod error;
pub mod filters;
pub mod io;
pub mod orchestrator;
pub mod partition;
pub mod runners;

pub use error::{Error, Result};
pub use filters::{Filter, FilterParams};
pub use orchestrator::{hardware_band_count, Mode, Phase, PhaseTiming, Report};
pub use partition::{partition_rows, RowBand};
pub use runners::{run_sequential, run_task_parallel, DataParallelRunner, OutputBuffers};
