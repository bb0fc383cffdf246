//! Baseline: both filters, one after the other, on the calling thread.

use ndarray::ArrayView2;
use tracing::debug;

use super::OutputBuffers;
use crate::filters::{blur, detect_edges, FilterParams};

pub fn run_sequential(input: ArrayView2<u8>, buffers: &mut OutputBuffers, params: &FilterParams) {
    debug!(rows = input.nrows(), cols = input.ncols(), "sequential run");
    buffers.edges.assign(&detect_edges(input, params));
    buffers.blurred.assign(&blur(input, params));
}
