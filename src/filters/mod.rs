//! Filter operations applied by every runner.
//!
//! ## Image Format
//!
//! All filters take a single-channel 8-bit image as an `ArrayView2<u8>` of
//! shape (rows, cols) and return an owned `Array2<u8>` of the same shape.
//!
//! ## Properties
//!
//! - **Pure** - the input is never mutated, so many workers may read it at once
//! - **Deterministic** - the same input and parameters give the same output
//! - **Row-local** - each output row depends on a bounded number of input rows
//!   around it ([`Filter::halo_rows`]), which is what makes band-wise
//!   processing exact
//!
//! ## Filters
//!
//! - **Edge detection**: Canny-style, thresholds from [`FilterParams`]
//! - **Blur**: separable Gaussian, kernel extent and sigma from [`FilterParams`]

pub mod blur;
pub mod core;
pub mod edge;

use std::fmt;

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

/// Tunable parameters for both filters.
///
/// `Default` gives thresholds 50/150 and a 7x7 blur with sigma derived from
/// the kernel extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParams {
    pub edge_low_threshold: f32,
    pub edge_high_threshold: f32,
    /// Blur kernel width and height in pixels (odd)
    pub blur_kernel_extent: usize,
    /// Blur standard deviation; 0.0 derives it from the extent
    pub blur_sigma: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            edge_low_threshold: 50.0,
            edge_high_threshold: 150.0,
            blur_kernel_extent: 7,
            blur_sigma: 0.0,
        }
    }
}

impl FilterParams {
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel_extent == 0 || self.blur_kernel_extent % 2 == 0 {
            return Err(Error::InvalidParams(format!(
                "blur kernel extent must be odd, got {}",
                self.blur_kernel_extent
            )));
        }
        if self.blur_sigma.is_nan() || self.blur_sigma < 0.0 {
            return Err(Error::InvalidParams(format!(
                "blur sigma must be >= 0, got {}",
                self.blur_sigma
            )));
        }
        let thresholds = [self.edge_low_threshold, self.edge_high_threshold];
        if thresholds.iter().any(|t| t.is_nan() || *t < 0.0) {
            return Err(Error::InvalidParams(
                "edge thresholds must be >= 0".to_string(),
            ));
        }
        if self.edge_low_threshold > self.edge_high_threshold {
            return Err(Error::InvalidParams(format!(
                "edge low threshold {} exceeds high threshold {}",
                self.edge_low_threshold, self.edge_high_threshold
            )));
        }
        Ok(())
    }
}

/// Detect edges over a whole region.
pub fn detect_edges(input: ArrayView2<u8>, params: &FilterParams) -> Array2<u8> {
    edge::canny_u8(input, params.edge_low_threshold, params.edge_high_threshold)
}

/// Blur a whole region.
pub fn blur(input: ArrayView2<u8>, params: &FilterParams) -> Array2<u8> {
    blur::gaussian_blur_u8(input, params.blur_kernel_extent, params.blur_sigma)
}

/// One of the two filters, as a value that can be handed to a worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    EdgeDetection,
    Blur,
}

impl Filter {
    pub const ALL: [Filter; 2] = [Filter::EdgeDetection, Filter::Blur];

    pub fn apply(self, input: ArrayView2<u8>, params: &FilterParams) -> Array2<u8> {
        match self {
            Filter::EdgeDetection => detect_edges(input, params),
            Filter::Blur => blur(input, params),
        }
    }

    /// Input rows above and below a row that can change that row's output.
    pub fn halo_rows(self, params: &FilterParams) -> usize {
        match self {
            Filter::EdgeDetection => edge::EDGE_HALO_ROWS,
            Filter::Blur => params.blur_kernel_extent / 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::EdgeDetection => "edge detection",
            Filter::Blur => "blur",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
