//! Core utilities shared by the edge and blur filters.
//!
//! This module provides:
//! - Gaussian kernel generation for a fixed kernel extent
//! - Sigma derivation when none is configured
//! - Sobel gradients with edge-clamped borders

use ndarray::{Array2, ArrayView2};

/// Sigma used for a kernel of the given extent when the configured sigma is 0.
///
/// Matches the usual `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8` rule, so a 7x7
/// kernel gets sigma 1.4.
pub fn auto_sigma(extent: usize) -> f32 {
    0.3 * ((extent as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Generate a normalized 1D Gaussian kernel with exactly `extent` taps.
///
/// # Arguments
/// * `extent` - Number of taps, expected odd
/// * `sigma` - Standard deviation; `<= 0.0` derives it from `extent`
///
/// # Returns
/// Normalized 1D kernel as Vec<f32>
pub fn gaussian_kernel_1d(extent: usize, sigma: f32) -> Vec<f32> {
    if extent <= 1 {
        return vec![1.0];
    }

    let sigma = if sigma > 0.0 { sigma } else { auto_sigma(extent) };
    let half = extent / 2;

    let mut kernel: Vec<f32> = (0..extent)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Clamp a signed coordinate into `0..len`. `len` must be non-zero.
#[inline]
pub fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Horizontal and vertical Sobel responses of a grayscale image.
///
/// Out-of-range neighbours are clamped to the nearest edge pixel, so the
/// output has the same shape as the input. Positive `gx` means brighter to the
/// right, positive `gy` brighter downwards.
pub fn sobel_gradients(input: ArrayView2<u8>) -> (Array2<i32>, Array2<i32>) {
    let (height, width) = input.dim();
    let mut gx = Array2::<i32>::zeros((height, width));
    let mut gy = Array2::<i32>::zeros((height, width));
    if height == 0 || width == 0 {
        return (gx, gy);
    }

    let kernel_h: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
    let kernel_v: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

    for y in 0..height {
        for x in 0..width {
            let mut sx = 0i32;
            let mut sy = 0i32;

            for ky in 0..3 {
                let py = clamp_index(y as isize + ky as isize - 1, height);
                for kx in 0..3 {
                    let px = clamp_index(x as isize + kx as isize - 1, width);
                    let v = input[[py, px]] as i32;
                    sx += v * kernel_h[ky][kx];
                    sy += v * kernel_v[ky][kx];
                }
            }

            gx[[y, x]] = sx;
            gy[[y, x]] = sy;
        }
    }

    (gx, gy)
}
