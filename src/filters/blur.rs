//! Gaussian blur for grayscale images.
//!
//! Uses a separable 2-pass convolution with a fixed kernel extent and
//! edge-clamped borders.

use ndarray::{Array2, ArrayView2};

use super::core::{clamp_index, gaussian_kernel_1d};

/// Apply Gaussian blur to a grayscale image.
///
/// # Arguments
/// * `input` - Grayscale image (height, width) as u8
/// * `extent` - Kernel width and height in pixels (odd)
/// * `sigma` - Standard deviation; `<= 0.0` derives it from `extent`
///
/// # Returns
/// Blurred image with same dimensions
pub fn gaussian_blur_u8(input: ArrayView2<u8>, extent: usize, sigma: f32) -> Array2<u8> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 || extent <= 1 {
        return input.to_owned();
    }

    let kernel = gaussian_kernel_1d(extent, sigma);
    let half = kernel.len() / 2;

    // Work in f32 for precision
    let mut temp = Array2::<f32>::zeros((height, width));

    // Horizontal pass
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = clamp_index(x as isize + ki as isize - half as isize, width);
                sum += input[[y, sx]] as f32 * kv;
            }
            temp[[y, x]] = sum;
        }
    }

    // Vertical pass, straight back to u8
    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = clamp_index(y as isize + ki as isize - half as isize, height);
                sum += temp[[sy, x]] * kv;
            }
            output[[y, x]] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }

    output
}
