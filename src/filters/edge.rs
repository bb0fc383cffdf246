//! Canny-style edge detection for grayscale images.
//!
//! Stages:
//! 1. Sobel gradients, L1 magnitude `|gx| + |gy|`
//! 2. Non-maximum suppression along the quantized gradient direction
//! 3. Double threshold (`> high` strong, `> low` weak)
//! 4. Hysteresis: a weak pixel survives when one of its 8 neighbours is strong
//!
//! Hysteresis looks at direct neighbours only, so every output row depends on
//! at most [`EDGE_HALO_ROWS`] input rows above and below it.
//!
//! Output is binary: 255 on edges, 0 elsewhere.

use ndarray::{Array2, ArrayView2};

use super::core::sobel_gradients;

/// Rows of context above and below a row that influence its edge output:
/// one each for the gradient, suppression and hysteresis stages.
pub const EDGE_HALO_ROWS: usize = 3;

// tan(22.5 deg)
const TAN_22_5_DEG: f32 = 0.414_213_56;

/// Thin gradient magnitudes to one-pixel ridges.
///
/// The outermost frame is always suppressed. A pixel must beat the neighbour
/// before it and match the one after it, so a two-pixel plateau keeps only
/// its first pixel.
fn non_max_suppression(gx: &Array2<i32>, gy: &Array2<i32>) -> Array2<i32> {
    let (height, width) = gx.dim();
    let mut mag = Array2::<i32>::zeros((height, width));
    for ((y, x), m) in mag.indexed_iter_mut() {
        *m = gx[[y, x]].abs() + gy[[y, x]].abs();
    }

    let mut thin = Array2::<i32>::zeros((height, width));
    if height < 3 || width < 3 {
        return thin;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let m = mag[[y, x]];
            if m == 0 {
                continue;
            }

            let ax = gx[[y, x]].abs() as f32;
            let ay = gy[[y, x]].abs() as f32;
            let same_sign = (gx[[y, x]] >= 0) == (gy[[y, x]] >= 0);

            let (before, after) = if ay <= ax * TAN_22_5_DEG {
                (mag[[y, x - 1]], mag[[y, x + 1]])
            } else if ax <= ay * TAN_22_5_DEG {
                (mag[[y - 1, x]], mag[[y + 1, x]])
            } else if same_sign {
                (mag[[y - 1, x - 1]], mag[[y + 1, x + 1]])
            } else {
                (mag[[y - 1, x + 1]], mag[[y + 1, x - 1]])
            };

            if m > before && m >= after {
                thin[[y, x]] = m;
            }
        }
    }

    thin
}

/// Detect edges - u8 version.
///
/// # Arguments
/// * `input` - Grayscale image (height, width)
/// * `low_threshold` - Magnitudes above this are weak edge candidates
/// * `high_threshold` - Magnitudes above this are strong edges
///
/// # Returns
/// Binary edge map with the same dimensions (255 = edge)
pub fn canny_u8(input: ArrayView2<u8>, low_threshold: f32, high_threshold: f32) -> Array2<u8> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 {
        return Array2::<u8>::zeros((height, width));
    }

    let (gx, gy) = sobel_gradients(input);
    let thin = non_max_suppression(&gx, &gy);
    hysteresis(&thin, low_threshold, high_threshold)
}

/// Keep strong pixels and the weak pixels directly touching one.
fn hysteresis(thin: &Array2<i32>, low_threshold: f32, high_threshold: f32) -> Array2<u8> {
    let (height, width) = thin.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    let strong = thin.mapv(|m| m as f32 > high_threshold);

    for y in 0..height {
        for x in 0..width {
            if strong[[y, x]] {
                output[[y, x]] = 255;
                continue;
            }
            if thin[[y, x]] as f32 <= low_threshold {
                continue;
            }

            let y0 = y.saturating_sub(1);
            let y1 = (y + 1).min(height - 1);
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(width - 1);
            let connected = (y0..=y1).any(|ny| (x0..=x1).any(|nx| strong[[ny, nx]]));
            if connected {
                output[[y, x]] = 255;
            }
        }
    }

    output
}
