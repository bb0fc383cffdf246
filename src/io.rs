//! Grayscale image codec backed by the `image` crate.
//!
//! - `load_grayscale`: decode any supported file (PNG, JPEG) into an owned
//!   8-bit `Array2<u8>`, converting colour images to luma.
//! - `save_grayscale`: encode an `Array2<u8>` with the format implied by the
//!   path's extension.

use std::path::Path;

use image::GrayImage;
use ndarray::{Array2, ArrayView2, ErrorKind, ShapeError};
use tracing::debug;

use crate::error::{Error, Result};

/// Load an image from disk as 8-bit grayscale, shape (rows, cols).
pub fn load_grayscale(path: &Path) -> Result<Array2<u8>> {
    let img = image::open(path)
        .map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();

    let (width, height) = img.dimensions();
    debug!(?path, width, height, "loaded image");
    let pixels = Array2::from_shape_vec((height as usize, width as usize), img.into_raw())?;
    Ok(pixels)
}

/// Write a grayscale image to disk.
pub fn save_grayscale(path: &Path, image: ArrayView2<u8>) -> Result<()> {
    let (rows, cols) = image.dim();
    // Logical (row-major) order regardless of the view's memory layout
    let data: Vec<u8> = image.iter().copied().collect();
    let buffer = GrayImage::from_raw(cols as u32, rows as u32, data)
        .ok_or_else(|| ShapeError::from_kind(ErrorKind::OutOfBounds))?;

    buffer.save(path).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(?path, rows, cols, "saved image");
    Ok(())
}
