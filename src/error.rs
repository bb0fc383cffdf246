//! Error type shared by the filters, runners and image codec.

use std::path::PathBuf;

/// Errors produced by parfilter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid choice `{0}`: expected 1, 2 or 3")]
    InvalidMode(String),

    #[error("invalid filter parameters: {0}")]
    InvalidParams(String),

    #[error("failed to process image {}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image buffer has the wrong shape")]
    Shape(#[from] ndarray::ShapeError),

    #[error("failed to start worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
