//! Errors reported before a render starts.
//!
//! Per-pixel problems (degenerate ray directions, numerical edge cases in
//! intersection math) are not errors: the pixel is simply left as "no hit".

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid scene dimensions: {width}x{height}")]
    InvalidSceneDimensions { width: u32, height: u32 },

    #[error("Image buffer holds {actual} pixels, scene needs {expected}")]
    ImageSizeMismatch { expected: usize, actual: usize },

    #[error("Degenerate camera: position and look-at must be finite")]
    DegenerateCamera,

    #[error("Malformed BVH: {0}")]
    MalformedBvh(String),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
