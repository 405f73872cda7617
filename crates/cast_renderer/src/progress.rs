//! Progress reporting hooks for the render loop.
//!
//! Hooks are called concurrently from every render worker and never affect
//! what gets rendered.

use std::sync::atomic::{AtomicU64, Ordering};

/// Observer notified as pixels and rows finish.
pub trait RenderProgress: Sync {
    /// Called once after every pixel of row `y` has been written.
    fn row_completed(&self, _y: u32) {}

    /// Called after pixel (x, y) has been processed, hit or not.
    fn pixel_completed(&self, _x: u32, _y: u32) {}
}

/// Progress sink backed by atomic counters.
#[derive(Debug, Default)]
pub struct AtomicProgress {
    rows: AtomicU64,
    pixels: AtomicU64,
}

impl AtomicProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_completed(&self) -> u64 {
        self.rows.load(Ordering::Relaxed)
    }

    pub fn pixels_completed(&self) -> u64 {
        self.pixels.load(Ordering::Relaxed)
    }
}

impl RenderProgress for AtomicProgress {
    fn row_completed(&self, _y: u32) {
        self.rows.fetch_add(1, Ordering::Relaxed);
    }

    fn pixel_completed(&self, _x: u32, _y: u32) {
        self.pixels.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_progress_counts() {
        let progress = AtomicProgress::new();
        std::thread::scope(|s| {
            for y in 0..4 {
                let progress = &progress;
                s.spawn(move || {
                    for x in 0..10 {
                        progress.pixel_completed(x, y);
                    }
                    progress.row_completed(y);
                });
            }
        });

        assert_eq!(progress.rows_completed(), 4);
        assert_eq!(progress.pixels_completed(), 40);
    }
}
