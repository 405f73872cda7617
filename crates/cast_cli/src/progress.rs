//! Terminal progress bars for the render loop.

use cast_renderer::RenderProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Two bars: completed rows and completed pixels.
pub struct BarProgress {
    _multi: MultiProgress,
    rows: ProgressBar,
    pixels: ProgressBar,
}

impl BarProgress {
    pub fn new(width: u32, height: u32) -> Self {
        let multi = MultiProgress::new();
        let style = ProgressStyle::with_template("{prefix:>7} [{elapsed_precise}] {wide_bar} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let rows = multi.add(ProgressBar::new(u64::from(height)));
        rows.set_style(style.clone());
        rows.set_prefix("rows");

        let pixels = multi.add(ProgressBar::new(u64::from(width) * u64::from(height)));
        pixels.set_style(style);
        pixels.set_prefix("pixels");

        Self {
            _multi: multi,
            rows,
            pixels,
        }
    }

    pub fn finish(&self) {
        self.rows.finish();
        self.pixels.finish();
    }
}

impl RenderProgress for BarProgress {
    fn row_completed(&self, _y: u32) {
        self.rows.inc(1);
    }

    fn pixel_completed(&self, _x: u32, _y: u32) {
        self.pixels.inc(1);
    }
}
