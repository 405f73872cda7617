//! Render loop.
//!
//! Casts one ray per pixel center, asks the BVH for the nearest hit and
//! paints hit pixels a single flat color. Rows are split into bands that
//! rayon renders in parallel; each band owns a disjoint slice of the image,
//! so the hot path takes no locks.

use crate::{Bvh, HitRecord, Hittable, RenderError, RenderProgress, Scene, ViewPlane};
use cast_math::Vec3;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Linear RGB color in `[0, 1]`.
pub type Color = Vec3;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Color written to every pixel whose ray hits a primitive
    pub hit_color: Color,
    /// Worker threads; 0 uses rayon's global pool
    pub threads: usize,
    /// Rows per parallel task
    pub rows_per_task: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hit_color: Color::new(0.0, 0.0, 1.0),
            threads: 0,
            rows_per_task: 1,
        }
    }
}

impl RenderConfig {
    pub fn with_hit_color(mut self, hit_color: Color) -> Self {
        self.hit_color = hit_color;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_rows_per_task(mut self, rows_per_task: usize) -> Self {
        self.rows_per_task = rows_per_task;
        self
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Pixels whose ray hit a primitive
    pub hits: u64,
    /// Pixels processed
    pub pixels: u64,
    pub elapsed: Duration,
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Convert to packed 8-bit RGB (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Convert a linear color to 8-bit RGB without gamma correction.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}

/// Cast the primary ray of pixel (x, y) into the scene.
///
/// A pixel whose ray direction degenerates to zero is a miss.
pub fn cast_pixel(
    view: &ViewPlane,
    primitives: &[Box<dyn Hittable>],
    bvh: &Bvh,
    x: u32,
    y: u32,
) -> Option<HitRecord> {
    let ray = view.primary_ray(x, y)?;
    bvh.hit(primitives, &ray)
}

/// Render one row into `row`, returning the number of hit pixels.
fn render_row(
    view: &ViewPlane,
    primitives: &[Box<dyn Hittable>],
    bvh: &Bvh,
    hit_color: Color,
    y: u32,
    row: &mut [Color],
    progress: Option<&dyn RenderProgress>,
) -> u64 {
    let mut hits = 0;

    for (x, pixel) in row.iter_mut().enumerate() {
        let x = x as u32;
        if cast_pixel(view, primitives, bvh, x, y).is_some() {
            *pixel = hit_color;
            hits += 1;
        }
        if let Some(progress) = progress {
            progress.pixel_completed(x, y);
        }
    }

    if let Some(progress) = progress {
        progress.row_completed(y);
    }
    hits
}

/// Render the scene into `scene.image`.
///
/// Hit pixels are overwritten with `config.hit_color`; missed pixels keep
/// whatever the image held before. The result is identical for any thread
/// count or band size.
pub fn render(
    scene: &mut Scene,
    primitives: &[Box<dyn Hittable>],
    bvh: &Bvh,
    config: &RenderConfig,
    progress: Option<&dyn RenderProgress>,
) -> Result<RenderStats, RenderError> {
    scene.validate()?;
    bvh.validate(primitives.len())?;

    let view = scene.view_plane();
    let width = scene.width as usize;
    // A band never spans more than the whole image, so the chunk size stays
    // within the pixel count
    let rows_per_task = config.rows_per_task.clamp(1, scene.height as usize);
    let hit_color = config.hit_color;

    log::info!(
        "Rendering {}x{} against {} primitives ({} BVH nodes)",
        scene.width,
        scene.height,
        primitives.len(),
        bvh.node_count()
    );
    log::debug!("Render config: {:?}", config);

    let start = Instant::now();
    let pixels = &mut scene.image.pixels;

    let hits = with_thread_pool(config.threads, || {
        pixels
            .par_chunks_mut(width * rows_per_task)
            .enumerate()
            .map(|(band, band_pixels)| {
                let first_row = band * rows_per_task;
                band_pixels
                    .chunks_mut(width)
                    .enumerate()
                    .map(|(offset, row)| {
                        let y = (first_row + offset) as u32;
                        render_row(&view, primitives, bvh, hit_color, y, row, progress)
                    })
                    .sum::<u64>()
            })
            .sum::<u64>()
    })?;

    let stats = RenderStats {
        hits,
        pixels: width as u64 * scene.height as u64,
        elapsed: start.elapsed(),
    };

    log::info!(
        "Total intersections: {} of {} pixels in {:?}",
        stats.hits,
        stats.pixels,
        stats.elapsed
    );

    Ok(stats)
}

/// Run `f` on a dedicated pool of `threads` workers, or on rayon's global
/// pool when `threads` is 0.
fn with_thread_pool<T: Send>(
    threads: usize,
    f: impl FnOnce() -> T + Send,
) -> Result<T, RenderError> {
    if threads == 0 {
        return Ok(f());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    Ok(pool.install(f))
}
