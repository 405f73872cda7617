mod progress;
mod scene_file;

use anyhow::{Context, Result};
use cast_renderer::{render, Bvh, ImageBuffer, RenderConfig, RenderProgress, Scene};
use clap::Parser;
use progress::BarProgress;
use scene_file::SceneFile;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Cast one ray per pixel and paint every hit.
#[derive(Parser, Debug)]
#[command(name = "cast", version, about)]
struct Args {
    /// JSON scene file; renders the built-in demo scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Override the scene's image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the scene's image height
    #[arg(long)]
    height: Option<u32>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,

    /// Image rows handed to each parallel task
    #[arg(long, default_value_t = 1)]
    rows_per_task: usize,

    /// Disable the progress bars
    #[arg(long)]
    no_progress: bool,
}

fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("Image buffer does not match its dimensions")?;
    rgb.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let description = match &args.scene {
        Some(path) => SceneFile::load(path)?,
        None => {
            log::info!("No scene file given, rendering the demo scene");
            SceneFile::demo()
        }
    };
    let width = args.width.unwrap_or(description.width);
    let height = args.height.unwrap_or(description.height);

    let primitives = description.primitives();
    let start = Instant::now();
    let bvh = Bvh::build(&primitives);
    log::info!(
        "Built BVH over {} primitives ({} nodes, depth {}) in {:?}",
        primitives.len(),
        bvh.node_count(),
        bvh.depth(),
        start.elapsed()
    );

    let mut scene = Scene::new(description.camera, description.look_at, width, height);
    let config = RenderConfig::default()
        .with_threads(args.threads)
        .with_rows_per_task(args.rows_per_task);

    let bars = (!args.no_progress).then(|| BarProgress::new(width, height));
    let progress = bars.as_ref().map(|bars| bars as &dyn RenderProgress);

    let stats = render(&mut scene, &primitives, &bvh, &config, progress).context("Render failed")?;
    if let Some(bars) = &bars {
        bars.finish();
    }

    println!("Total intersections: {}", stats.hits);

    save_png(&scene.image, &args.output)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
