use cast_renderer::{
    cast_pixel, nearest_hit_linear, render, AtomicProgress, Bvh, Color, Hittable, Ray,
    RenderConfig, RenderError, Scene, Sphere, Triangle, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_vec(rng: &mut StdRng, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}

/// A seeded mix of spheres and triangles scattered around the origin.
fn random_scene(seed: u64, count: usize) -> Vec<Box<dyn Hittable>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut primitives: Vec<Box<dyn Hittable>> = Vec::with_capacity(count);

    for i in 0..count {
        let center = random_vec(&mut rng, -5.0, 5.0);
        if i % 3 == 0 {
            primitives.push(Box::new(Triangle::new(
                center + random_vec(&mut rng, -1.0, 1.0),
                center + random_vec(&mut rng, -1.0, 1.0),
                center + random_vec(&mut rng, -1.0, 1.0),
            )));
        } else {
            primitives.push(Box::new(Sphere::new(center, rng.gen_range(0.2..1.0))));
        }
    }

    primitives
}

fn test_scene(width: u32, height: u32) -> Scene {
    Scene::new(Vec3::new(0.0, 0.0, 12.0), Vec3::new(0.0, 0.0, -1.5), width, height)
}

#[test]
fn bvh_hit_matches_bruteforce() {
    let primitives = random_scene(1, 96);
    let bvh = Bvh::build(&primitives);
    let mut rng = StdRng::seed_from_u64(7);
    let mut hits = 0;

    for _ in 0..2000 {
        let origin = random_vec(&mut rng, -8.0, 8.0);
        let Some(ray) = Ray::normalized(origin, random_vec(&mut rng, -1.0, 1.0)) else {
            continue;
        };

        let brute = nearest_hit_linear(&primitives, &ray);
        let accelerated = bvh.hit(&primitives, &ray);

        assert_eq!(brute.is_some(), accelerated.is_some(), "ray {:?}", ray);
        if let (Some(a), Some(b)) = (brute, accelerated) {
            assert!((a.t - b.t).abs() < 1e-9, "ray {:?}: {} vs {}", ray, a.t, b.t);
            hits += 1;
        }
    }

    // Make sure the comparison exercised both outcomes.
    assert!(hits > 100);
    assert!(hits < 2000);
}

#[test]
fn empty_scene_has_no_hits() {
    init_logging();
    let mut scene = test_scene(16, 9);

    let stats = render(&mut scene, &[], &Bvh::empty(), &RenderConfig::default(), None).unwrap();

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.pixels, 16 * 9);
    assert!(scene.image.pixels.iter().all(|&p| p == Color::ZERO));
}

#[test]
fn frame_filling_sphere_hits_every_pixel() {
    init_logging();
    let primitives: Vec<Box<dyn Hittable>> =
        vec![Box::new(Sphere::new(Vec3::new(0.0, 0.0, -20.0), 10.0))];
    let bvh = Bvh::build(&primitives);
    let (width, height) = (40, 30);
    let mut scene = Scene::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0), width, height);

    let stats = render(&mut scene, &primitives, &bvh, &RenderConfig::default(), None).unwrap();

    assert_eq!(stats.hits, u64::from(width * height));
    assert!(scene
        .image
        .pixels
        .iter()
        .all(|&p| p == Color::new(0.0, 0.0, 1.0)));
}

#[test]
fn zero_direction_pixel_is_a_miss() {
    // The camera sits inside a sphere, so every valid ray hits it. Pixel
    // (0, 0) of a 2x2 image has offset (-0.5, -0.5), which cancels look_at.
    let primitives: Vec<Box<dyn Hittable>> = vec![Box::new(Sphere::new(Vec3::ZERO, 10.0))];
    let bvh = Bvh::build(&primitives);
    let mut scene = Scene::new(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.0), 2, 2);

    let view = scene.view_plane();
    assert!(cast_pixel(&view, &primitives, &bvh, 0, 0).is_none());

    let stats = render(&mut scene, &primitives, &bvh, &RenderConfig::default(), None).unwrap();

    assert_eq!(stats.hits, 3);
    assert_eq!(scene.image.get(0, 0), Color::ZERO);
    assert!(scene.image.pixels.iter().all(|p| p.is_finite()));
}

#[test]
fn corner_pixels_map_to_expected_offsets() {
    let view = Scene::new(Vec3::ZERO, Vec3::ZERO, 4, 4).view_plane();

    assert_eq!(view.direction(0, 0), Vec3::new(-0.75, -0.75, 0.0));
    assert_eq!(view.direction(3, 3), Vec3::new(0.75, 0.75, 0.0));
}

#[test]
fn rendering_is_idempotent() {
    let primitives = random_scene(3, 64);
    let bvh = Bvh::build(&primitives);
    let config = RenderConfig::default();

    let mut first = test_scene(48, 32);
    let first_stats = render(&mut first, &primitives, &bvh, &config, None).unwrap();
    let mut second = test_scene(48, 32);
    let second_stats = render(&mut second, &primitives, &bvh, &config, None).unwrap();

    assert!(first_stats.hits > 0);
    assert_eq!(first_stats.hits, second_stats.hits);
    assert_eq!(first.image, second.image);
}

#[test]
fn worker_count_and_band_size_do_not_change_output() {
    let primitives = random_scene(5, 64);
    let bvh = Bvh::build(&primitives);

    let mut reference = test_scene(37, 23);
    let reference_stats = render(
        &mut reference,
        &primitives,
        &bvh,
        &RenderConfig::default().with_threads(1),
        None,
    )
    .unwrap();

    for (threads, rows_per_task) in [(2, 1), (4, 3), (8, 7), (3, 100)] {
        let mut scene = test_scene(37, 23);
        let config = RenderConfig::default()
            .with_threads(threads)
            .with_rows_per_task(rows_per_task);
        let stats = render(&mut scene, &primitives, &bvh, &config, None).unwrap();

        assert_eq!(stats.hits, reference_stats.hits);
        assert_eq!(scene.image, reference.image);
    }
}

#[test]
fn image_matches_per_pixel_cast() {
    let primitives = random_scene(11, 32);
    let bvh = Bvh::build(&primitives);
    let mut scene = test_scene(20, 20);
    let view = scene.view_plane();

    render(&mut scene, &primitives, &bvh, &RenderConfig::default(), None).unwrap();

    for y in 0..20 {
        for x in 0..20 {
            let expected = match cast_pixel(&view, &primitives, &bvh, x, y) {
                Some(_) => Color::new(0.0, 0.0, 1.0),
                None => Color::ZERO,
            };
            assert_eq!(scene.image.get(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn zero_width_scene_is_rejected_without_progress() {
    init_logging();
    let primitives = random_scene(11, 8);
    let bvh = Bvh::build(&primitives);
    let mut scene = Scene::new(Vec3::ZERO, Vec3::NEG_Z, 0, 4);
    let progress = AtomicProgress::new();

    let result = render(&mut scene, &primitives, &bvh, &RenderConfig::default(), Some(&progress));

    assert!(matches!(
        result,
        Err(RenderError::InvalidSceneDimensions { width: 0, height: 4 })
    ));
    assert_eq!(progress.rows_completed(), 0);
    assert_eq!(progress.pixels_completed(), 0);
}
