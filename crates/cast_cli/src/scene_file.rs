//! JSON scene descriptions.
//!
//! ```json
//! {
//!   "camera": [0, 0, 5],
//!   "look_at": [0, 0, -1],
//!   "width": 640,
//!   "height": 480,
//!   "spheres": [{ "center": [0, 0, -10], "radius": 2 }],
//!   "triangles": [{ "a": [-1, -1, -4], "b": [1, -1, -4], "c": [0, 1, -4] }]
//! }
//! ```

use anyhow::{Context, Result};
use cast_renderer::{Hittable, Sphere, Triangle, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleDesc {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub camera: Vec3,
    pub look_at: Vec3,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
    #[serde(default)]
    pub triangles: Vec<TriangleDesc>,
}

impl SceneFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse scene file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Built-in scene: a wall of spheres behind a pair of floor triangles.
    pub fn demo() -> Self {
        let mut spheres = Vec::new();
        for row in -3..=3 {
            for col in -4..=4 {
                spheres.push(SphereDesc {
                    center: Vec3::new(col as f64 * 2.5, row as f64 * 2.5, -14.0),
                    radius: 0.9 + 0.1 * ((row + col) % 3) as f64,
                });
            }
        }

        let floor = |x: f64, z: f64| Vec3::new(x, -9.0, z);
        let triangles = vec![
            TriangleDesc {
                a: floor(-12.0, -2.0),
                b: floor(12.0, -2.0),
                c: floor(12.0, -20.0),
            },
            TriangleDesc {
                a: floor(-12.0, -2.0),
                b: floor(12.0, -20.0),
                c: floor(-12.0, -20.0),
            },
        ];

        Self {
            camera: Vec3::new(0.0, 0.0, 4.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            width: 640,
            height: 480,
            spheres,
            triangles,
        }
    }

    /// Build the primitive list, skipping shapes that can never be hit.
    pub fn primitives(&self) -> Vec<Box<dyn Hittable>> {
        let mut primitives: Vec<Box<dyn Hittable>> =
            Vec::with_capacity(self.spheres.len() + self.triangles.len());

        for (i, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0) || !sphere.center.is_finite() {
                log::warn!("Skipping degenerate sphere {}: {:?}", i, sphere);
                continue;
            }
            primitives.push(Box::new(Sphere::new(sphere.center, sphere.radius)));
        }

        for (i, triangle) in self.triangles.iter().enumerate() {
            let shape = Triangle::new(triangle.a, triangle.b, triangle.c);
            if shape.is_degenerate() {
                log::warn!("Skipping degenerate triangle {}: {:?}", i, triangle);
                continue;
            }
            primitives.push(Box::new(shape));
        }

        primitives
    }
}
