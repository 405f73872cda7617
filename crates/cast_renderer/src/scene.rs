//! Scene descriptor and primary ray generation.

use crate::{ImageBuffer, RenderError};
use cast_math::{Ray, Vec3};

/// Map a pixel coordinate to normalized device coordinates in `[-1, 1]`.
///
/// Samples the pixel center: `((coord + 0.5) / dimension - 0.5) * 2`.
#[inline]
pub fn pixel_offset(coord: u32, dimension: u32) -> f64 {
    ((coord as f64 + 0.5) / dimension as f64 - 0.5) * 2.0
}

/// Camera position, view direction, and the image being rendered.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Ray origin for every pixel
    pub camera: Vec3,
    /// View direction; pixel offsets are added to it before normalization
    pub look_at: Vec3,
    pub width: u32,
    pub height: u32,
    /// Output image, written in place by the renderer
    pub image: ImageBuffer,
}

impl Scene {
    /// Create a scene with a freshly allocated (black) image.
    pub fn new(camera: Vec3, look_at: Vec3, width: u32, height: u32) -> Self {
        Self {
            camera,
            look_at,
            width,
            height,
            image: ImageBuffer::new(width, height),
        }
    }

    /// Structural checks that must pass before any pixel work starts.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSceneDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let expected = self.width as usize * self.height as usize;
        if self.image.width != self.width
            || self.image.height != self.height
            || self.image.pixels.len() != expected
        {
            return Err(RenderError::ImageSizeMismatch {
                expected,
                actual: self.image.pixels.len(),
            });
        }

        if !self.camera.is_finite() || !self.look_at.is_finite() {
            return Err(RenderError::DegenerateCamera);
        }

        Ok(())
    }

    /// The immutable part of the scene that workers need to build rays.
    pub fn view_plane(&self) -> ViewPlane {
        ViewPlane {
            camera: self.camera,
            look_at: self.look_at,
            width: self.width,
            height: self.height,
        }
    }
}

/// Everything needed to turn a pixel coordinate into a primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPlane {
    pub camera: Vec3,
    pub look_at: Vec3,
    pub width: u32,
    pub height: u32,
}

impl ViewPlane {
    /// Unnormalized direction through the center of pixel (x, y).
    pub fn direction(&self, x: u32, y: u32) -> Vec3 {
        let offset_x = pixel_offset(x, self.width);
        let offset_y = pixel_offset(y, self.height);
        self.look_at + Vec3::new(offset_x, offset_y, 0.0)
    }

    /// Unit-direction ray through pixel (x, y).
    ///
    /// `None` when the offset look-at vector has zero length; the pixel is
    /// then treated as a miss.
    pub fn primary_ray(&self, x: u32, y: u32) -> Option<Ray> {
        Ray::normalized(self.camera, self.direction(x, y))
    }
}
