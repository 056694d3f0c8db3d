use glam::Mat4;

use super::fly::FlyCamera;

//
// ──────────────────────────────────────────────────────────────
//   Perspective projection
//
//   The camera only owns the field of view; aspect ratio and
//   clip planes belong to the surface it is drawn into.
// ──────────────────────────────────────────────────────────────
//

pub const DEFAULT_ZNEAR: f32 = 0.1;
pub const DEFAULT_ZFAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection
{
  pub aspect: f32,
  pub znear: f32,
  pub zfar: f32,
}

impl Projection
{
  pub fn new(width: u32, height: u32) -> Self
  {
    let mut proj = Self { aspect: 1.0, znear: DEFAULT_ZNEAR, zfar: DEFAULT_ZFAR };
    proj.resize(width, height);
    proj
  }

  /// Zero-sized surfaces (minimised windows) keep the previous aspect.
  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.aspect = width as f32 / height as f32;
  }

  /// Right-handed perspective with 0..1 depth, `fov_degrees` vertical.
  pub fn matrix(&self, fov_degrees: f32) -> Mat4
  {
    Mat4::perspective_rh(fov_degrees.to_radians(), self.aspect, self.znear, self.zfar)
  }

  pub fn view_proj(&self, camera: &FlyCamera) -> Mat4
  {
    self.matrix(camera.zoom()) * camera.view_matrix()
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use glam::{Vec3, Vec4};

  #[test]
  fn aspect_follows_surface_size()
  {
    let proj = Projection::new(800, 600);
    assert!((proj.aspect - 800.0 / 600.0).abs() < 1e-6);
    assert_eq!(proj.znear, 0.1);
    assert_eq!(proj.zfar, 100.0);
  }

  #[test]
  fn zero_sized_resize_is_ignored()
  {
    let mut proj = Projection::new(1600, 900);
    proj.resize(0, 900);
    proj.resize(1600, 0);
    assert!((proj.aspect - 16.0 / 9.0).abs() < 1e-6);
  }

  #[test]
  fn narrower_fov_magnifies()
  {
    let proj = Projection::new(800, 600);
    let wide = proj.matrix(45.0);
    let narrow = proj.matrix(10.0);
    assert!(narrow.y_axis.y > wide.y_axis.y);
  }

  #[test]
  fn point_in_front_of_camera_lands_inside_clip_volume()
  {
    let cam = FlyCamera::new(Vec3::new(0.0, 0.0, 3.0));
    let proj = Projection::new(800, 600);

    let clip = proj.view_proj(&cam) * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;

    assert!(clip.w > 0.0);
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
  }
}
