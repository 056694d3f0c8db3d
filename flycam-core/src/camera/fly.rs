use glam::{Mat4, Vec2, Vec3};

use crate::config::{CameraConfig, CameraSettings};

//
// ──────────────────────────────────────────────────────────────
//   Fly camera (right-handed, Y-up, looks down -Z by default)
//
//   Orientation is stored as Euler angles in degrees:
//     yaw   = rotation about world up, unbounded
//     pitch = elevation above the horizon, clamped
//
//   `front` is always derived from yaw/pitch and kept unit length.
// ──────────────────────────────────────────────────────────────
//

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Discrete movement directions fed from held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement
{
  Forward,
  Backward,
  Left,
  Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera
{
  position: Vec3,
  front: Vec3,
  up: Vec3,

  yaw: f32,
  pitch: f32,
  zoom: f32,

  last_cursor: Option<Vec2>,
  settings: CameraSettings,
}

//
// ──────────────────────────────────────────────────────────────
//   Construction
// ──────────────────────────────────────────────────────────────
//

impl FlyCamera
{
  /// Camera at `position` with Y up, yaw -90°, pitch 0° and a 45° field of view.
  pub fn new(position: Vec3) -> Self
  {
    Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH, DEFAULT_ZOOM)
  }

  pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32, zoom: f32) -> Self
  {
    Self::with_settings(position, world_up, yaw, pitch, zoom, CameraSettings::default())
  }

  /// Any settings are accepted; they are [`sanitized`](CameraSettings::sanitized) first.
  pub fn with_settings(
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    settings: CameraSettings,
  ) -> Self
  {
    let settings = settings.sanitized();

    let mut cam = Self {
      position,
      front: Vec3::NEG_Z,
      up: world_up.try_normalize().unwrap_or(Vec3::Y),
      yaw,
      pitch: settings.clamp_pitch(pitch),
      zoom: settings.clamp_zoom(zoom),
      last_cursor: None,
      settings,
    };

    cam.update_front();
    cam
  }

  /// Build a camera from a (validated) configuration.
  pub fn from_config(config: &CameraConfig) -> Self
  {
    Self::with_settings(
      config.position,
      config.world_up,
      config.yaw,
      config.pitch,
      config.zoom,
      config.settings.clone(),
    )
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Input operations
// ──────────────────────────────────────────────────────────────
//

impl FlyCamera
{
  /// Move along the look direction or strafe, scaled by frame time.
  /// Negative `elapsed_seconds` is treated as zero.
  pub fn apply_movement(&mut self, direction: Movement, elapsed_seconds: f32)
  {
    let speed = self.settings.movement_speed * elapsed_seconds.max(0.0);

    match direction
    {
      Movement::Forward => self.position += self.front * speed,
      Movement::Backward => self.position -= self.front * speed,
      Movement::Left => self.position -= self.right() * speed,
      Movement::Right => self.position += self.right() * speed,
    }
  }

  /// Feed an absolute cursor position (screen space, Y down).
  ///
  /// The first sample after construction or [`reset_pointer`](Self::reset_pointer)
  /// only records the reference point.
  pub fn apply_pointer(&mut self, cursor_x: f32, cursor_y: f32)
  {
    let cursor = Vec2::new(cursor_x, cursor_y);

    let Some(last) = self.last_cursor.replace(cursor)
    else
    {
      return;
    };

    // Screen Y grows downward, pitch grows upward
    let dx = cursor.x - last.x;
    let dy = last.y - cursor.y;

    self.apply_look_delta(dx, dy);
  }

  /// Relative orientation change in pixels, already in "up is positive" form.
  pub fn apply_look_delta(&mut self, dx: f32, dy: f32)
  {
    let sensitivity = self.settings.mouse_sensitivity;

    self.yaw += dx * sensitivity;
    self.pitch = self.settings.clamp_pitch(self.pitch + dy * sensitivity);

    self.update_front();
  }

  /// Positive `scroll_delta` (wheel up) narrows the field of view.
  pub fn apply_scroll(&mut self, scroll_delta: f32)
  {
    self.zoom = self.settings.clamp_zoom(self.zoom - scroll_delta);
  }

  /// Forget the last cursor sample so the next one is treated as the first.
  pub fn reset_pointer(&mut self)
  {
    self.last_cursor = None;
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Derived values
// ──────────────────────────────────────────────────────────────
//

impl FlyCamera
{
  /// World → camera transform. Depends only on position, front and up.
  pub fn view_matrix(&self) -> Mat4
  {
    let up = if self.right() == Vec3::ZERO { self.front.any_orthonormal_vector() } else { self.up };

    Mat4::look_at_rh(self.position, self.position + self.front, up)
  }

  /// Unit strafe axis, `normalize(front × up)`, or zero when front runs along up.
  pub fn right(&self) -> Vec3
  {
    self.front.cross(self.up).try_normalize().unwrap_or(Vec3::ZERO)
  }

  pub fn position(&self) -> Vec3
  {
    self.position
  }

  pub fn front(&self) -> Vec3
  {
    self.front
  }

  pub fn up(&self) -> Vec3
  {
    self.up
  }

  pub fn yaw(&self) -> f32
  {
    self.yaw
  }

  pub fn pitch(&self) -> f32
  {
    self.pitch
  }

  /// Vertical field of view in degrees.
  pub fn zoom(&self) -> f32
  {
    self.zoom
  }

  pub fn settings(&self) -> &CameraSettings
  {
    &self.settings
  }

  pub fn has_pointer_reference(&self) -> bool
  {
    self.last_cursor.is_some()
  }
}

impl Default for FlyCamera
{
  fn default() -> Self
  {
    Self::from_config(&CameraConfig::default())
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Helpers
// ──────────────────────────────────────────────────────────────
//

impl FlyCamera
{
  fn update_front(&mut self)
  {
    self.front = front_from_angles(self.yaw, self.pitch);
  }
}

/// Look direction for the given yaw/pitch in degrees.
pub fn front_from_angles(yaw: f32, pitch: f32) -> Vec3
{
  let (sin_yaw, cos_yaw) = yaw.to_radians().sin_cos();
  let (sin_pitch, cos_pitch) = pitch.to_radians().sin_cos();

  Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
}
