use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_PITCH, DEFAULT_YAW, DEFAULT_ZOOM};
use crate::error::{ConfigError, Result};

//
// ──────────────────────────────────────────────────────────────
//   Tuning constants
// ──────────────────────────────────────────────────────────────
//

const DEFAULT_MOVEMENT_SPEED: f32 = 2.5; // world units per second
const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.1; // degrees per pixel
const DEFAULT_PITCH_LIMIT: f32 = 89.0; // just short of straight up/down
const DEFAULT_ZOOM_MIN: f32 = 1.0;
const DEFAULT_ZOOM_MAX: f32 = 45.0;

// Hard bounds every settings value is kept inside
const MAX_PITCH_LIMIT: f32 = 89.9;
const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 179.0;
const WORLD_UP_TOLERANCE: f32 = 1e-4;

//
// ──────────────────────────────────────────────────────────────
//   CameraSettings
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings
{
  pub movement_speed: f32,
  pub mouse_sensitivity: f32,
  pub pitch_limit: f32,
  pub zoom_min: f32,
  pub zoom_max: f32,
}

impl Default for CameraSettings
{
  fn default() -> Self
  {
    Self {
      movement_speed: DEFAULT_MOVEMENT_SPEED,
      mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
      pitch_limit: DEFAULT_PITCH_LIMIT,
      zoom_min: DEFAULT_ZOOM_MIN,
      zoom_max: DEFAULT_ZOOM_MAX,
    }
  }
}

impl CameraSettings
{
  // Must not panic on bounds that were never sanitized
  pub fn clamp_pitch(&self, pitch: f32) -> f32
  {
    pitch.max(-self.pitch_limit).min(self.pitch_limit)
  }

  pub fn clamp_zoom(&self, zoom: f32) -> f32
  {
    zoom.max(self.zoom_min).min(self.zoom_max)
  }

  /// Copy with every field forced into its usable range.
  ///
  /// Non-finite values take their defaults, negative rates become zero, the
  /// pitch limit loses its sign and stays below 90°, and the zoom bounds are
  /// ordered. Settings that pass [`validate`](Self::validate) come back unchanged.
  pub fn sanitized(&self) -> Self
  {
    let defaults = Self::default();
    let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

    let zoom_a = finite_or(self.zoom_min, defaults.zoom_min).clamp(MIN_ZOOM, MAX_ZOOM);
    let zoom_b = finite_or(self.zoom_max, defaults.zoom_max).clamp(MIN_ZOOM, MAX_ZOOM);

    Self {
      movement_speed: finite_or(self.movement_speed, defaults.movement_speed).max(0.0),
      mouse_sensitivity: finite_or(self.mouse_sensitivity, defaults.mouse_sensitivity).max(0.0),
      pitch_limit: finite_or(self.pitch_limit, defaults.pitch_limit).abs().min(MAX_PITCH_LIMIT),
      zoom_min: zoom_a.min(zoom_b),
      zoom_max: zoom_a.max(zoom_b),
    }
  }

  pub fn validate(&self) -> Result<()>
  {
    let fields = [
      ("movement_speed", self.movement_speed),
      ("mouse_sensitivity", self.mouse_sensitivity),
      ("pitch_limit", self.pitch_limit),
      ("zoom_min", self.zoom_min),
      ("zoom_max", self.zoom_max),
    ];

    for (name, value) in fields
    {
      if !value.is_finite()
      {
        return Err(invalid(format!("{name} must be finite, got {value}")));
      }
    }

    if self.movement_speed < 0.0
    {
      return Err(invalid(format!("movement_speed must be >= 0, got {}", self.movement_speed)));
    }

    if self.mouse_sensitivity < 0.0
    {
      return Err(invalid(format!("mouse_sensitivity must be >= 0, got {}", self.mouse_sensitivity)));
    }

    // 90° would let front line up with world up and break the strafe axis
    if !(0.0..=MAX_PITCH_LIMIT).contains(&self.pitch_limit)
    {
      return Err(invalid(format!("pitch_limit must be in [0, {MAX_PITCH_LIMIT}], got {}", self.pitch_limit)));
    }

    if self.zoom_min < MIN_ZOOM || self.zoom_max > MAX_ZOOM || self.zoom_min > self.zoom_max
    {
      return Err(invalid(format!(
        "zoom range must satisfy {MIN_ZOOM} <= min <= max <= {MAX_ZOOM}, got {}..{}",
        self.zoom_min, self.zoom_max
      )));
    }

    Ok(())
  }
}

//
// ──────────────────────────────────────────────────────────────
//   CameraConfig (initial pose + settings)
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig
{
  pub position: Vec3,
  pub world_up: Vec3,
  pub yaw: f32,
  pub pitch: f32,
  pub zoom: f32,
  pub settings: CameraSettings,
}

impl Default for CameraConfig
{
  fn default() -> Self
  {
    Self {
      position: Vec3::new(0.0, 0.0, 3.0),
      world_up: Vec3::Y,
      yaw: DEFAULT_YAW,
      pitch: DEFAULT_PITCH,
      zoom: DEFAULT_ZOOM,
      settings: CameraSettings::default(),
    }
  }
}

impl CameraConfig
{
  pub fn load(path: impl AsRef<Path>) -> Result<Self>
  {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let config = Self::from_json_str(&text)?;
    log::info!("Loaded camera config from {}", path.display());

    Ok(config)
  }

  /// Parse and validate. Missing fields take their defaults.
  pub fn from_json_str(text: &str) -> Result<Self>
  {
    let config: Self = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn to_json_string(&self) -> Result<String>
  {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn validate(&self) -> Result<()>
  {
    if !self.position.is_finite() || !self.world_up.is_finite()
    {
      return Err(invalid("position and world_up must be finite".to_string()));
    }

    // Yaw/pitch are measured against +Y, so any other up lets front run parallel to it
    let points_up = self.world_up.try_normalize().is_some_and(|up| up.abs_diff_eq(Vec3::Y, WORLD_UP_TOLERANCE));
    if !points_up
    {
      return Err(invalid(format!("world_up must point along +Y, got {}", self.world_up)));
    }

    if !self.yaw.is_finite() || !self.pitch.is_finite() || !self.zoom.is_finite()
    {
      return Err(invalid("yaw, pitch and zoom must be finite".to_string()));
    }

    self.settings.validate()
  }
}

fn invalid(msg: String) -> ConfigError
{
  ConfigError::Invalid(msg)
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn defaults_match_tutorial_constants()
  {
    let config = CameraConfig::default();
    assert_eq!(config.position, Vec3::new(0.0, 0.0, 3.0));
    assert_eq!(config.settings.movement_speed, 2.5);
    assert_eq!(config.settings.mouse_sensitivity, 0.1);
    assert_eq!(config.settings.zoom_min, 1.0);
    assert_eq!(config.settings.zoom_max, 45.0);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn json_round_trip_preserves_config()
  {
    let mut config = CameraConfig::default();
    config.position = Vec3::new(1.0, 2.0, -4.0);
    config.settings.movement_speed = 6.0;

    let text = config.to_json_string().unwrap();
    let back = CameraConfig::from_json_str(&text).unwrap();
    assert_eq!(back, config);
  }

  #[test]
  fn partial_json_fills_defaults()
  {
    let config =
      CameraConfig::from_json_str(r#"{ "position": [0.0, 1.0, 5.0], "settings": { "zoom_max": 60.0 } }"#)
        .unwrap();

    assert_eq!(config.position, Vec3::new(0.0, 1.0, 5.0));
    assert_eq!(config.yaw, -90.0);
    assert_eq!(config.settings.zoom_max, 60.0);
    assert_eq!(config.settings.zoom_min, 1.0);
  }

  #[test]
  fn inverted_zoom_range_is_rejected()
  {
    let err = CameraConfig::from_json_str(r#"{ "settings": { "zoom_min": 50.0, "zoom_max": 10.0 } }"#)
      .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn pitch_limit_of_ninety_is_rejected()
  {
    let settings = CameraSettings { pitch_limit: 90.0, ..CameraSettings::default() };
    assert!(settings.validate().is_err());
  }

  #[test]
  fn negative_speed_is_rejected()
  {
    let settings = CameraSettings { movement_speed: -1.0, ..CameraSettings::default() };
    assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
  }

  #[test]
  fn zero_world_up_is_rejected()
  {
    let err = CameraConfig::from_json_str(r#"{ "world_up": [0.0, 0.0, 0.0] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn sideways_world_up_is_rejected()
  {
    let err = CameraConfig::from_json_str(r#"{ "world_up": [1.0, 0.0, 0.0], "yaw": 0.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = CameraConfig::from_json_str(r#"{ "world_up": [0.0, -1.0, 0.0] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    // Scaled +Y is fine
    assert!(CameraConfig::from_json_str(r#"{ "world_up": [0.0, 3.0, 0.0] }"#).is_ok());
  }

  #[test]
  fn sanitized_leaves_valid_settings_alone()
  {
    let settings = CameraSettings { pitch_limit: 60.0, zoom_min: 10.0, zoom_max: 90.0, ..CameraSettings::default() };
    assert!(settings.validate().is_ok());
    assert_eq!(settings.sanitized(), settings);
    assert_eq!(CameraSettings::default().sanitized(), CameraSettings::default());
  }

  #[test]
  fn sanitized_repairs_unchecked_settings()
  {
    let settings = CameraSettings {
      movement_speed: f32::NAN,
      mouse_sensitivity: -0.5,
      pitch_limit: -10.0,
      zoom_min: 50.0,
      zoom_max: 10.0,
    };

    let fixed = settings.sanitized();
    assert_eq!(fixed.movement_speed, 2.5);
    assert_eq!(fixed.mouse_sensitivity, 0.0);
    assert_eq!(fixed.pitch_limit, 10.0);
    assert_eq!((fixed.zoom_min, fixed.zoom_max), (10.0, 50.0));
    assert!(fixed.validate().is_ok());

    let wild = CameraSettings { pitch_limit: f32::INFINITY, zoom_max: 1.0e9, ..CameraSettings::default() };
    assert!(wild.sanitized().validate().is_ok());
  }

  #[test]
  fn clamping_with_unchecked_bounds_does_not_panic()
  {
    let settings = CameraSettings { pitch_limit: -10.0, zoom_min: 50.0, zoom_max: 10.0, ..CameraSettings::default() };
    assert!(settings.clamp_pitch(30.0).is_finite());
    assert!(settings.clamp_zoom(30.0).is_finite());
  }

  #[test]
  fn malformed_json_is_a_parse_error()
  {
    let err = CameraConfig::from_json_str("{ position: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn missing_file_reports_path()
  {
    let err = CameraConfig::load("/definitely/not/here/camera.json").unwrap_err();
    match err
    {
      ConfigError::Io { path, .. } => assert!(path.ends_with("camera.json")),
      other => panic!("expected Io error, got {other:?}"),
    }
  }
}
