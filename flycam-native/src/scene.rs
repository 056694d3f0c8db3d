use clap::ValueEnum;
use flycam_core::{FlyCamera, Projection};
use glam::{Mat4, Vec3, Vec4};

//
// ──────────────────────────────────────────────────────────────
//   Scenes
//
//   Each tutorial program reduced to data: which mesh, how it is
//   viewed, and where its instances sit at a given time.
// ──────────────────────────────────────────────────────────────
//

const SLATE: [f64; 4] = [0.2, 0.3, 0.3, 1.0];
const BLACK: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

const CUBE_POSITIONS: [Vec3; 10] = [
  Vec3::new(0.0, 0.0, 0.0),
  Vec3::new(2.0, 5.0, -15.0),
  Vec3::new(-1.5, -2.2, -2.5),
  Vec3::new(-3.8, -2.0, -12.3),
  Vec3::new(2.4, -0.4, -3.5),
  Vec3::new(-1.7, 3.0, -7.5),
  Vec3::new(1.3, -2.0, -2.5),
  Vec3::new(1.5, 2.0, -2.5),
  Vec3::new(1.5, 0.2, -1.5),
  Vec3::new(-1.3, 1.0, -1.5),
];

const CUBE_PALETTE: [[f32; 3]; 5] = [
  [0.93, 0.55, 0.25],
  [0.35, 0.70, 0.90],
  [0.55, 0.85, 0.40],
  [0.90, 0.40, 0.55],
  [0.85, 0.80, 0.35],
];

const OBJECT_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.31);
const LIGHT_COLOR: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const LIGHT_POS: Vec3 = Vec3::new(1.2, 1.0, 2.0);
const LIGHT_SCALE: f32 = 0.2;

// Fixed view used before the fly camera is introduced
const FIXED_VIEW_DISTANCE: f32 = 5.0;
const FIXED_VIEW_FOV: f32 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind
{
  /// Two flashing green triangles in clip space.
  Triangle,
  /// A square spinning about Z in the top-right corner.
  Rotating,
  /// Ten cubes tumbling in front of a fixed camera.
  Spinning,
  /// Ten static cubes explored with the fly camera.
  Cubes,
  /// A coral object cube lit by a small white light cube.
  Lighting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind
{
  Triangles,
  Square,
  Cube,
}

/// How view/projection are produced for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode
{
  /// Vertices are already in clip space.
  Identity,
  /// World pushed back along -Z with a fixed field of view.
  Fixed { distance: f32, fov_degrees: f32 },
  /// Driven by the fly camera.
  Fly,
}

impl ViewMode
{
  pub fn view_proj(self, projection: &Projection, camera: &FlyCamera) -> Mat4
  {
    match self
    {
      ViewMode::Identity => Mat4::IDENTITY,
      ViewMode::Fixed { distance, fov_degrees } =>
      {
        projection.matrix(fov_degrees) * Mat4::from_translation(Vec3::new(0.0, 0.0, -distance))
      }
      ViewMode::Fly => projection.view_proj(camera),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance
{
  pub model: Mat4,
  pub color: Vec4,
  /// 0 = flat colour, 1 = full height-based shading.
  pub shading: f32,
}

impl Instance
{
  fn flat(model: Mat4, color: Vec3) -> Self
  {
    Self { model, color: color.extend(1.0), shading: 0.0 }
  }

  fn shaded(model: Mat4, color: Vec3) -> Self
  {
    Self { model, color: color.extend(1.0), shading: 1.0 }
  }
}

impl SceneKind
{
  pub fn title(self) -> &'static str
  {
    match self
    {
      SceneKind::Triangle => "Flashing triangles",
      SceneKind::Rotating => "Rotating over time",
      SceneKind::Spinning => "Many cubes",
      SceneKind::Cubes => "Keyboard and mouse input",
      SceneKind::Lighting => "Lighting setup",
    }
  }

  pub fn mesh(self) -> MeshKind
  {
    match self
    {
      SceneKind::Triangle => MeshKind::Triangles,
      SceneKind::Rotating => MeshKind::Square,
      SceneKind::Spinning | SceneKind::Cubes | SceneKind::Lighting => MeshKind::Cube,
    }
  }

  pub fn view_mode(self) -> ViewMode
  {
    match self
    {
      SceneKind::Triangle | SceneKind::Rotating => ViewMode::Identity,
      SceneKind::Spinning => ViewMode::Fixed { distance: FIXED_VIEW_DISTANCE, fov_degrees: FIXED_VIEW_FOV },
      SceneKind::Cubes | SceneKind::Lighting => ViewMode::Fly,
    }
  }

  pub fn uses_camera(self) -> bool
  {
    self.view_mode() == ViewMode::Fly
  }

  pub fn clear_color(self) -> [f64; 4]
  {
    match self
    {
      SceneKind::Triangle | SceneKind::Rotating => BLACK,
      _ => SLATE,
    }
  }

  /// Upper bound on `instances().len()`, for buffer sizing.
  pub fn max_instances(self) -> usize
  {
    match self
    {
      SceneKind::Triangle | SceneKind::Rotating => 1,
      SceneKind::Spinning | SceneKind::Cubes => CUBE_POSITIONS.len(),
      SceneKind::Lighting => 2,
    }
  }

  /// Instances at `time` seconds since start.
  pub fn instances(self, time: f32) -> Vec<Instance>
  {
    match self
    {
      SceneKind::Triangle => vec![Instance::flat(Mat4::IDENTITY, flashing_green(time))],
      SceneKind::Rotating => vec![rotating_square(time)],
      SceneKind::Spinning => spinning_cubes(time),
      SceneKind::Cubes => static_cubes(),
      SceneKind::Lighting => lighting_cubes(),
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Per-scene builders
// ──────────────────────────────────────────────────────────────
//

fn flashing_green(time: f32) -> Vec3
{
  Vec3::new(0.0, time.sin() / 2.0 + 0.5, 0.0)
}

fn rotating_square(time: f32) -> Instance
{
  let model = Mat4::from_translation(Vec3::new(0.5, 0.5, 0.0)) * Mat4::from_rotation_z(time);
  Instance::flat(model, Vec3::new(0.93, 0.55, 0.25))
}

fn spinning_cubes(time: f32) -> Vec<Instance>
{
  CUBE_POSITIONS
    .iter()
    .enumerate()
    .map(|(i, pos)| {
      let rate = (i + 1) as f32 * time;
      let model = Mat4::from_translation(*pos)
        * Mat4::from_rotation_x((-15.0 * rate).to_radians())
        * Mat4::from_rotation_y((-25.0 * rate).to_radians());

      Instance::shaded(model, palette(i))
    })
    .collect()
}

fn static_cubes() -> Vec<Instance>
{
  CUBE_POSITIONS
    .iter()
    .enumerate()
    .map(|(i, pos)| Instance::shaded(Mat4::from_translation(*pos), palette(i)))
    .collect()
}

fn lighting_cubes() -> Vec<Instance>
{
  let object = Instance::flat(Mat4::IDENTITY, OBJECT_COLOR * LIGHT_COLOR);
  let lamp = Instance::flat(
    Mat4::from_translation(LIGHT_POS) * Mat4::from_scale(Vec3::splat(LIGHT_SCALE)),
    LIGHT_COLOR,
  );

  vec![object, lamp]
}

fn palette(i: usize) -> Vec3
{
  Vec3::from_array(CUBE_PALETTE[i % CUBE_PALETTE.len()])
}

//
// ──────────────────────────────────────────────────────────────
//   Mesh data (positions + triangle-list indices)
// ──────────────────────────────────────────────────────────────
//

pub struct MeshData
{
  pub vertices: Vec<[f32; 3]>,
  pub indices: Vec<u16>,
}

impl MeshKind
{
  pub fn data(self) -> MeshData
  {
    match self
    {
      MeshKind::Triangles => triangles(),
      MeshKind::Square => square(),
      MeshKind::Cube => cube(),
    }
  }
}

fn triangles() -> MeshData
{
  let vertices = vec![
    // first triangle
    [-0.9, -0.5, 0.0],
    [0.0, -0.5, 0.0],
    [-0.45, 0.5, 0.0],
    // second triangle
    [0.0, -0.5, 0.0],
    [0.9, -0.5, 0.0],
    [0.45, 0.5, 0.0],
  ];

  MeshData { vertices, indices: (0..6).collect() }
}

fn square() -> MeshData
{
  let vertices = vec![[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.5, 0.5, 0.0], [-0.5, 0.5, 0.0]];

  MeshData { vertices, indices: vec![0, 1, 2, 0, 2, 3] }
}

fn cube() -> MeshData
{
  // 8 unique corners, unit cube centred on the origin
  let vertices = vec![
    [-0.5, -0.5, -0.5], // 0 back
    [0.5, -0.5, -0.5],  // 1
    [0.5, 0.5, -0.5],   // 2
    [-0.5, 0.5, -0.5],  // 3
    [-0.5, -0.5, 0.5],  // 4 front
    [0.5, -0.5, 0.5],   // 5
    [0.5, 0.5, 0.5],    // 6
    [-0.5, 0.5, 0.5],   // 7
  ];

  #[rustfmt::skip]
  let indices = vec![
    0, 2, 1,  0, 3, 2,  // back    (Z-)
    4, 5, 6,  4, 6, 7,  // front   (Z+)
    0, 1, 5,  0, 5, 4,  // bottom  (Y-)
    3, 7, 6,  3, 6, 2,  // top     (Y+)
    1, 2, 6,  1, 6, 5,  // right   (X+)
    0, 4, 7,  0, 7, 3,  // left    (X-)
  ];

  MeshData { vertices, indices }
}

#[cfg(test)]
mod tests
{
  use super::*;

  const ALL: [SceneKind; 5] =
    [SceneKind::Triangle, SceneKind::Rotating, SceneKind::Spinning, SceneKind::Cubes, SceneKind::Lighting];

  #[test]
  fn instance_counts_never_exceed_capacity()
  {
    for kind in ALL
    {
      for t in [0.0, 0.5, 10.0]
      {
        assert!(kind.instances(t).len() <= kind.max_instances(), "{kind:?}");
      }
    }
  }

  #[test]
  fn cubes_sit_at_tutorial_positions()
  {
    let instances = SceneKind::Cubes.instances(0.0);
    assert_eq!(instances.len(), 10);

    for (inst, pos) in instances.iter().zip(CUBE_POSITIONS)
    {
      assert_eq!(inst.model.w_axis.truncate(), pos);
    }
  }

  #[test]
  fn flashing_green_stays_in_unit_range()
  {
    for i in 0..100
    {
      let c = flashing_green(i as f32 * 0.37);
      assert!((0.0..=1.0).contains(&c.y));
      assert_eq!(c.x, 0.0);
      assert_eq!(c.z, 0.0);
    }
    assert!((flashing_green(0.0).y - 0.5).abs() < 1e-6);
  }

  #[test]
  fn lighting_scene_has_object_and_small_lamp()
  {
    let instances = SceneKind::Lighting.instances(3.0);
    assert_eq!(instances.len(), 2);

    assert_eq!(instances[0].color, Vec4::new(1.0, 0.5, 0.31, 1.0));

    let lamp = instances[1].model;
    assert!(lamp.w_axis.truncate().abs_diff_eq(LIGHT_POS, 1e-6));
    assert!((lamp.x_axis.x - LIGHT_SCALE).abs() < 1e-6);
  }

  #[test]
  fn only_camera_scenes_use_fly_view()
  {
    assert!(SceneKind::Cubes.uses_camera());
    assert!(SceneKind::Lighting.uses_camera());
    assert!(!SceneKind::Triangle.uses_camera());
    assert!(!SceneKind::Spinning.uses_camera());
  }

  #[test]
  fn view_modes_pick_their_matrices()
  {
    let projection = Projection::new(800, 600);
    let mut camera = FlyCamera::new(Vec3::new(0.0, 0.0, 3.0));

    assert_eq!(ViewMode::Identity.view_proj(&projection, &camera), Mat4::IDENTITY);

    let fixed = SceneKind::Spinning.view_mode().view_proj(&projection, &camera);
    let expected = projection.matrix(45.0) * Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    assert_eq!(fixed, expected);

    camera.apply_scroll(20.0);
    let fly = ViewMode::Fly.view_proj(&projection, &camera);
    assert_eq!(fly, projection.matrix(25.0) * camera.view_matrix());

    // The fixed view ignores the fly camera entirely
    assert_eq!(SceneKind::Spinning.view_mode().view_proj(&projection, &camera), fixed);
  }

  #[test]
  fn mesh_indices_stay_in_bounds()
  {
    for mesh in [MeshKind::Triangles, MeshKind::Square, MeshKind::Cube]
    {
      let data = mesh.data();
      assert_eq!(data.indices.len() % 3, 0);
      assert!(data.indices.iter().all(|&i| (i as usize) < data.vertices.len()));
    }
    assert_eq!(MeshKind::Cube.data().indices.len(), 36);
  }
}
