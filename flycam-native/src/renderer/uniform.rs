use glam::Mat4;

use crate::scene::Instance;

//
// ──────────────────────────────────────────────────────────────
//   Camera Uniform (GPU side)
//
//   WGSL layout (mesh.wgsl):
//     view_proj : mat4x4<f32>   → 64 bytes
//   Total: 64 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform
{
  pub view_proj: [[f32; 4]; 4], // 64 bytes
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<CameraUniform>() == 64);

impl CameraUniform
{
  pub fn from_matrix(view_proj: Mat4) -> Self
  {
    Self { view_proj: view_proj.to_cols_array_2d() }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Instance data (per-instance vertex buffer)
//
//   locations 1..=4 : model columns
//   location  5     : colour
//   location  6     : shading amount
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw
{
  pub model: [[f32; 4]; 4], // 64 bytes
  pub color: [f32; 4],      // 16 bytes
  pub shading: f32,         // 4 bytes
}

const _: () = assert!(std::mem::size_of::<InstanceRaw>() == 84);

impl InstanceRaw
{
  const ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32,
  ];

  pub fn layout() -> wgpu::VertexBufferLayout<'static>
  {
    wgpu::VertexBufferLayout {
      array_stride: std::mem::size_of::<InstanceRaw>() as u64,
      step_mode: wgpu::VertexStepMode::Instance,
      attributes: &Self::ATTRIBS,
    }
  }
}

impl From<&Instance> for InstanceRaw
{
  fn from(inst: &Instance) -> Self
  {
    Self {
      model: inst.model.to_cols_array_2d(),
      color: inst.color.to_array(),
      shading: inst.shading,
    }
  }
}
