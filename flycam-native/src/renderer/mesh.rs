use wgpu::util::DeviceExt;

use crate::scene::MeshData;

const VERTEX_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub struct GpuMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub index_buffer: wgpu::Buffer,
  pub index_count: u32,
}

impl GpuMesh
{
  pub fn create(device: &wgpu::Device, label: &str, data: &MeshData) -> Self
  {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some(&format!("{label} Vertex Buffer")),
      contents: bytemuck::cast_slice(&data.vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    // Pad to a 4-byte multiple; COPY_BUFFER_ALIGNMENT applies to init contents too
    let mut indices = data.indices.clone();
    if indices.len() % 2 == 1
    {
      indices.push(0);
    }

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some(&format!("{label} Index Buffer")),
      contents: bytemuck::cast_slice(&indices),
      usage: wgpu::BufferUsages::INDEX,
    });

    Self { vertex_buffer, index_buffer, index_count: data.indices.len() as u32 }
  }

  pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static>
  {
    wgpu::VertexBufferLayout {
      array_stride: std::mem::size_of::<[f32; 3]>() as u64,
      step_mode: wgpu::VertexStepMode::Vertex,
      attributes: &VERTEX_ATTRIBS,
    }
  }
}
