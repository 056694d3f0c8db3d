use std::sync::Arc;

use anyhow::Context;
use glam::Mat4;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::scene::{Instance, SceneKind};

use super::depth::{DepthResources, DEPTH_FORMAT};
use super::gui::{GuiRenderer, HudInfo};
use super::mesh::GpuMesh;
use super::uniform::{CameraUniform, InstanceRaw};

pub struct Renderer
{
  window: Arc<Window>,
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthResources,
  camera_buffer: wgpu::Buffer,
  camera_bind_group: wgpu::BindGroup,

  instance_buffer: wgpu::Buffer,
  instance_capacity: usize,

  pipeline: wgpu::RenderPipeline,
  mesh: GpuMesh,
  clear: wgpu::Color,

  gui: Option<GuiRenderer>,
}

/// Everything the renderer needs for one frame.
pub struct Frame<'a>
{
  pub view_proj: Mat4,
  pub instances: &'a [Instance],
  pub hud: Option<HudInfo<'a>>,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>, scene: SceneKind, hud: bool) -> anyhow::Result<Self>
  {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone()).context("failed to create surface")?;

    let adapter = request_adapter(&instance, &surface).await?;
    let (device, queue) = request_device(&adapter).await?;

    let info = adapter.get_info();
    log::info!("Using {} ({:?})", info.name, info.backend);

    let config = configure_surface(&window, &surface, &adapter, &device)?;
    let depth = DepthResources::create(&device, &config);

    let (camera_buffer, camera_bind_group, camera_bgl) = create_camera_resources(&device);

    let instance_capacity = scene.max_instances();
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
      label: Some("Instance Buffer"),
      size: (instance_capacity * std::mem::size_of::<InstanceRaw>()) as u64,
      usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
      mapped_at_creation: false,
    });

    let pipeline = create_pipeline(&device, &config, &camera_bgl);
    let mesh = GpuMesh::create(&device, scene.title(), &scene.mesh().data());

    let [r, g, b, a] = scene.clear_color();
    let clear = wgpu::Color { r, g, b, a };

    let gui = hud.then(|| GuiRenderer::new(&device, config.format, &window));

    Ok(Self {
      window,
      surface,
      device,
      queue,
      config,
      depth,
      camera_buffer,
      camera_bind_group,
      instance_buffer,
      instance_capacity,
      pipeline,
      mesh,
      clear,
      gui,
    })
  }

  pub fn window(&self) -> &Arc<Window>
  {
    &self.window
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    self.depth = DepthResources::create(&self.device, &self.config);
  }

  /// Forward a window event to the HUD. Returns true if the HUD consumed it.
  pub fn handle_gui_event(&mut self, event: &WindowEvent) -> bool
  {
    match &mut self.gui
    {
      Some(gui) => gui.handle_event(&self.window, event),
      None => false,
    }
  }

  pub fn has_hud(&self) -> bool
  {
    self.gui.is_some()
  }

  /// Draw one frame. Transient surface errors skip the frame; running out of
  /// memory is reported to the caller.
  pub fn render(&mut self, frame: &Frame) -> anyhow::Result<()>
  {
    let uniform = CameraUniform::from_matrix(frame.view_proj);
    self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));

    let instance_count = self.upload_instances(frame.instances);

    let output = match self.surface.get_current_texture()
    {
      Ok(output) => output,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        log::debug!("Surface lost or outdated, reconfiguring");
        self.surface.configure(&self.device, &self.config);
        return Ok(());
      }
      Err(wgpu::SurfaceError::OutOfMemory) =>
      {
        anyhow::bail!("surface out of memory");
      }
      Err(err) =>
      {
        log::warn!("Skipping frame: {err}");
        return Ok(());
      }
    };

    let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    record_render_pass(
      &mut encoder,
      &view,
      &self.depth.view,
      self.clear,
      &self.pipeline,
      &self.camera_bind_group,
      &self.mesh,
      &self.instance_buffer,
      instance_count,
    );

    if let (Some(gui), Some(hud)) = (&mut self.gui, &frame.hud)
    {
      let full_output = gui.build(&self.window, hud);
      gui.render(&self.device, &self.queue, &mut encoder, &self.window, &view, full_output);
    }

    self.queue.submit(Some(encoder.finish()));
    self.window.pre_present_notify();
    output.present();

    Ok(())
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Frame helpers
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  fn upload_instances(&mut self, instances: &[Instance]) -> u32
  {
    if instances.len() > self.instance_capacity
    {
      log::warn!(
        "Scene produced {} instances, drawing the first {}",
        instances.len(),
        self.instance_capacity
      );
    }

    let raw: Vec<InstanceRaw> =
      instances.iter().take(self.instance_capacity).map(InstanceRaw::from).collect();

    if !raw.is_empty()
    {
      self.queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));
    }

    raw.len() as u32
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(
  instance: &wgpu::Instance,
  surface: &wgpu::Surface<'_>,
) -> anyhow::Result<wgpu::Adapter>
{
  instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .context("no suitable GPU adapter found")
}

async fn request_device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)>
{
  adapter
    .request_device(&wgpu::DeviceDescriptor {
      label: Some("Flycam Device"),
      required_features: wgpu::Features::empty(),
      required_limits: wgpu::Limits::default(),
      ..Default::default()
    })
    .await
    .context("failed to create device")
}

fn configure_surface(
  window: &Window,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> anyhow::Result<wgpu::SurfaceConfiguration>
{
  let size = window.inner_size();
  let caps = surface.get_capabilities(adapter);

  let format = caps
    .formats
    .iter()
    .copied()
    .find(wgpu::TextureFormat::is_srgb)
    .or_else(|| caps.formats.first().copied())
    .context("surface reports no supported formats")?;

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width: size.width.max(1),
    height: size.height.max(1),
    present_mode: wgpu::PresentMode::Fifo,
    alpha_mode: wgpu::CompositeAlphaMode::Auto,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  Ok(config)
}

fn create_camera_resources(device: &wgpu::Device) -> (wgpu::Buffer, wgpu::BindGroup, wgpu::BindGroupLayout)
{
  let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Camera Buffer"),
    size: std::mem::size_of::<CameraUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Camera BGL"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Camera BG"),
    layout: &camera_bgl,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() }],
  });

  (camera_buffer, camera_bind_group, camera_bgl)
}

fn create_pipeline(
  device: &wgpu::Device,
  config: &wgpu::SurfaceConfiguration,
  camera_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Mesh Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/mesh.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Mesh Pipeline Layout"),
    bind_group_layouts: &[camera_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Mesh Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[GpuMesh::vertex_layout(), InstanceRaw::layout()],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format: config.format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::TriangleList,
      strip_index_format: None,
      front_face: wgpu::FrontFace::Ccw,
      cull_mode: None, // 2D scenes are seen from both sides
      unclipped_depth: false,
      polygon_mode: wgpu::PolygonMode::Fill,
      conservative: false,
    },
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: wgpu::CompareFunction::Less,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

#[allow(clippy::too_many_arguments)]
fn record_render_pass(
  encoder: &mut wgpu::CommandEncoder,
  color_view: &wgpu::TextureView,
  depth_view: &wgpu::TextureView,
  clear: wgpu::Color,
  pipeline: &wgpu::RenderPipeline,
  camera_bg: &wgpu::BindGroup,
  mesh: &GpuMesh,
  instances: &wgpu::Buffer,
  instance_count: u32,
)
{
  let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Scene Render Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view: color_view,
      resolve_target: None,
      ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear), store: wgpu::StoreOp::Store },
      depth_slice: None,
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: depth_view,
      depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
      stencil_ops: None,
    }),
    occlusion_query_set: None,
    timestamp_writes: None,
  });

  if instance_count == 0
  {
    return;
  }

  pass.set_pipeline(pipeline);
  pass.set_bind_group(0, camera_bg, &[]);
  pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
  pass.set_vertex_buffer(1, instances.slice(..));
  pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
  pass.draw_indexed(0..mesh.index_count, 0, 0..instance_count);
}
