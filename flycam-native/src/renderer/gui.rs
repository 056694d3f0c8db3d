use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use egui_winit::State;
use flycam_core::FlyCamera;
use winit::event::WindowEvent;
use winit::window::Window;

/// What the HUD shows for the current frame.
pub struct HudInfo<'a>
{
  pub scene: &'a str,
  pub camera: Option<&'a FlyCamera>,
  pub frame_seconds: f32,
}

/// egui overlay drawn on top of the scene, after the mesh pass.
pub struct GuiRenderer
{
  context: egui::Context,
  state: State,
  painter: Renderer,
}

impl GuiRenderer
{
  pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self
  {
    let context = egui::Context::default();
    let viewport = context.viewport_id();
    let state = State::new(context.clone(), viewport, window, Some(window.scale_factor() as f32), None, None);
    let painter = Renderer::new(device, output_format, RendererOptions::default());

    Self { context, state, painter }
  }

  /// Returns true when egui wants the event for itself.
  pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool
  {
    self.state.on_window_event(window, event).consumed
  }

  /// Lay out the camera panel for this frame.
  pub fn build(&mut self, window: &Window, info: &HudInfo) -> egui::FullOutput
  {
    let raw_input = self.state.take_egui_input(window);

    let mut full_output = self.context.run(raw_input, |ctx| {
      egui::Window::new("Camera").resizable(false).collapsible(true).show(ctx, |ui| {
        draw_hud(ui, info);
      });
    });

    let platform_output = std::mem::take(&mut full_output.platform_output);
    self.state.handle_platform_output(window, platform_output);

    full_output
  }

  pub fn render(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    window: &Window,
    view: &wgpu::TextureView,
    output: egui::FullOutput,
  )
  {
    let size = window.inner_size();
    let screen = ScreenDescriptor {
      size_in_pixels: [size.width, size.height],
      pixels_per_point: output.pixels_per_point,
    };

    let jobs = self.context.tessellate(output.shapes, output.pixels_per_point);

    for (id, delta) in &output.textures_delta.set
    {
      self.painter.update_texture(device, queue, *id, delta);
    }

    let uploads = self.painter.update_buffers(device, queue, encoder, &jobs, &screen);
    if !uploads.is_empty()
    {
      queue.submit(uploads);
    }

    let mut pass = begin_overlay_pass(encoder, view);
    self.painter.render(&mut pass, &jobs, &screen);
    drop(pass);

    for id in &output.textures_delta.free
    {
      self.painter.free_texture(id);
    }
  }
}

/// Load-and-store pass over the already drawn frame. egui wants a `'static`
/// pass, so the encoder stays locked until the returned pass is dropped.
fn begin_overlay_pass(encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) -> wgpu::RenderPass<'static>
{
  encoder
    .begin_render_pass(&wgpu::RenderPassDescriptor {
      label: Some("HUD Pass"),
      color_attachments: &[Some(wgpu::RenderPassColorAttachment {
        view,
        resolve_target: None,
        ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
        depth_slice: None,
      })],
      ..Default::default()
    })
    .forget_lifetime()
}

fn draw_hud(ui: &mut egui::Ui, info: &HudInfo)
{
  ui.label(info.scene);

  let fps = if info.frame_seconds > 0.0 { 1.0 / info.frame_seconds } else { 0.0 };
  ui.label(format!("{:.1} ms  ({fps:.0} fps)", info.frame_seconds * 1000.0));

  let Some(cam) = info.camera
  else
  {
    ui.weak("fixed view");
    return;
  };

  ui.separator();

  let p = cam.position();
  let f = cam.front();
  ui.monospace(format!("pos   {:>7.2} {:>7.2} {:>7.2}", p.x, p.y, p.z));
  ui.monospace(format!("front {:>7.3} {:>7.3} {:>7.3}", f.x, f.y, f.z));
  ui.monospace(format!("yaw   {:>7.1}°", cam.yaw()));
  ui.monospace(format!("pitch {:>7.1}°", cam.pitch()));
  ui.monospace(format!("fov   {:>7.1}°", cam.zoom()));

  ui.separator();
  ui.weak("WASD move · mouse look · wheel zoom · H hide · Esc quit");
}
