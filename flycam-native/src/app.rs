use std::sync::Arc;

use anyhow::Context;
use flycam_core::{CameraConfig, FlyCamera, FrameClock, Projection};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{DeviceEvent, DeviceId, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{CursorGrabMode, Window, WindowId},
};

use crate::input::camera_control::apply_input_to_camera;
use crate::input::InputState;
use crate::renderer::{Frame, HudInfo, Renderer};
use crate::scene::SceneKind;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

pub struct AppOptions
{
  pub scene: SceneKind,
  pub camera: CameraConfig,
  pub hud: bool,
  pub grab_cursor: bool,
}

pub fn run(options: AppOptions) -> anyhow::Result<()>
{
  let event_loop = EventLoop::new().context("failed to create event loop")?;
  let mut app = FlycamApp::new(options);

  event_loop.run_app(&mut app).context("event loop failed")?;

  match app.error.take()
  {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

struct FlycamApp
{
  scene: SceneKind,
  hud: bool,
  grab_cursor: bool,

  renderer: Option<Renderer>,
  camera: FlyCamera,
  projection: Projection,
  clock: FrameClock,
  input: InputState,

  error: Option<anyhow::Error>,
}

impl FlycamApp
{
  fn new(options: AppOptions) -> Self
  {
    log::info!("Scene: {}", options.scene.title());

    Self {
      scene: options.scene,
      hud: options.hud,
      grab_cursor: options.grab_cursor,
      renderer: None,
      camera: FlyCamera::from_config(&options.camera),
      projection: Projection::new(WINDOW_WIDTH, WINDOW_HEIGHT),
      clock: FrameClock::new(),
      input: InputState::new(),
      error: None,
    }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()>
  {
    if self.renderer.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes()
      .with_title(format!("LearnOpenGL: {}", self.scene.title()))
      .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

    let size = window.inner_size();
    self.projection.resize(size.width, size.height);

    if self.grab_cursor && self.scene.uses_camera()
    {
      grab_cursor(&window);
      self.input.pointer_grabbed = true;
    }

    let renderer = pollster::block_on(Renderer::new(window, self.scene, self.hud))?;
    self.renderer = Some(renderer);

    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let Some(renderer) = self.renderer.as_mut()
    else
    {
      return;
    };

    if renderer.window().id() != window_id
    {
      return;
    }

    let hud_visible = renderer.has_hud() && !self.input.hud_toggled;
    let consumed = hud_visible && renderer.handle_gui_event(&event);

    if !consumed
    {
      self.input.handle_event(&event);
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        log::debug!("Resized to {}x{}", size.width, size.height);
        renderer.resize(size.width, size.height);
        self.projection.resize(size.width, size.height);
        renderer.window().request_redraw();
      }

      WindowEvent::RedrawRequested =>
      {
        self.frame(elwt);
      }

      _ =>
      {}
    }

    if self.input.exit_requested
    {
      log::info!("Exit requested");
      elwt.exit();
    }
  }

  fn frame(&mut self, elwt: &ActiveEventLoop)
  {
    let dt = self.clock.tick();

    if self.scene.uses_camera()
    {
      apply_input_to_camera(&self.input, &mut self.camera, dt);
    }

    let Some(renderer) = self.renderer.as_mut()
    else
    {
      return;
    };

    let instances = self.scene.instances(self.clock.elapsed());
    let view_proj = self.scene.view_mode().view_proj(&self.projection, &self.camera);

    let hud_visible = renderer.has_hud() && !self.input.hud_toggled;
    let hud = hud_visible.then(|| HudInfo {
      scene: self.scene.title(),
      camera: self.scene.uses_camera().then_some(&self.camera),
      frame_seconds: dt,
    });

    let result = renderer.render(&Frame { view_proj, instances: &instances, hud });
    self.input.end_frame();

    if let Err(err) = result
    {
      self.fail(elwt, err);
    }
  }

  /// Stop the loop; `run` hands the error back to main for reporting.
  fn fail(&mut self, elwt: &ActiveEventLoop, err: anyhow::Error)
  {
    self.error = Some(err);
    elwt.exit();
  }
}

impl ApplicationHandler for FlycamApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(err) = self.init_window_and_renderer(event_loop)
    {
      self.fail(event_loop, err);
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent)
  {
    if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event
    {
      if self.input.pointer_grabbed
      {
        self.input.on_mouse_motion(dx as f32, dy as f32);
      }
    }
  }

  fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop)
  {
    if let Some(renderer) = &self.renderer
    {
      renderer.window().request_redraw();
    }
  }
}

fn grab_cursor(window: &Window)
{
  // Confined is unsupported on macOS, Locked is unsupported on X11
  let grabbed = window
    .set_cursor_grab(CursorGrabMode::Confined)
    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));

  match grabbed
  {
    Ok(()) => window.set_cursor_visible(false),
    Err(err) => log::warn!("Could not grab cursor: {err}"),
  }
}
