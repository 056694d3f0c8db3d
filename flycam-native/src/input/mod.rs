pub mod camera_control;

use flycam_core::Movement;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

// Trackpads report pixels; treat this many as one wheel notch
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Debug, Default)]
pub struct InputState
{
  pub forward_held: bool,
  pub backward_held: bool,
  pub left_held: bool,
  pub right_held: bool,

  /// Latest absolute cursor position seen this frame, if it moved.
  pub cursor: Option<(f32, f32)>,
  /// Raw device motion accumulated this frame (Y down).
  pub motion: (f32, f32),
  pub scroll: f32,

  /// With the cursor grabbed, look input comes from `motion` instead of `cursor`.
  pub pointer_grabbed: bool,

  pub focus_lost: bool,
  pub exit_requested: bool,
  pub hud_toggled: bool,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    match event
    {
      WindowEvent::CursorMoved { position, .. } =>
      {
        self.on_cursor(position.x as f32, position.y as f32);
      }

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(_, y) => self.on_scroll(*y),
        MouseScrollDelta::PixelDelta(p) => self.on_scroll(p.y as f32 / PIXELS_PER_LINE),
      },

      // Auto-repeat would re-toggle the HUD; held state is already set
      WindowEvent::KeyboardInput { event, .. } if event.repeat =>
      {}

      WindowEvent::KeyboardInput { event, .. } =>
      {
        if let PhysicalKey::Code(code) = event.physical_key
        {
          self.on_key(code, event.state == ElementState::Pressed);
        }
      }

      WindowEvent::Focused(false) =>
      {
        self.on_focus_lost();
      }

      _ =>
      {}
    }
  }

  pub fn on_cursor(&mut self, x: f32, y: f32)
  {
    self.cursor = Some((x, y));
  }

  pub fn on_mouse_motion(&mut self, dx: f32, dy: f32)
  {
    self.motion.0 += dx;
    self.motion.1 += dy;
  }

  pub fn on_scroll(&mut self, lines: f32)
  {
    self.scroll += lines;
  }

  pub fn on_key(&mut self, code: KeyCode, pressed: bool)
  {
    match code
    {
      KeyCode::KeyW | KeyCode::ArrowUp => self.forward_held = pressed,
      KeyCode::KeyS | KeyCode::ArrowDown => self.backward_held = pressed,
      KeyCode::KeyA | KeyCode::ArrowLeft => self.left_held = pressed,
      KeyCode::KeyD | KeyCode::ArrowRight => self.right_held = pressed,

      KeyCode::Escape if pressed => self.exit_requested = true,
      KeyCode::KeyH if pressed => self.hud_toggled = !self.hud_toggled,

      _ =>
      {}
    }
  }

  /// Release everything; key-up events never arrive while unfocused.
  pub fn on_focus_lost(&mut self)
  {
    self.forward_held = false;
    self.backward_held = false;
    self.left_held = false;
    self.right_held = false;
    self.focus_lost = true;
  }

  pub fn held_movements(&self) -> impl Iterator<Item = Movement>
  {
    [
      (self.forward_held, Movement::Forward),
      (self.backward_held, Movement::Backward),
      (self.left_held, Movement::Left),
      (self.right_held, Movement::Right),
    ]
    .into_iter()
    .filter_map(|(held, dir)| held.then_some(dir))
  }

  /// Clear per-frame deltas. Held keys and toggles persist.
  pub fn end_frame(&mut self)
  {
    self.cursor = None;
    self.motion = (0.0, 0.0);
    self.scroll = 0.0;
    self.focus_lost = false;
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn wasd_and_arrows_map_to_directions()
  {
    let mut input = InputState::new();
    input.on_key(KeyCode::KeyW, true);
    input.on_key(KeyCode::ArrowRight, true);

    let dirs: Vec<Movement> = input.held_movements().collect();
    assert_eq!(dirs, vec![Movement::Forward, Movement::Right]);

    input.on_key(KeyCode::KeyW, false);
    let dirs: Vec<Movement> = input.held_movements().collect();
    assert_eq!(dirs, vec![Movement::Right]);
  }

  #[test]
  fn escape_requests_exit_on_press_only()
  {
    let mut input = InputState::new();
    input.on_key(KeyCode::Escape, false);
    assert!(!input.exit_requested);

    input.on_key(KeyCode::Escape, true);
    assert!(input.exit_requested);
  }

  #[test]
  fn end_frame_clears_deltas_but_keeps_held_keys()
  {
    let mut input = InputState::new();
    input.on_key(KeyCode::KeyS, true);
    input.on_cursor(10.0, 20.0);
    input.on_mouse_motion(3.0, -4.0);
    input.on_scroll(1.0);
    input.on_scroll(2.0);
    assert_eq!(input.scroll, 3.0);

    input.end_frame();

    assert!(input.backward_held);
    assert_eq!(input.cursor, None);
    assert_eq!(input.motion, (0.0, 0.0));
    assert_eq!(input.scroll, 0.0);
  }

  #[test]
  fn latest_cursor_position_wins()
  {
    let mut input = InputState::new();
    input.on_cursor(1.0, 1.0);
    input.on_cursor(5.0, 7.0);
    assert_eq!(input.cursor, Some((5.0, 7.0)));
  }

  #[test]
  fn focus_loss_releases_keys()
  {
    let mut input = InputState::new();
    input.on_key(KeyCode::KeyA, true);
    input.on_key(KeyCode::KeyD, true);

    input.on_focus_lost();

    assert_eq!(input.held_movements().count(), 0);
    assert!(input.focus_lost);
  }

  #[test]
  fn hud_key_toggles()
  {
    let mut input = InputState::new();
    input.on_key(KeyCode::KeyH, true);
    input.on_key(KeyCode::KeyH, false);
    assert!(input.hud_toggled);

    input.on_key(KeyCode::KeyH, true);
    assert!(!input.hud_toggled);
  }
}
