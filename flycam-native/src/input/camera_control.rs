use flycam_core::FlyCamera;

use crate::input::InputState;

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

/// Apply one frame of accumulated input. `dt` is seconds since the last frame.
pub fn apply_input_to_camera(input: &InputState, camera: &mut FlyCamera, dt: f32)
{
  apply_focus(input, camera);
  apply_movement(input, camera, dt);
  apply_look(input, camera);
  apply_zoom(input, camera);
}

//
// ──────────────────────────────────────────────────────────────
//   Input handlers
// ──────────────────────────────────────────────────────────────
//

fn apply_focus(input: &InputState, camera: &mut FlyCamera)
{
  // The cursor may be anywhere when focus comes back; don't turn on that jump
  if input.focus_lost
  {
    camera.reset_pointer();
  }
}

fn apply_movement(input: &InputState, camera: &mut FlyCamera, dt: f32)
{
  for dir in input.held_movements()
  {
    camera.apply_movement(dir, dt);
  }
}

fn apply_look(input: &InputState, camera: &mut FlyCamera)
{
  if input.pointer_grabbed
  {
    let (dx, dy) = input.motion;
    if dx != 0.0 || dy != 0.0
    {
      camera.apply_look_delta(dx, -dy);
    }
    return;
  }

  if let Some((x, y)) = input.cursor
  {
    camera.apply_pointer(x, y);
  }
}

fn apply_zoom(input: &InputState, camera: &mut FlyCamera)
{
  if input.scroll == 0.0
  {
    return;
  }

  camera.apply_scroll(input.scroll);
}

#[cfg(test)]
mod tests
{
  use super::*;
  use glam::Vec3;
  use winit::keyboard::KeyCode;

  #[test]
  fn held_forward_key_moves_by_speed_times_dt()
  {
    let mut cam = FlyCamera::new(Vec3::ZERO);
    let mut input = InputState::new();
    input.on_key(KeyCode::KeyW, true);

    apply_input_to_camera(&input, &mut cam, 0.5);

    assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -1.25), 1e-5));
  }

  #[test]
  fn opposite_keys_cancel()
  {
    let mut cam = FlyCamera::new(Vec3::ZERO);
    let mut input = InputState::new();
    input.on_key(KeyCode::KeyA, true);
    input.on_key(KeyCode::KeyD, true);

    apply_input_to_camera(&input, &mut cam, 1.0);

    assert!(cam.position().abs_diff_eq(Vec3::ZERO, 1e-5));
  }

  #[test]
  fn cursor_turns_camera_after_first_frame()
  {
    let mut cam = FlyCamera::new(Vec3::ZERO);
    let mut input = InputState::new();

    input.on_cursor(400.0, 300.0);
    apply_input_to_camera(&input, &mut cam, 0.016);
    input.end_frame();
    assert_eq!(cam.yaw(), -90.0);

    input.on_cursor(500.0, 300.0);
    apply_input_to_camera(&input, &mut cam, 0.016);
    assert!((cam.yaw() - (-80.0)).abs() < 1e-4);
  }

  #[test]
  fn focus_loss_suppresses_jump_on_return()
  {
    let mut cam = FlyCamera::new(Vec3::ZERO);
    let mut input = InputState::new();

    input.on_cursor(0.0, 0.0);
    apply_input_to_camera(&input, &mut cam, 0.016);
    input.end_frame();

    input.on_focus_lost();
    input.on_cursor(900.0, 900.0);
    apply_input_to_camera(&input, &mut cam, 0.016);

    assert_eq!(cam.yaw(), -90.0);
    assert_eq!(cam.pitch(), 0.0);
  }

  #[test]
  fn grabbed_pointer_uses_raw_motion()
  {
    let mut cam = FlyCamera::new(Vec3::ZERO);
    let mut input = InputState { pointer_grabbed: true, ..InputState::new() };

    // Absolute positions are ignored while grabbed
    input.on_cursor(900.0, 900.0);
    input.on_mouse_motion(10.0, -20.0);
    input.on_mouse_motion(10.0, 0.0);

    apply_input_to_camera(&input, &mut cam, 0.016);

    assert!((cam.yaw() - (-88.0)).abs() < 1e-4);
    assert!((cam.pitch() - 2.0).abs() < 1e-4);
    assert!(!cam.has_pointer_reference());
  }

  #[test]
  fn scroll_up_zooms_in()
  {
    let mut cam = FlyCamera::new(Vec3::ZERO);
    let mut input = InputState::new();
    input.on_scroll(3.0);

    apply_input_to_camera(&input, &mut cam, 0.0);

    assert_eq!(cam.zoom(), 42.0);
  }
}
