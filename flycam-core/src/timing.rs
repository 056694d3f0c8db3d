use std::time::{Duration, Instant};

/// Per-frame timing: seconds since the previous frame and since start.
#[derive(Debug, Clone)]
pub struct FrameClock
{
  start: Instant,
  last: Option<Instant>,
  delta: f32,
}

impl FrameClock
{
  pub fn new() -> Self
  {
    Self::starting_at(Instant::now())
  }

  pub fn starting_at(start: Instant) -> Self
  {
    Self { start, last: None, delta: 0.0 }
  }

  pub fn tick(&mut self) -> f32
  {
    self.tick_at(Instant::now())
  }

  /// Advance to `now`. The first tick reports zero elapsed time.
  pub fn tick_at(&mut self, now: Instant) -> f32
  {
    self.delta = match self.last
    {
      Some(last) => now.saturating_duration_since(last).as_secs_f32(),
      None => 0.0,
    };

    self.last = Some(now);
    self.delta
  }

  pub fn delta(&self) -> f32
  {
    self.delta
  }

  /// Seconds from construction to the most recent tick.
  pub fn elapsed(&self) -> f32
  {
    self.last.map_or(Duration::ZERO, |last| last.saturating_duration_since(self.start)).as_secs_f32()
  }
}

impl Default for FrameClock
{
  fn default() -> Self
  {
    Self::new()
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn first_tick_is_zero()
  {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);
    assert_eq!(clock.tick_at(start + Duration::from_millis(40)), 0.0);
  }

  #[test]
  fn later_ticks_report_frame_delta_and_total()
  {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);

    clock.tick_at(start);
    let dt = clock.tick_at(start + Duration::from_millis(16));
    assert!((dt - 0.016).abs() < 1e-6);

    clock.tick_at(start + Duration::from_millis(1016));
    assert!((clock.delta() - 1.0).abs() < 1e-6);
    assert!((clock.elapsed() - 1.016).abs() < 1e-6);
  }

  #[test]
  fn clock_going_backwards_saturates_to_zero()
  {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);

    clock.tick_at(start + Duration::from_secs(1));
    assert_eq!(clock.tick_at(start), 0.0);
  }
}
