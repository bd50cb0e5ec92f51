//! Frame timing and the per-frame snapshot handed to the renderer

use std::time::Instant;

use crate::math::Vector2;

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub camera_position: Vector2,
    pub camera_scale: f64,
    /// Lamp centre, which is the pointer position in screen space
    pub lamp_position: Vector2,
    pub lamp_radius: f64,
    pub lamp_shadow: f64,
    /// Seconds of simulated time since startup
    pub elapsed_time: f64,
}

impl Default for FrameSnapshot {
    fn default() -> Self {
        Self {
            camera_position: Vector2::ZERO,
            camera_scale: 1.0,
            lamp_position: Vector2::ZERO,
            lamp_radius: 0.0,
            lamp_shadow: 0.0,
            elapsed_time: 0.0,
        }
    }
}

/// Measures the time between frames on a monotonic clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { last: start }
    }

    /// Seconds since the previous tick
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Seconds between the previous tick and `now`; never negative
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let dt = now.saturating_duration_since(self.last).as_secs_f64();
        self.last = self.last.max(now);
        dt
    }
}

/// Drives one simulation step per displayed frame and tracks the frame
/// budget.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    clock: FrameClock,
    frame_number: u64,
    max_frames: Option<u64>,
}

impl FrameScheduler {
    pub fn new(max_frames: Option<u64>) -> Self {
        Self {
            clock: FrameClock::new(),
            frame_number: 0,
            max_frames,
        }
    }

    /// Start a frame and return its `dt` in seconds
    pub fn begin_frame(&mut self) -> f64 {
        self.clock.tick()
    }

    /// Finish a frame. Returns `false` once the frame budget is used up.
    pub fn end_frame(&mut self) -> bool {
        self.frame_number += 1;
        match self.max_frames {
            Some(max) if self.frame_number >= max => {
                log::info!("Reached max frames limit ({}), exiting", max);
                false
            }
            _ => true,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clock_measures_deltas() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-9);
        let dt = clock.tick_at(start + Duration::from_millis(50));
        assert!((dt - 0.034).abs() < 1e-9);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start + Duration::from_millis(10));
        assert_eq!(clock.tick_at(start), 0.0);
        let dt = clock.tick_at(start + Duration::from_millis(20));
        assert!((dt - 0.010).abs() < 1e-9);
    }

    #[test]
    fn scheduler_stops_at_frame_budget() {
        let mut scheduler = FrameScheduler::new(Some(3));
        assert!(scheduler.end_frame());
        assert!(scheduler.end_frame());
        assert!(!scheduler.end_frame());
        assert_eq!(scheduler.frame_number(), 3);
    }

    #[test]
    fn scheduler_without_budget_runs_forever() {
        let mut scheduler = FrameScheduler::new(None);
        for _ in 0..1000 {
            assert!(scheduler.end_frame());
        }
    }
}
