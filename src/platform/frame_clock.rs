//! Frame loop bookkeeping for the browser driver
//!
//! Tracks whether the loop should keep scheduling frames and turns
//! `requestAnimationFrame` timestamps into frame deltas. Each resume starts a
//! new generation; callbacks queued by an older generation are ignored, so a
//! page restored from the back/forward cache never ends up with two loops.

use crate::consts::FIRST_FRAME_DT;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    running: bool,
    generation: u32,
    /// Last frame timestamp in ms, 0 until the first frame of a generation
    last_time: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            running: true,
            generation: 0,
            last_time: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Generation the next scheduled frame should carry
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Stop scheduling frames
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Start a fresh loop and return its generation.
    ///
    /// The first delta after a resume falls back to [`FIRST_FRAME_DT`].
    pub fn resume(&mut self) -> u32 {
        self.running = true;
        self.generation = self.generation.wrapping_add(1);
        self.last_time = 0.0;
        self.generation
    }

    /// Whether a frame queued under `generation` may run
    pub fn accepts(&self, generation: u32) -> bool {
        self.running && generation == self.generation
    }

    /// Delta in seconds since the previous frame of this generation
    pub fn delta(&mut self, time: f64) -> f32 {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            FIRST_FRAME_DT
        };
        self.last_time = time;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_fallback_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), FIRST_FRAME_DT);
        assert!((clock.delta(1050.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_pause_rejects_queued_frames() {
        let mut clock = FrameClock::new();
        let generation = clock.generation();
        assert!(clock.accepts(generation));
        clock.pause();
        assert!(!clock.is_running());
        assert!(!clock.accepts(generation));
    }

    #[test]
    fn test_resume_after_cache_restore() {
        let mut clock = FrameClock::new();
        let old = clock.generation();
        clock.delta(1000.0);
        clock.delta(1016.0);

        // Hidden into the back/forward cache, then shown again much later
        clock.pause();
        let new = clock.resume();

        assert!(clock.is_running());
        assert!(clock.accepts(new));
        // A frame queued before the page was hidden must not start a second loop
        assert!(!clock.accepts(old));
        // No huge jump from the time spent in the cache
        assert_eq!(clock.delta(90_000.0), FIRST_FRAME_DT);
    }

    #[test]
    fn test_resume_while_running_replaces_loop() {
        let mut clock = FrameClock::new();
        let old = clock.generation();
        let new = clock.resume();
        assert_ne!(old, new);
        assert!(!clock.accepts(old));
    }
}
