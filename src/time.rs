//! Fixed-step game clock.
//!
//! `draw_web()` fires at the display's frame rate with uneven gaps. The
//! clock turns those gaps into whole countdown steps of `tick_ms` each and
//! carries the remainder to the next frame.

/// Longest gap counted for one frame. A backgrounded tab resumes with at
/// most this much time passed instead of timing out the round at once.
const MAX_FRAME_GAP_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(tick_ms: u32) -> Self {
        Self {
            ms_per_tick: tick_ms.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed the frame timestamp (`Date.now()` or `performance.now()`), get the
    /// number of steps to hand to `Game::tick`.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
