use std::time::{Duration, Instant};

/// Target per-frame interval for a frame rate.
///
/// `fps` must be positive and finite;
/// [`FpsTarget::effective`](crate::sched::FpsTarget::effective) produces
/// such a value.
pub fn frame_interval(fps: f32) -> Duration {
    debug_assert!(fps.is_finite() && fps > 0.0);
    Duration::from_secs_f64(1.0 / f64::from(fps))
}

/// Per-frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Timestamp taken at the tick; hand this to the scheduler as the
    /// frame's start time.
    pub started: Instant,

    /// Time elapsed since the previous tick, in seconds, clamped by the
    /// clock's bounds.
    pub dt: f32,

    /// Monotonic frame counter.
    pub index: u64,
}

/// Produces one [`FrameTime`] per frame.
///
/// Use one clock per render loop so loops do not share delta-time state.
/// Delta time is clamped so a debugger pause, a minimized window, or a long
/// stall cannot hand pathological values to downstream systems.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// A clock with default clamps: 0.1 ms minimum (tight loops on some
    /// platforms report zero), 250 ms maximum (long stalls).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline, e.g. after resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the new frame's snapshot.
    pub fn tick(&mut self) -> FrameTime {
        let started = Instant::now();
        let dt = started
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = started;

        let ft = FrameTime {
            started,
            dt: dt.as_secs_f32(),
            index: self.index,
        };
        self.index = self.index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
