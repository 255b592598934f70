use std::cell::Cell;
use std::rc::Rc;

/// Fallback applied when the target holds zero or a non-finite value.
pub const DEFAULT_FPS: f32 = 60.0;

/// Shared handle to the target frame rate.
///
/// The host owns the target (it is a camera/display concern, not a
/// scheduling one) and hands the scheduler a clone; retuning it takes
/// effect on the next tick. Single-threaded by design, like the rest of
/// the scheduler.
#[derive(Debug, Clone)]
pub struct FpsTarget(Rc<Cell<f32>>);

impl FpsTarget {
    pub fn new(fps: f32) -> Self {
        Self(Rc::new(Cell::new(fps)))
    }

    /// Raw stored value, including zero or non-finite settings.
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    pub fn set(&self, fps: f32) {
        self.0.set(fps);
    }

    /// The value budget math should use: the stored target, or
    /// [`DEFAULT_FPS`] when the stored value is unusable.
    pub fn effective(&self) -> f32 {
        let fps = self.0.get();
        if fps.is_finite() && fps > 0.0 { fps } else { DEFAULT_FPS }
    }
}

impl Default for FpsTarget {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_passes_through_valid_target() {
        let fps = FpsTarget::new(30.0);
        assert_eq!(fps.effective(), 30.0);
    }

    #[test]
    fn effective_defaults_unusable_targets() {
        for bad in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let fps = FpsTarget::new(bad);
            assert_eq!(fps.effective(), DEFAULT_FPS);
        }
    }

    #[test]
    fn clones_share_state() {
        let host = FpsTarget::new(60.0);
        let sched = host.clone();
        host.set(120.0);
        assert_eq!(sched.get(), 120.0);
    }
}
