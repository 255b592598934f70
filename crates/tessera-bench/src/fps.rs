use std::time::{Duration, Instant};

/// Samples achieved frames-per-second over one-second windows.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames_in_window: u32,
    samples: Vec<f32>,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames_in_window: 0,
            samples: Vec::new(),
        }
    }

    /// Records one presented frame.
    pub fn frame(&mut self) {
        self.frames_in_window += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed >= Self::WINDOW {
            self.samples
                .push(self.frames_in_window as f32 / elapsed.as_secs_f32());
            self.frames_in_window = 0;
            self.window_start = Instant::now();
        }
    }

    /// Consumes the counter, folding a meaningful partial window into the
    /// samples so short runs still report something.
    pub fn finish(mut self) -> FpsStats {
        let elapsed = self.window_start.elapsed();
        if self.frames_in_window > 0 && elapsed >= Duration::from_millis(250) {
            self.samples
                .push(self.frames_in_window as f32 / elapsed.as_secs_f32());
        }
        FpsStats::from_samples(&self.samples)
    }
}

/// Summary over the per-window fps samples of a run. All zero when the run
/// was too short to produce a sample.
#[derive(Debug, Copy, Clone, Default)]
pub struct FpsStats {
    pub min: f32,
    pub max: f32,
    pub avg: f32,
    pub median: f32,
}

impl FpsStats {
    pub fn from_samples(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f32::total_cmp);

        Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            avg: sorted.iter().sum::<f32>() / sorted.len() as f32,
            median: sorted[sorted.len() / 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_over_empty_samples_are_zero() {
        let stats = FpsStats::from_samples(&[]);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.avg, 0.0);
        assert_eq!(stats.median, 0.0);
    }

    #[test]
    fn stats_summarize_samples() {
        let stats = FpsStats::from_samples(&[30.0, 60.0, 45.0]);
        assert_eq!(stats.min, 30.0);
        assert_eq!(stats.max, 60.0);
        assert_eq!(stats.avg, 45.0);
        assert_eq!(stats.median, 45.0);
    }
}
