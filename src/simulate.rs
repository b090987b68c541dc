use crate::models::Metric;
use rand::Rng;

pub const VALUE_STEP_MIN: i64 = -5;
pub const VALUE_STEP_MAX: i64 = 9;

/// Randomness seam for the metric random walk. Production uses the thread
/// RNG; tests inject scripted sequences and assert exact post-tick values.
pub trait Jitter: Send {
    /// Integer step applied to a metric value, in [-5, 9].
    fn value_step(&mut self) -> i64;
    /// Fractional step applied to progress, in [-1, 1].
    fn progress_step(&mut self) -> f64;
}

pub struct ThreadJitter;

impl Jitter for ThreadJitter {
    fn value_step(&mut self) -> i64 {
        rand::rng().random_range(VALUE_STEP_MIN..=VALUE_STEP_MAX)
    }

    fn progress_step(&mut self) -> f64 {
        rand::rng().random_range(-1.0..=1.0)
    }
}

/// Scripted jitter for deterministic tests. Sequences repeat from the start
/// once exhausted.
pub struct ScriptedJitter {
    values: Vec<i64>,
    progress: Vec<f64>,
    value_cursor: usize,
    progress_cursor: usize,
}

impl ScriptedJitter {
    pub fn new(values: Vec<i64>, progress: Vec<f64>) -> Self {
        Self {
            values,
            progress,
            value_cursor: 0,
            progress_cursor: 0,
        }
    }
}

impl Jitter for ScriptedJitter {
    fn value_step(&mut self) -> i64 {
        let step = self.values[self.value_cursor % self.values.len()];
        self.value_cursor += 1;
        step
    }

    fn progress_step(&mut self) -> f64 {
        let step = self.progress[self.progress_cursor % self.progress.len()];
        self.progress_cursor += 1;
        step
    }
}

/// One tick of the random walk: every metric value drifts by an integer step
/// and progress drifts by a fractional step clamped to [0, 100].
pub fn apply_tick(metrics: &mut [Metric], jitter: &mut dyn Jitter) {
    for metric in metrics {
        metric.value += jitter.value_step();
        metric.progress = (metric.progress + jitter.progress_step()).clamp(0.0, 100.0);
    }
}
