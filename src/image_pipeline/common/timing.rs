use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

/// Duration of one named pipeline stage.
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// Ordered per-stage durations of a filter run.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    totals: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        *self.totals.entry(name.clone()).or_insert(Duration::ZERO) += duration;
        self.steps.push(StepTiming { name, duration });
    }

    /// Records the stopped timer as a step.
    pub fn record(&mut self, timer: Timer) {
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
    }

    pub fn extend(&mut self, other: PipelineTimings) {
        for step in other.steps {
            self.add_step(step.name, step.duration);
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Accumulated duration of every step recorded under `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.totals.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self, filter: &str) {
        let total = self.total_duration();
        for step in &self.steps {
            let share = if total.as_secs_f64() > 0.0 {
                step.duration.as_secs_f64() / total.as_secs_f64() * 100.0
            } else {
                0.0
            };
            info!(
                filter,
                step = %step.name,
                "{:.3}ms ({:.1}%)",
                step.duration.as_secs_f64() * 1000.0,
                share
            );
        }
        info!(filter, "total {:.3}ms", total.as_secs_f64() * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}
