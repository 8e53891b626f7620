use std::time::{Duration, Instant};

use autoscope_world::Simulation;
use tracing::info;

/// Outcome of a timed run of consecutive generations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkReport {
    generations: u64,
    elapsed: Duration,
}

impl BenchmarkReport {
    /// Number of generations computed.
    #[must_use]
    pub const fn generations(&self) -> u64 {
        self.generations
    }

    /// Wall-clock time spent computing them.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Average throughput; infinite when the run was too short to measure.
    #[must_use]
    pub fn generations_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.generations as f64 / seconds
        } else {
            f64::INFINITY
        }
    }
}

/// Advances `simulation` by `generations` steps and measures the elapsed time.
pub fn benchmark(simulation: &mut Simulation, generations: u64) -> BenchmarkReport {
    let started = Instant::now();
    for _ in 0..generations {
        simulation.advance();
    }
    let report = BenchmarkReport {
        generations,
        elapsed: started.elapsed(),
    };

    info!(
        rule = simulation.rule().name(),
        generations,
        elapsed_ms = report.elapsed.as_millis() as u64,
        generations_per_second = report.generations_per_second(),
        "benchmark finished"
    );
    report
}
