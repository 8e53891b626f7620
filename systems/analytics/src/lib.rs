#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Population statistics and throughput measurement for running simulations.
//!
//! [`Analytics`] is a pure system: it reads the events the simulation
//! broadcast and publishes at most one [`Event::StatsPublished`] per call.
//! [`benchmark`] drives a simulation directly and reports how fast it ran.

mod benchmark;

use autoscope_core::{BoardShape, Event, StatsReport};
use tracing::{debug, info};

pub use benchmark::{benchmark, BenchmarkReport};

/// Tracks population over time and publishes a report for the latest board.
#[derive(Debug)]
pub struct Analytics {
    cell_count: usize,
    peak_population: usize,
    last_report: Option<StatsReport>,
}

impl Analytics {
    /// Creates an analytics system for boards of the provided shape.
    #[must_use]
    pub const fn new(shape: BoardShape) -> Self {
        Self {
            cell_count: shape.cell_count(),
            peak_population: 0,
            last_report: None,
        }
    }

    /// Returns the last report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&StatsReport> {
        self.last_report.as_ref()
    }

    /// Consumes simulation events and publishes a report describing the newest board.
    ///
    /// A repopulated board restarts the peak population. Nothing is published
    /// when `events` contains no board change.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Event>) {
        let mut latest = None;

        for event in events {
            match event {
                Event::BoardPopulated { population, .. } => {
                    self.peak_population = *population;
                    latest = Some(self.report(0, *population));
                }
                Event::GenerationAdvanced {
                    generation,
                    population,
                } => {
                    self.peak_population = self.peak_population.max(*population);
                    latest = Some(self.report(*generation, *population));
                }
                _ => {}
            }
        }

        let Some(report) = latest else {
            return;
        };

        let was_extinct = self.last_report.is_some_and(|last| last.is_extinct());
        if report.is_extinct() && !was_extinct {
            info!(generation = report.generation(), "population went extinct");
        }
        debug!(
            generation = report.generation(),
            population = report.population(),
            density = report.density(),
            "stats published"
        );

        self.last_report = Some(report);
        out.push(Event::StatsPublished { report });
    }

    fn report(&self, generation: u64, population: usize) -> StatsReport {
        StatsReport::new(generation, population, self.cell_count, self.peak_population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoscope_core::Seed;

    fn analytics() -> Analytics {
        Analytics::new(BoardShape::new(4, 5).expect("valid shape"))
    }

    #[test]
    fn ignores_events_without_board_changes() {
        let mut analytics = analytics();
        let mut out = Vec::new();

        analytics.handle(
            &[Event::RuleSwapped {
                name: "conway".to_owned(),
            }],
            &mut out,
        );

        assert!(out.is_empty());
        assert!(analytics.last_report().is_none());
    }

    #[test]
    fn extinction_is_remembered_across_batches() {
        let mut analytics = analytics();
        let mut out = Vec::new();
        let died = |generation| Event::GenerationAdvanced {
            generation,
            population: 0,
        };

        analytics.handle(&[died(1)], &mut out);
        analytics.handle(&[died(2)], &mut out);

        let last = analytics.last_report().expect("published");
        assert!(last.is_extinct());
        assert_eq!(last.generation(), 2);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn populate_restarts_the_peak() {
        let mut analytics = analytics();
        let mut out = Vec::new();

        analytics.handle(
            &[
                Event::GenerationAdvanced {
                    generation: 1,
                    population: 12,
                },
                Event::BoardPopulated {
                    seed: Seed::square(2),
                    population: 4,
                },
            ],
            &mut out,
        );

        assert_eq!(
            out,
            vec![Event::StatsPublished {
                report: StatsReport::new(0, 4, 20, 4)
            }]
        );
    }
}
