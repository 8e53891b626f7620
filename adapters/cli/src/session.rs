//! Non-interactive sessions over a catalog entry.

use std::io::Write;

use anyhow::{bail, Context, Result};
use autoscope_core::{BoardShape, Command, Event, Seed};
use autoscope_system_analytics::{self as analytics, Analytics};
use autoscope_system_catalog::{Catalog, Navigator};
use autoscope_world::{self as world, query, Config, Simulation};
use tracing::info;

/// Parameters shared by runs and benchmarks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RunOptions {
    pub(crate) shape: BoardShape,
    pub(crate) seed_index: usize,
    pub(crate) generations: u64,
    pub(crate) print_every: u64,
    pub(crate) config: Config,
}

/// Prints every rule with its seeds, one rule per line.
pub(crate) fn list(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for entry in catalog.entries() {
        let seeds = entry
            .seeds()
            .iter()
            .map(Seed::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "{}: {seeds}", entry.rule().name())?;
    }
    Ok(())
}

/// Runs the selected rule and prints boards along the way.
pub(crate) fn run(
    catalog: &Catalog,
    navigator: Navigator,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<()> {
    let mut simulation = start(catalog, navigator, options)?;
    let mut analytics = Analytics::new(options.shape);
    let mut events = Vec::new();
    let mut published = Vec::new();

    if let Some(seed) = query::seed(&simulation) {
        events.push(Event::BoardPopulated {
            seed,
            population: query::population(&simulation),
        });
        analytics.handle(&events, &mut published);
    }
    print_board(&simulation, out)?;

    for _ in 0..options.generations {
        events.clear();
        world::apply(&mut simulation, Command::Advance, &mut events);
        analytics.handle(&events, &mut published);

        let generation = query::generation(&simulation);
        let scheduled = options.print_every > 0 && generation % options.print_every == 0;
        if scheduled || generation == options.generations {
            print_board(&simulation, out)?;
        }
    }

    if let Some(Event::StatsPublished { report }) = published.last() {
        writeln!(
            out,
            "final: generation {}, population {}, density {:.4}, peak {}{}",
            report.generation(),
            report.population(),
            report.density(),
            report.peak_population(),
            if report.is_extinct() { ", extinct" } else { "" },
        )?;
    }
    Ok(())
}

/// Times the selected rule without printing boards.
pub(crate) fn benchmark(
    catalog: &Catalog,
    navigator: Navigator,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<()> {
    let mut simulation = start(catalog, navigator, options)?;
    let report = analytics::benchmark(&mut simulation, options.generations);
    writeln!(
        out,
        "{}: {} generations on {}x{} in {:.3}s ({:.1} generations/s)",
        query::rule(&simulation).name(),
        report.generations(),
        options.shape.height(),
        options.shape.width(),
        report.elapsed().as_secs_f64(),
        report.generations_per_second(),
    )?;
    Ok(())
}

fn start(catalog: &Catalog, mut navigator: Navigator, options: &RunOptions) -> Result<Simulation> {
    let seeds = navigator.current_entry(catalog).seeds().len();
    if options.seed_index >= seeds {
        bail!(
            "seed index {} is out of range; rule `{}` has {seeds} seed(s)",
            options.seed_index,
            navigator.current_rule(catalog).name()
        );
    }
    let seed = navigator.offset_seed(catalog, options.seed_index as isize);
    let rule = navigator.current_rule(catalog).clone();
    let name = rule.name().to_owned();

    info!(rule = %name, %seed, "starting simulation");
    Simulation::new(rule, options.shape, seed, options.config).with_context(|| {
        format!(
            "rule `{name}` cannot run on a {}x{} board",
            options.shape.height(),
            options.shape.width()
        )
    })
}

fn print_board(simulation: &Simulation, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{}, {}: generation {}, population {}",
        query::rule(simulation).name(),
        query::seed(simulation).map_or_else(|| "no seed".to_owned(), |seed| seed.to_string()),
        query::generation(simulation),
        query::population(simulation),
    )?;
    write!(out, "{}", query::board(simulation).to_text())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(height: usize, width: usize, generations: u64, print_every: u64) -> RunOptions {
        RunOptions {
            shape: BoardShape::new(height, width).expect("valid shape"),
            seed_index: 0,
            generations,
            print_every,
            config: Config::default(),
        }
    }

    fn output(result: Result<()>, out: Vec<u8>) -> String {
        result.expect("session succeeds");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn list_prints_every_rule_with_its_seeds() {
        let mut out = Vec::new();
        let text = output(list(&Catalog::builtin(), &mut out), out);

        assert_eq!(text.lines().count(), 32);
        assert_eq!(text.lines().next(), Some("amoeba: random d=0.15"));
        assert!(text.contains("maze: random d=0.03, square s=7, square s=8, square s=9, square s=10, square s=64"));
    }

    #[test]
    fn run_prints_scheduled_and_final_boards() {
        let catalog = Catalog::builtin();
        let navigator = Navigator::at(&catalog, "flakes").expect("flakes is builtin");
        let options = options(8, 8, 5, 2);

        let mut out = Vec::new();
        let text = output(run(&catalog, navigator, &options, &mut out), out);

        let headers: Vec<&str> = text.lines().filter(|line| line.starts_with("flakes")).collect();
        assert_eq!(headers.len(), 4, "generations 0, 2, 4 and 5");
        assert!(headers[0].starts_with("flakes, square s=30: generation 0, population 64"));
        assert!(headers[3].contains("generation 5"));
        assert!(text.lines().last().expect("summary").starts_with("final: generation 5"));
    }

    #[test]
    fn out_of_range_seed_index_is_rejected() {
        let catalog = Catalog::builtin();
        let mut options = options(16, 16, 1, 0);
        options.seed_index = 1;

        let error = run(&catalog, Navigator::new(), &options, &mut Vec::new())
            .expect_err("amoeba has a single seed");
        assert!(error.to_string().contains("seed index 1 is out of range"));
    }

    #[test]
    fn oversized_rule_reports_the_board() {
        let catalog = Catalog::builtin();
        let navigator = Navigator::at(&catalog, "bugs_movie").expect("bugs_movie is builtin");

        let error = run(&catalog, navigator, &options(16, 16, 1, 0), &mut Vec::new())
            .expect_err("21x21 mask cannot fit a 16x16 board");
        assert!(format!("{error:#}").contains("cannot run on a 16x16 board"));
    }

    #[test]
    fn benchmark_reports_throughput() {
        let catalog = Catalog::builtin();
        let mut out = Vec::new();
        let text = output(
            benchmark(&catalog, Navigator::new(), &options(16, 16, 10, 0), &mut out),
            out,
        );
        assert!(text.starts_with("amoeba: 10 generations on 16x16 in"));
    }
}
