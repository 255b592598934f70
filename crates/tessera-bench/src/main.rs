//! Headless benchmark for the tessera frame scheduler.
//!
//! Simulates a camera flight over a tile grid twice, once with frame
//! throttling and once without, then prints achieved fps and the
//! queue/scheduler counters for both runs. Knobs come from `TESSERA_*`
//! environment variables (see [`config::BenchConfig`]).

mod config;
mod fps;
mod sim;

use anyhow::{Context, Result};
use tessera_sched::logging::{init_logging, LoggingConfig};

use config::BenchConfig;
use sim::RunReport;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let cfg = BenchConfig::from_env().context("reading TESSERA_* environment")?;
    println!(
        "tessera-bench: {}x{} grid, {}-column window, {} frames @ {} fps target",
        cfg.grid_width, cfg.grid_height, cfg.window_width, cfg.frames, cfg.target_fps
    );
    println!(
        "costs: render {:?}, fetch {:?}, create {:?}",
        cfg.render_cost, cfg.fetch_cost, cfg.create_cost
    );
    println!();

    let throttled = sim::run(&cfg, true);
    let unthrottled = sim::run(&cfg, false);
    print_summary(&[throttled, unthrottled]);

    Ok(())
}

fn print_summary(reports: &[RunReport]) {
    println!(
        "{:<12} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "mode", "fps min", "fps max", "fps avg", "fps med", "created", "expired", "exec", "redraws"
    );
    for r in reports {
        println!(
            "{:<12} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8} {:>8} {:>8} {:>8}",
            r.label,
            r.fps.min,
            r.fps.max,
            r.fps.avg,
            r.fps.median,
            r.tiles_created,
            r.counters.expired,
            r.counters.executed,
            r.stats.redraws_requested,
        );
    }
    println!();
    for r in reports {
        println!(
            "{}: {} ticks ({} throttled, {} zero-budget), queue added {} / rejected {}",
            r.label,
            r.stats.ticks,
            r.stats.throttled_ticks,
            r.stats.zero_budget_ticks,
            r.counters.added,
            r.counters.rejected,
        );
    }
}
