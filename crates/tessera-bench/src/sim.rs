use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tessera_sched::queue::{QueueCounters, Task};
use tessera_sched::sched::{
    FpsTarget, FrameScheduler, SchedStats, SchedulerConfig, TileGroup,
};
use tessera_sched::time::{frame_interval, FrameClock};

use crate::config::BenchConfig;
use crate::fps::{FpsCounter, FpsStats};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TileId {
    pub x: u32,
    pub y: u32,
}

/// Outcome of one simulated flight.
#[derive(Debug)]
pub struct RunReport {
    pub label: &'static str,
    pub fps: FpsStats,
    pub counters: QueueCounters,
    pub stats: SchedStats,
    pub tiles_created: u64,
}

/// Burns CPU for `duration`, standing in for real fetch/decode/render work.
fn spin(duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < duration {
        std::hint::spin_loop();
    }
}

/// Simulates a camera flight over a tile grid, driving the scheduler the way
/// a map view would.
///
/// Each frame the visible window advances one step across the grid. Newly
/// visible tiles enqueue fetch work; each completed fetch lands in an outbox
/// the driver turns into creation work on the next frame (a real map view's
/// decode callback does the same). Tiles that scroll out of view expire
/// through the shared visibility set without ever executing.
pub fn run(cfg: &BenchConfig, throttling: bool) -> RunReport {
    let fps_target = FpsTarget::new(cfg.target_fps);
    let mut sched = FrameScheduler::with_config(
        fps_target,
        || log::trace!("redraw requested"),
        SchedulerConfig {
            throttling,
            ..SchedulerConfig::default()
        },
    );

    let visible: Rc<RefCell<HashSet<TileId>>> = Rc::new(RefCell::new(HashSet::new()));
    let fetch_outbox: Rc<RefCell<Vec<TileId>>> = Rc::new(RefCell::new(Vec::new()));
    let tiles_created = Rc::new(Cell::new(0u64));

    let mut requested: HashSet<TileId> = HashSet::new();
    let mut clock = FrameClock::new();
    let mut fps_counter = FpsCounter::new();
    let interval = frame_interval(cfg.target_fps);

    let last_col = cfg.grid_width.saturating_sub(cfg.window_width) as u64;

    for frame in 0..cfg.frames {
        let ft = clock.tick();

        // Advance the window so the pan covers the whole grid over the run.
        let col = (frame * last_col / cfg.frames.max(1)) as u32;
        {
            let mut vis = visible.borrow_mut();
            vis.clear();
            for x in col..(col + cfg.window_width).min(cfg.grid_width) {
                for y in 0..cfg.grid_height {
                    vis.insert(TileId { x, y });
                }
            }
        }

        let center = (
            col as f32 + cfg.window_width as f32 / 2.0,
            cfg.grid_height as f32 / 2.0,
        );

        // Newly visible tiles start fetching.
        let now_visible: Vec<TileId> = visible.borrow().iter().copied().collect();
        for tile in now_visible {
            if !requested.insert(tile) {
                continue;
            }
            let cost = cfg.fetch_cost;
            let outbox = Rc::clone(&fetch_outbox);
            let vis = Rc::clone(&visible);
            sched.queue_mut().add(
                Task::new(TileGroup::FetchAndDecode, priority(tile, center), move || {
                    spin(cost);
                    outbox.borrow_mut().push(tile);
                })
                .cost(cost)
                .expires_if(move || !vis.borrow().contains(&tile)),
            );
        }

        // Completed fetches become creation work.
        let decoded: Vec<TileId> = fetch_outbox.borrow_mut().drain(..).collect();
        for tile in decoded {
            let cost = cfg.create_cost;
            let created = Rc::clone(&tiles_created);
            let vis = Rc::clone(&visible);
            sched.queue_mut().add(
                Task::new(TileGroup::Create, priority(tile, center), move || {
                    spin(cost);
                    created.set(created.get() + 1);
                })
                .cost(cost)
                .expires_if(move || !vis.borrow().contains(&tile)),
            );
        }

        // Simulated render, then hand the frame's remainder to the scheduler.
        spin(cfg.render_cost);
        sched.process_pending(ft.started);
        fps_counter.frame();

        // Pace to the target interval, like a vsynced loop would.
        let elapsed = ft.started.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }

    RunReport {
        label: if throttling { "throttled" } else { "unthrottled" },
        fps: fps_counter.finish(),
        counters: sched.queue().counters(),
        stats: sched.stats(),
        tiles_created: tiles_created.get(),
    }
}

/// Priority favoring tiles near the window center (larger = closer).
fn priority(tile: TileId, center: (f32, f32)) -> f32 {
    let dx = (tile.x as f32 + 0.5 - center.0).abs();
    let dy = (tile.y as f32 + 0.5 - center.1).abs();
    -(dx + dy)
}
