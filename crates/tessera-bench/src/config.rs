use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Benchmark knobs, overridable from `TESSERA_*` environment variables.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Tile grid width in columns (`TESSERA_GRID_W`).
    pub grid_width: u32,
    /// Tile grid height in rows (`TESSERA_GRID_H`).
    pub grid_height: u32,
    /// Visible window width in columns (`TESSERA_WINDOW`).
    pub window_width: u32,
    /// Frames per run (`TESSERA_FRAMES`).
    pub frames: u64,
    /// Target frame rate (`TESSERA_FPS`).
    pub target_fps: f32,
    /// Simulated render cost per frame, ms (`TESSERA_RENDER_MS`).
    pub render_cost: Duration,
    /// Simulated fetch+decode cost per tile, ms (`TESSERA_FETCH_MS`).
    pub fetch_cost: Duration,
    /// Simulated creation cost per tile, ms (`TESSERA_CREATE_MS`).
    pub create_cost: Duration,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            grid_width: 96,
            grid_height: 8,
            window_width: 8,
            frames: 600,
            target_fps: 60.0,
            render_cost: Duration::from_millis(4),
            fetch_cost: Duration::from_millis(3),
            create_cost: Duration::from_millis(1),
        }
    }
}

impl BenchConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            grid_width: var("TESSERA_GRID_W")?.unwrap_or(defaults.grid_width),
            grid_height: var("TESSERA_GRID_H")?.unwrap_or(defaults.grid_height),
            window_width: var("TESSERA_WINDOW")?.unwrap_or(defaults.window_width),
            frames: var("TESSERA_FRAMES")?.unwrap_or(defaults.frames),
            target_fps: var("TESSERA_FPS")?.unwrap_or(defaults.target_fps),
            render_cost: millis_var("TESSERA_RENDER_MS", defaults.render_cost)?,
            fetch_cost: millis_var("TESSERA_FETCH_MS", defaults.fetch_cost)?,
            create_cost: millis_var("TESSERA_CREATE_MS", defaults.create_cost)?,
        })
    }
}

fn var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => {
            let value = raw
                .parse::<T>()
                .with_context(|| format!("parsing {name}={raw}"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

fn millis_var(name: &str, default: Duration) -> Result<Duration> {
    Ok(var::<u64>(name)?.map_or(default, Duration::from_millis))
}
