//! Zombie Survival entry point
//!
//! Runs headless sessions driven by the autopilot. Window, sprite and font
//! handling belong to a front end; this binary only logs what it would draw.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use zombie_survival::autopilot::Autopilot;
use zombie_survival::consts::TARGET_FPS;
use zombie_survival::format_seconds;
use zombie_survival::lifecycle::{
    FixedClock, LifecycleConfig, RealtimeClock, RenderFrame, Renderer, RunSummary, run,
};
use zombie_survival::sim::{NoShapes, ShapeSet};
use zombie_survival::tuning::Tuning;

/// Headless zombie survival driven by the autopilot
#[derive(Debug, Parser)]
#[command(name = "zombie-survival", version, about)]
struct Options {
    /// JSON tuning file; defaults apply to missing fields
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Seed of the first session (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of sessions to play
    #[arg(long, default_value_t = 3)]
    sessions: u32,

    /// Pace frames in real time instead of stepping as fast as possible
    #[arg(long)]
    realtime: bool,
}

/// Logs the HUD once a second and the game-over notice once per session
#[derive(Debug, Default)]
struct LogRenderer {
    frames: u64,
    notice_shown: bool,
}

impl Renderer for LogRenderer {
    type Error = std::convert::Infallible;

    fn present(&mut self, frame: &RenderFrame) -> Result<(), Self::Error> {
        self.frames += 1;
        match frame.notice {
            Some(notice) if !self.notice_shown => {
                self.notice_shown = true;
                for line in notice.to_string().lines() {
                    log::info!("{}", line);
                }
            }
            Some(_) => {}
            None => {
                self.notice_shown = false;
                if self.frames % TARGET_FPS as u64 == 0 {
                    log::debug!("{} ({} on screen)", frame.score_text(), frame.sprites.len());
                }
            }
        }
        Ok(())
    }
}

fn seed_from_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn report(summary: &RunSummary) {
    for (i, score) in summary.scores_ms.iter().enumerate() {
        println!("Session {}: survived {} s", i + 1, format_seconds(*score));
    }
    if let Some(best) = summary.best_ms() {
        println!("Best: {} s", format_seconds(best));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Zombie Survival (headless) starting...");

    let options = Options::parse();
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let config = LifecycleConfig {
        tuning,
        seed: options.seed.unwrap_or_else(seed_from_time),
        max_sessions: Some(options.sessions),
    };
    let shapes = ShapeSet::resolve(&NoShapes, &config.tuning);
    let mut input = Autopilot::default();
    let mut renderer = LogRenderer::default();

    let summary = if options.realtime {
        run(&config, &mut RealtimeClock::new(TARGET_FPS), &mut input, &mut renderer, &shapes)?
    } else {
        run(&config, &mut FixedClock::default(), &mut input, &mut renderer, &shapes)?
    };

    report(&summary);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end
}
