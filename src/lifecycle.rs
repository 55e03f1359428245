//! Session lifecycle
//!
//! The outer loop around the simulation: pace frames, poll input, tick the
//! session, hand a snapshot to the renderer, and on game over wait for a
//! restart or quit. A restart always builds a brand-new `Session`.

use std::fmt;
use std::time::{Duration, Instant};

use glam::Vec2;
use thiserror::Error;

use crate::consts::FRAME_MS;
use crate::format_seconds;
use crate::sim::{Facing, Session, SessionEvent, ShapeSet, SpriteId, TickInput, tick_at};
use crate::tuning::{Tuning, TuningError};

/// Longest frame a real-time clock reports; longer stalls are clipped
pub const MAX_FRAME_MS: f64 = 100.0;

/// Errors that end a run early
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Tuning(#[from] TuningError),

    #[error("renderer failed: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Frame pacing and session time
pub trait Clock {
    /// Restart the session clock; called once per new session
    fn start_session(&mut self);

    /// Block until the next frame is due; returns milliseconds since the
    /// previous one, possibly clipped
    fn wait_next_frame(&mut self) -> f64;

    /// Unclipped milliseconds from `start_session` to the current frame
    fn session_elapsed_ms(&self) -> f64;
}

/// Per-frame input
pub trait InputProvider {
    /// Sample input for the coming frame. `session` is read-only context.
    fn poll(&mut self, session: &Session) -> TickInput;
}

/// Consumes one snapshot per frame
pub trait Renderer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn present(&mut self, frame: &RenderFrame) -> Result<(), Self::Error>;
}

/// Deterministic clock advancing a fixed step without sleeping
#[derive(Debug, Clone)]
pub struct FixedClock {
    pub frame_ms: f64,
    pub total_ms: f64,
}

impl FixedClock {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            frame_ms,
            total_ms: 0.0,
        }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(FRAME_MS)
    }
}

impl Clock for FixedClock {
    fn start_session(&mut self) {
        self.total_ms = 0.0;
    }

    fn wait_next_frame(&mut self) -> f64 {
        self.total_ms += self.frame_ms;
        self.frame_ms
    }

    fn session_elapsed_ms(&self) -> f64 {
        self.total_ms
    }
}

/// Wall-clock pacing at a target rate
#[derive(Debug)]
pub struct RealtimeClock {
    frame: Duration,
    session_start: Instant,
    last: Instant,
}

impl RealtimeClock {
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            frame: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            session_start: now,
            last: now,
        }
    }
}

impl Clock for RealtimeClock {
    fn start_session(&mut self) {
        let now = Instant::now();
        self.session_start = now;
        self.last = now;
    }

    fn wait_next_frame(&mut self) -> f64 {
        let due = self.last + self.frame;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64() * 1000.0;
        self.last = now;
        dt.min(MAX_FRAME_MS)
    }

    fn session_elapsed_ms(&self) -> f64 {
        self.last.duration_since(self.session_start).as_secs_f64() * 1000.0
    }
}

/// What the renderer needs to draw one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteView {
    pub id: u32,
    pub sprite: SpriteId,
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
}

/// End-of-session overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverNotice {
    pub final_score_ms: f64,
}

impl fmt::Display for GameOverNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GAME OVER!")?;
        writeln!(f, "Time survived: {} seconds", format_seconds(self.final_score_ms))?;
        write!(f, "Press R to replay or Q to quit")
    }
}

/// Snapshot handed to the renderer each frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Player first, then hostiles in spawn order
    pub sprites: Vec<SpriteView>,
    pub score_ms: f64,
    pub notice: Option<GameOverNotice>,
}

impl RenderFrame {
    pub fn score_text(&self) -> String {
        format!("Time: {}", format_seconds(self.score_ms))
    }
}

/// Copy out everything the renderer draws
pub fn build_render_frame(session: &Session) -> RenderFrame {
    let sprites = session
        .entities()
        .map(|e| SpriteView {
            id: e.id,
            sprite: e.kind.sprite(),
            pos: e.rect.pos,
            size: e.rect.size,
            facing: e.facing,
        })
        .collect();
    RenderFrame {
        sprites,
        score_ms: session.score_ms(),
        notice: session
            .final_score_ms
            .map(|final_score_ms| GameOverNotice { final_score_ms }),
    }
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    type Error = std::convert::Infallible;

    fn present(&mut self, _frame: &RenderFrame) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Run settings
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    pub tuning: Tuning,
    /// Seed of the first session; later sessions add their index
    pub seed: u64,
    /// Stop after this many sessions have ended
    pub max_sessions: Option<u32>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            seed: 0,
            max_sessions: None,
        }
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Final score of every finished session, in play order
    pub scores_ms: Vec<f64>,
    /// Frames presented across all sessions
    pub frames: u64,
    pub spawned: u64,
    /// Ended by a quit signal rather than the session cap
    pub quit: bool,
}

impl RunSummary {
    pub fn best_ms(&self) -> Option<f64> {
        self.scores_ms.iter().copied().reduce(f64::max)
    }
}

/// Play sessions until quit or the session cap
pub fn run<C, I, R>(
    config: &LifecycleConfig,
    clock: &mut C,
    input: &mut I,
    renderer: &mut R,
    shapes: &ShapeSet,
) -> Result<RunSummary, LifecycleError>
where
    C: Clock,
    I: InputProvider,
    R: Renderer,
{
    config.tuning.validate()?;
    let mut summary = RunSummary::default();
    let cap = config.max_sessions.unwrap_or(u32::MAX) as usize;

    let mut index = 0u64;
    while summary.scores_ms.len() < cap {
        let seed = config.seed.wrapping_add(index);
        let mut session = Session::new(seed, config.tuning.clone());
        clock.start_session();
        log::info!("Session {} started (seed {})", index + 1, seed);

        let outcome = play(&mut session, clock, input, renderer, shapes, &mut summary, cap)?;
        if outcome == Outcome::Quit {
            summary.quit = true;
            log::info!("Quit requested");
            break;
        }
        index += 1;
    }

    log::info!(
        "{} session(s) played, best {} s",
        summary.scores_ms.len(),
        summary.best_ms().map_or_else(|| "-".to_string(), format_seconds)
    );
    Ok(summary)
}

/// How a single session's loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Restart,
    Finished,
    Quit,
}

/// Drive one session until quit, restart, or the session cap is reached
fn play<C, I, R>(
    session: &mut Session,
    clock: &mut C,
    input: &mut I,
    renderer: &mut R,
    shapes: &ShapeSet,
    summary: &mut RunSummary,
    cap: usize,
) -> Result<Outcome, LifecycleError>
where
    C: Clock,
    I: InputProvider,
    R: Renderer,
{
    loop {
        let dt_ms = clock.wait_next_frame();
        let frame_input = input.poll(session);
        if frame_input.quit {
            return Ok(Outcome::Quit);
        }

        if session.is_running() {
            tick_at(session, &frame_input, dt_ms, clock.session_elapsed_ms(), shapes);
            for event in &session.events {
                log_event(event);
                match event {
                    SessionEvent::Spawned { .. } => summary.spawned += 1,
                    SessionEvent::Terminated { final_score_ms } => {
                        summary.scores_ms.push(*final_score_ms);
                    }
                    _ => {}
                }
            }
        } else if frame_input.restart {
            log::info!("Restarting");
            return Ok(Outcome::Restart);
        }

        renderer
            .present(&build_render_frame(session))
            .map_err(|e| LifecycleError::Render(Box::new(e)))?;
        summary.frames += 1;

        // The last capped session ends on its game-over frame
        if !session.is_running() && summary.scores_ms.len() >= cap {
            return Ok(Outcome::Finished);
        }
    }
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::Spawned { id, kind } => log::debug!("Spawned {:?} #{}", kind, id),
        SessionEvent::Despawned { id } => log::trace!("Despawned #{}", id),
        SessionEvent::DifficultyRaised {
            level,
            zombie_interval_ms,
            meteorite_interval_ms,
        } => log::debug!(
            "Difficulty {}: zombie every {} ms, meteorite every {} ms",
            level,
            zombie_interval_ms,
            meteorite_interval_ms
        ),
        SessionEvent::MeteoriteImpact { id } => log::info!("Hit by meteorite #{}", id),
        SessionEvent::Caught { zombie_ids } => log::info!("Caught by zombie(s) {:?}", zombie_ids),
        SessionEvent::Terminated { final_score_ms } => {
            log::info!("Session over after {} s", format_seconds(*final_score_ms))
        }
    }
}
