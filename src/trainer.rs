use itertools::Itertools;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::geometry::Vec2;
use crate::reticle::AimState;
use crate::runtime::{Clock, SystemClock};
use crate::session::{RunSnapshot, RunState, RunStats, StatsObserver, HIT_SCORE};
use crate::target::TargetField;
use crate::util::std_dev;

/// Logical canvas size. All positions, sizes, and distances in the core are
/// in these units; terminal cell geometry never reaches the simulation.
pub const CANVAS_WIDTH: f64 = 320.0;
pub const CANVAS_HEIGHT: f64 = 180.0;

/// The training session: reticle smoothing, target lifecycle, hit
/// resolution, and run statistics, all owned by one context object.
///
/// Single-threaded by design: ticks, spawns, pointer motion, and shots are
/// delivered sequentially by the host event loop, so every operation sees a
/// consistent live set.
pub struct Trainer {
    pub settings: Settings,
    pub aim: AimState,
    pub field: TargetField,
    pub stats: RunStats,
    pub run_state: RunState,
    /// whether exclusive pointer capture is currently held
    pub captured: bool,
    bounds: Vec2,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
    /// seconds-since-start of every hit this run, for the results readouts
    hit_log: Vec<f64>,
    clock: Box<dyn Clock>,
    observer: Option<Box<dyn StatsObserver>>,
}

impl Trainer {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, Box::new(SystemClock))
    }

    pub fn with_clock(settings: Settings, clock: Box<dyn Clock>) -> Self {
        let bounds = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        Self {
            settings,
            aim: AimState::centered(bounds),
            field: TargetField::new(),
            stats: RunStats::default(),
            run_state: RunState::Stopped,
            captured: false,
            bounds,
            started_at: None,
            stopped_at: None,
            hit_log: Vec::new(),
            clock,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn StatsObserver>) {
        self.observer = Some(observer);
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.bounds = Vec2::new(width, height);
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Stopped -> Running. Zeroes the counters, clears the live set, and
    /// arms the spawn timer. No-op when already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let now = self.clock.now();
        self.run_state = RunState::Running;
        self.stats.reset();
        self.hit_log.clear();
        self.field.reset();
        self.started_at = Some(now);
        self.stopped_at = None;
        self.field.start_timer(
            now,
            Duration::from_millis(self.settings.spawn_rate_ms),
            self.settings.auto_respawn,
        );
        self.notify();
    }

    /// Running -> Stopped. Disarms the spawn timer synchronously; counters
    /// and the live set stay observable until the next `start`.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.run_state = RunState::Stopped;
        self.stopped_at = Some(self.clock.now());
        self.field.stop_timer();
    }

    /// One simulation tick: advance the reticle, fire due spawns, sweep
    /// expired targets. A tick delivered after `stop` is a no-op.
    pub fn on_tick(&mut self) {
        if !self.is_running() {
            return;
        }
        self.aim.advance(self.settings.smoothing);
        let now = self.clock.now();
        let spawned = self
            .field
            .run_due_spawns(now, self.bounds, self.settings.target_size);
        let expired = self.field.sweep_expired(now);
        if spawned > 0 || expired > 0 {
            self.notify();
        }
    }

    /// Raw relative pointer motion. Ignored unless capture is held.
    pub fn pointer_delta(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.aim.nudge(dx, dy, self.settings.sensitivity);
        }
    }

    /// Observe a capture-state transition. Acquisition snaps the reticle to
    /// the canvas center, discarding smoothing lag.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if captured {
            self.aim.recenter(self.bounds);
        }
    }

    /// Register a shot at the current reticle position. Every live target
    /// within the hit radius is removed and scored in the same pass, so
    /// overlapping targets can all fall to one shot.
    ///
    /// The hit radius is half the *currently configured* target size, even
    /// for targets spawned under a different size.
    pub fn shoot(&mut self) {
        self.stats.shots += 1;
        let radius = self.settings.target_size / 2.0;
        let removed = self.field.remove_within(self.aim.position, radius);
        if removed > 0 {
            let at = self.run_elapsed_secs();
            for _ in 0..removed {
                self.stats.hits += 1;
                self.stats.score += HIT_SCORE;
                self.hit_log.push(at);
            }
        }
        self.notify();
    }

    /// Restore the documented default settings. Leaves the run state, the
    /// counters, and the live set untouched; takes effect on the next
    /// tick/spawn/shoot.
    pub fn reset_settings(&mut self) {
        self.settings = Settings::default();
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            score: self.stats.score,
            hits: self.stats.hits,
            shots: self.stats.shots,
            target_count: self.field.len(),
        }
    }

    /// Seconds since the run started, frozen at `stop`.
    pub fn run_elapsed_secs(&self) -> f64 {
        match self.started_at {
            Some(start) => {
                let end = self.stopped_at.unwrap_or_else(|| self.clock.now());
                end.duration_since(start).as_secs_f64()
            }
            None => 0.0,
        }
    }

    pub fn hits_per_minute(&self) -> Option<f64> {
        let elapsed = self.run_elapsed_secs();
        if elapsed <= 0.0 {
            return None;
        }
        Some(self.stats.hits as f64 / elapsed * 60.0)
    }

    /// Standard deviation of the gaps between consecutive hits, in seconds.
    /// Lower is steadier. Needs at least three hits to mean anything.
    pub fn consistency(&self) -> Option<f64> {
        let gaps: Vec<f64> = self
            .hit_log
            .iter()
            .tuple_windows()
            .map(|(a, b)| b - a)
            .collect();
        if gaps.len() < 2 {
            return None;
        }
        std_dev(&gaps)
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer.stats_changed(snapshot);
        }
    }
}

impl std::fmt::Debug for Trainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trainer")
            .field("settings", &self.settings)
            .field("aim", &self.aim)
            .field("stats", &self.stats)
            .field("run_state", &self.run_state)
            .field("captured", &self.captured)
            .field("targets", &self.field.len())
            .finish()
    }
}
