use rand::Rng;
use std::time::{Duration, Instant};

use crate::geometry::Vec2;

/// Fixed target lifetime; not part of the tunable settings.
pub const TARGET_LIFE_MS: u64 = 3000;

/// A live circular target. Immutable after creation; destroyed either by the
/// expiry sweep or by a hit, whichever comes first.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub pos: Vec2,
    pub life: Duration,
    pub spawned: Instant,
}

/// Owns the live target set and the periodic spawn schedule.
///
/// Targets carry no identity beyond position and spawn time; duplicates at
/// the same coordinates are allowed.
#[derive(Debug)]
pub struct TargetField {
    targets: Vec<Target>,
    interval: Duration,
    next_spawn: Option<Instant>,
}

impl TargetField {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            interval: Duration::from_millis(900),
            next_spawn: None,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Spawn a target at a uniformly random position whose bounding circle
    /// lies inside `[0, bounds.x] x [0, bounds.y]`. On an axis too small to
    /// fit the circle, the coordinate clamps to the canvas center.
    pub fn spawn(&mut self, bounds: Vec2, size: f64, now: Instant) {
        let mut rng = rand::thread_rng();
        let pos = Vec2::new(
            spawn_coord(&mut rng, bounds.x, size),
            spawn_coord(&mut rng, bounds.y, size),
        );
        self.spawn_at(pos, now);
    }

    /// Place a target at an exact position. Used by `spawn` and by hosts
    /// that drive deterministic drills.
    pub fn spawn_at(&mut self, pos: Vec2, now: Instant) {
        self.targets.push(Target {
            pos,
            life: Duration::from_millis(TARGET_LIFE_MS),
            spawned: now,
        });
    }

    /// Remove every target whose lifetime has elapsed; full scan, order
    /// independent. A target is still live at exactly `spawned + life`.
    /// Returns how many were removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let before = self.targets.len();
        self.targets
            .retain(|t| now.duration_since(t.spawned) <= t.life);
        before - self.targets.len()
    }

    /// Remove every target whose center is within `radius` of `pos`
    /// (boundary inclusive). Returns how many were removed.
    pub fn remove_within(&mut self, pos: Vec2, radius: f64) -> usize {
        let before = self.targets.len();
        self.targets.retain(|t| t.pos.distance_to(pos) > radius);
        before - self.targets.len()
    }

    /// Arm the periodic spawn schedule. A no-op when `auto_respawn` is
    /// false; re-arming replaces any existing schedule, so at most one timer
    /// is ever active.
    pub fn start_timer(&mut self, now: Instant, interval: Duration, auto_respawn: bool) {
        self.interval = interval;
        self.next_spawn = if auto_respawn {
            Some(now + interval)
        } else {
            None
        };
    }

    pub fn stop_timer(&mut self) {
        self.next_spawn = None;
    }

    pub fn timer_armed(&self) -> bool {
        self.next_spawn.is_some()
    }

    /// Fire one spawn per interval elapsed since the schedule last fired,
    /// so a slow host frame still produces the same number of targets.
    /// Returns how many were spawned.
    pub fn run_due_spawns(&mut self, now: Instant, bounds: Vec2, size: f64) -> usize {
        let mut spawned = 0;
        while let Some(due) = self.next_spawn {
            if due > now {
                break;
            }
            self.spawn(bounds, size, due);
            self.next_spawn = Some(due + self.interval);
            spawned += 1;
        }
        spawned
    }

    /// Clear the live set. The spawn schedule is untouched.
    pub fn reset(&mut self) {
        self.targets.clear();
    }
}

impl Default for TargetField {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_coord<R: Rng>(rng: &mut R, extent: f64, size: f64) -> f64 {
    let half = size / 2.0;
    if extent < size {
        // degenerate bounds: center the target on this axis
        return extent / 2.0;
    }
    rng.gen_range(half..=extent - half)
}
