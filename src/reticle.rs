use clap::ValueEnum;
use serde::{Deserialize, Deserializer};

use crate::geometry::Vec2;

/// Cosmetic reticle style; has no effect on hit detection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, strum_macros::Display)]
pub enum ReticleMode {
    #[default]
    Cross,
    Dot,
    CrossDot,
}

impl ReticleMode {
    /// Parse a mode name, failing closed to `Cross` on anything unknown.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "dot" => ReticleMode::Dot,
            "cross+dot" | "cross-dot" | "crossdot" => ReticleMode::CrossDot,
            _ => ReticleMode::Cross,
        }
    }

    pub fn draws_cross(self) -> bool {
        self != ReticleMode::Dot
    }

    pub fn draws_dot(self) -> bool {
        self != ReticleMode::Cross
    }

    pub fn next(self) -> Self {
        match self {
            ReticleMode::Cross => ReticleMode::Dot,
            ReticleMode::Dot => ReticleMode::CrossDot,
            ReticleMode::CrossDot => ReticleMode::Cross,
        }
    }

    pub fn prev(self) -> Self {
        self.next().next()
    }
}

impl<'de> Deserialize<'de> for ReticleMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ReticleMode::parse(&s))
    }
}

/// The reticle's motion state: the rendered `position` chases the raw
/// accumulated `target` with first-order low-pass smoothing.
///
/// Neither point is clamped to the canvas; the accumulator may drift
/// off-screen and the rendered position follows it there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimState {
    pub position: Vec2,
    pub target: Vec2,
}

impl AimState {
    pub fn centered(bounds: Vec2) -> Self {
        let center = Vec2::new(bounds.x / 2.0, bounds.y / 2.0);
        Self {
            position: center,
            target: center,
        }
    }

    /// One smoothing tick: close a `(1 - smoothing)` fraction of the
    /// remaining gap on each axis.
    pub fn advance(&mut self, smoothing: f64) {
        let gain = 1.0 - smoothing;
        self.position.x += (self.target.x - self.position.x) * gain;
        self.position.y += (self.target.y - self.position.y) * gain;
    }

    /// Accumulate a raw pointer delta into the aim target. Callers gate this
    /// on exclusive capture being held.
    pub fn nudge(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.target.x += dx * sensitivity;
        self.target.y += dy * sensitivity;
    }

    /// Snap both points back to the canvas center, discarding smoothing lag.
    /// Invoked when exclusive capture is (re)acquired.
    pub fn recenter(&mut self, bounds: Vec2) {
        *self = AimState::centered(bounds);
    }
}
