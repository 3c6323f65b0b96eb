use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::reticle::ReticleMode;

/// Tunable parameters for a training session.
///
/// Edits apply on the next tick/spawn/shoot; `reset_settings` on the trainer
/// replaces the whole record with [`Settings::default`]. The record is never
/// written back to disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// multiplier applied to raw pointer deltas
    pub sensitivity: f64,
    /// fraction of the remaining gap the reticle keeps per tick, in [0, 1)
    pub smoothing: f64,
    /// crosshair arm length, canvas units
    pub cross_size: f64,
    /// target diameter, canvas units
    pub target_size: f64,
    /// milliseconds between automatic spawns
    pub spawn_rate_ms: u64,
    /// whether the spawn timer runs at all
    pub auto_respawn: bool,
    pub reticle_mode: ReticleMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            smoothing: 0.1,
            cross_size: 24.0,
            target_size: 28.0,
            spawn_rate_ms: 900,
            auto_respawn: true,
            reticle_mode: ReticleMode::Cross,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing keys fall back to the
    /// defaults; a missing or malformed file yields the full defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match fs::read(path.as_ref()) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => Settings::default(),
        }
    }
}

/// One row of the in-app settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Sensitivity,
    Smoothing,
    CrossSize,
    TargetSize,
    SpawnRate,
    AutoRespawn,
    ReticleMode,
}

impl SettingField {
    pub const ALL: [SettingField; 7] = [
        SettingField::Sensitivity,
        SettingField::Smoothing,
        SettingField::CrossSize,
        SettingField::TargetSize,
        SettingField::SpawnRate,
        SettingField::AutoRespawn,
        SettingField::ReticleMode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingField::Sensitivity => "sensitivity",
            SettingField::Smoothing => "smoothing",
            SettingField::CrossSize => "cross size",
            SettingField::TargetSize => "target size",
            SettingField::SpawnRate => "spawn rate (ms)",
            SettingField::AutoRespawn => "auto respawn",
            SettingField::ReticleMode => "reticle",
        }
    }

    pub fn value_text(self, s: &Settings) -> String {
        match self {
            SettingField::Sensitivity => format!("{:.1}", s.sensitivity),
            SettingField::Smoothing => format!("{:.2}", s.smoothing),
            SettingField::CrossSize => format!("{:.0}", s.cross_size),
            SettingField::TargetSize => format!("{:.0}", s.target_size),
            SettingField::SpawnRate => s.spawn_rate_ms.to_string(),
            SettingField::AutoRespawn => if s.auto_respawn { "on" } else { "off" }.to_string(),
            SettingField::ReticleMode => s.reticle_mode.to_string().to_lowercase(),
        }
    }

    /// Step the field up (`dir > 0`) or down (`dir < 0`), clamped so the
    /// record keeps its invariants (sensitivity and sizes stay positive,
    /// smoothing stays below 1).
    pub fn adjust(self, s: &mut Settings, dir: i8) {
        let up = dir > 0;
        match self {
            SettingField::Sensitivity => {
                s.sensitivity = step(s.sensitivity, 0.1, up).max(0.1);
            }
            SettingField::Smoothing => {
                s.smoothing = step(s.smoothing, 0.05, up).clamp(0.0, 0.95);
            }
            SettingField::CrossSize => {
                s.cross_size = step(s.cross_size, 2.0, up).max(4.0);
            }
            SettingField::TargetSize => {
                s.target_size = step(s.target_size, 2.0, up).max(4.0);
            }
            SettingField::SpawnRate => {
                s.spawn_rate_ms = if up {
                    s.spawn_rate_ms.saturating_add(100)
                } else {
                    s.spawn_rate_ms.saturating_sub(100).max(100)
                };
            }
            SettingField::AutoRespawn => {
                s.auto_respawn = !s.auto_respawn;
            }
            SettingField::ReticleMode => {
                s.reticle_mode = if up {
                    s.reticle_mode.next()
                } else {
                    s.reticle_mode.prev()
                };
            }
        }
    }
}

fn step(value: f64, by: f64, up: bool) -> f64 {
    if up {
        value + by
    } else {
        value - by
    }
}
