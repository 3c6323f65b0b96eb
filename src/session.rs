/// Points awarded per hit.
pub const HIT_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Monotonically non-decreasing counters for one run; zeroed only when a new
/// run starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub score: u32,
    pub hits: u32,
    pub shots: u32,
}

impl RunStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Hit percentage, if any shots have been fired.
    pub fn accuracy(&self) -> Option<f64> {
        if self.shots == 0 {
            return None;
        }
        Some(self.hits as f64 / self.shots as f64 * 100.0)
    }
}

/// What the textual-display collaborator sees after every mutating
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSnapshot {
    pub score: u32,
    pub hits: u32,
    pub shots: u32,
    pub target_count: usize,
}

/// Observer for stats changes (the score/hits/shots/target-count readout).
pub trait StatsObserver {
    fn stats_changed(&mut self, snapshot: RunSnapshot);
}
