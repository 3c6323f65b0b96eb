use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseButton, MouseEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TrainerEvent {
    Key(KeyEvent),
    /// Relative pointer motion in terminal cells
    Pointer { dx: f64, dy: f64 },
    /// Primary-button press on the play surface
    Click,
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm.
///
/// The terminal reports absolute mouse positions; successive positions are
/// differenced here into relative deltas, which is what the trainer core
/// consumes.
pub struct CrosstermEventSource {
    rx: Receiver<TrainerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let mut last_pos: Option<(u16, u16)> = None;
            loop {
                match event::read() {
                    Ok(CtEvent::Key(key)) => {
                        if tx.send(TrainerEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(CtEvent::Mouse(m)) => match m.kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            if let Some((px, py)) = last_pos {
                                let dx = m.column as f64 - px as f64;
                                let dy = m.row as f64 - py as f64;
                                if (dx != 0.0 || dy != 0.0)
                                    && tx.send(TrainerEvent::Pointer { dx, dy }).is_err()
                                {
                                    break;
                                }
                            }
                            last_pos = Some((m.column, m.row));
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            last_pos = Some((m.column, m.row));
                            if tx.send(TrainerEvent::Click).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    },
                    Ok(CtEvent::Resize(_, _)) => {
                        if tx.send(TrainerEvent::Resize).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TrainerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TrainerEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> TrainerEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                TrainerEvent::Tick
            }
        }
    }
}

/// Injectable time source so the simulation can be driven deterministically.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap();
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        assert_matches!(runner.step(), TrainerEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TrainerEvent::Pointer { dx: 2.0, dy: -1.0 }).unwrap();
        tx.send(TrainerEvent::Click).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), TrainerEvent::Pointer { dx, dy } if dx == 2.0 && dy == -1.0);
        assert_matches!(runner.step(), TrainerEvent::Click);
    }

    #[test]
    fn manual_clock_advances_shared_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let t0 = clock.now();

        handle.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - t0, Duration::from_millis(250));

        handle.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - t0, Duration::from_millis(500));
    }
}
