pub mod config;
pub mod geometry;
pub mod reticle;
pub mod runtime;
pub mod session;
pub mod target;
pub mod trainer;
pub mod ui;
pub mod util;

use crate::{
    config::{SettingField, Settings},
    reticle::ReticleMode,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TrainerEvent},
    trainer::{Trainer, CANVAS_HEIGHT, CANVAS_WIDTH},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

/// Tick cadence of the simulation loop, the animation-frame analog.
const TICK_RATE_MS: u64 = 33;

/// terminal aim trainer with a smoothed reticle and timed target spawns
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal aim trainer: a pointer-driven reticle chases your mouse with configurable smoothing while circular targets spawn, expire, and fall to well-placed clicks."
)]
pub struct Cli {
    /// multiplier applied to raw pointer deltas
    #[clap(long)]
    sensitivity: Option<f64>,

    /// reticle smoothing factor in [0, 1); higher is more sluggish
    #[clap(long)]
    smoothing: Option<f64>,

    /// crosshair arm length in canvas units
    #[clap(long)]
    cross_size: Option<f64>,

    /// target diameter in canvas units
    #[clap(long)]
    target_size: Option<f64>,

    /// milliseconds between automatic target spawns
    #[clap(long)]
    spawn_rate: Option<u64>,

    /// disable the automatic spawn timer
    #[clap(long)]
    no_auto_respawn: bool,

    /// reticle style
    #[clap(long, value_enum)]
    reticle_mode: Option<ReticleMode>,

    /// JSON settings file to load at startup (never written back)
    #[clap(long)]
    settings: Option<PathBuf>,
}

impl Cli {
    /// Resolve the starting settings: file values first, explicit flags on
    /// top, defaults for the rest.
    fn to_settings(&self) -> Settings {
        let mut s = self
            .settings
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();
        if let Some(v) = self.sensitivity {
            s.sensitivity = v;
        }
        if let Some(v) = self.smoothing {
            s.smoothing = v.clamp(0.0, 0.95);
        }
        if let Some(v) = self.cross_size {
            s.cross_size = v;
        }
        if let Some(v) = self.target_size {
            s.target_size = v;
        }
        if let Some(v) = self.spawn_rate {
            s.spawn_rate_ms = v.max(1);
        }
        if self.no_auto_respawn {
            s.auto_respawn = false;
        }
        if let Some(v) = self.reticle_mode {
            s.reticle_mode = v;
        }
        s
    }
}

#[derive(Debug)]
pub struct App {
    pub trainer: Trainer,
    /// index into `SettingField::ALL` for the settings panel
    pub selected: usize,
    /// terminal size in cells, for pointer-delta scaling
    pub canvas_cells: (u16, u16),
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self {
            trainer: Trainer::new(cli.to_settings()),
            selected: 0,
            canvas_cells: (80, 24),
        }
    }

    /// Convert a cell-space pointer delta into logical canvas units, so a
    /// full-terminal sweep crosses the whole canvas regardless of cell count.
    fn logical_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        let (cols, rows) = self.canvas_cells;
        let sx = CANVAS_WIDTH / cols.max(1) as f64;
        let sy = CANVAS_HEIGHT / rows.max(1) as f64;
        (dx * sx, dy * sy)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli);
    let res = run_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    res
}

fn run_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let event_source = CrosstermEventSource::new();
    let ticker = FixedTicker::new(Duration::from_millis(TICK_RATE_MS));
    let runner = Runner::new(event_source, ticker);

    let size = terminal.size()?;
    app.canvas_cells = (size.width, size.height);
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            TrainerEvent::Tick => {
                if app.trainer.is_running() {
                    app.trainer.on_tick();
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            TrainerEvent::Resize => {
                let size = terminal.size()?;
                app.canvas_cells = (size.width, size.height);
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            TrainerEvent::Pointer { dx, dy } => {
                let (lx, ly) = app.logical_delta(dx, dy);
                app.trainer.pointer_delta(lx, ly);
            }
            TrainerEvent::Click => {
                if app.trainer.captured {
                    app.trainer.shoot();
                } else {
                    app.trainer.set_captured(true);
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            TrainerEvent::Key(key) => {
                match key.code {
                    KeyCode::Esc => {
                        // release capture first; a second Esc quits
                        if app.trainer.captured {
                            app.trainer.set_captured(false);
                        } else {
                            break;
                        }
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break;
                    }
                    KeyCode::Char('q') => {
                        break;
                    }
                    KeyCode::Char(' ') => {
                        if app.trainer.is_running() {
                            app.trainer.stop();
                        } else {
                            app.trainer.start();
                        }
                    }
                    KeyCode::Char('r') => {
                        app.trainer.reset_settings();
                    }
                    KeyCode::Up => {
                        app.selected =
                            (app.selected + SettingField::ALL.len() - 1) % SettingField::ALL.len();
                    }
                    KeyCode::Down => {
                        app.selected = (app.selected + 1) % SettingField::ALL.len();
                    }
                    KeyCode::Left => {
                        SettingField::ALL[app.selected].adjust(&mut app.trainer.settings, -1);
                    }
                    KeyCode::Right => {
                        SettingField::ALL[app.selected].adjust(&mut app.trainer.settings, 1);
                    }
                    _ => {}
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
