use std::sync::mpsc;
use std::time::Duration;

use assert_matches::assert_matches;

use flick::config::Settings;
use flick::geometry::Vec2;
use flick::runtime::{Clock, FixedTicker, ManualClock, Runner, TestEventSource, TrainerEvent};
use flick::trainer::{Trainer, CANVAS_HEIGHT, CANVAS_WIDTH};

fn canvas_center() -> Vec2 {
    Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0)
}

fn drill_trainer(settings: Settings) -> (Trainer, ManualClock) {
    let clock = ManualClock::new();
    let trainer = Trainer::with_clock(settings, Box::new(clock.clone()));
    (trainer, clock)
}

// Headless integration using the internal runtime + Trainer without a TTY.
// Verifies the whole center-drill flow via Runner/TestEventSource.
#[test]
fn headless_center_drill_scores_one_hit() {
    let settings = Settings {
        auto_respawn: false,
        ..Settings::default()
    };
    let (mut trainer, clock) = drill_trainer(settings);

    trainer.start();
    // capture acquisition snaps the reticle to the canvas center
    trainer.set_captured(true);
    trainer.field.spawn_at(canvas_center(), clock.now());

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    tx.send(TrainerEvent::Click).unwrap();
    drop(tx);

    // Drive a tiny event loop: ticks advance the sim, the click shoots
    for _ in 0..20u32 {
        match runner.step() {
            TrainerEvent::Tick => {
                clock.advance(Duration::from_millis(33));
                trainer.on_tick();
            }
            TrainerEvent::Click => {
                trainer.shoot();
                break;
            }
            _ => {}
        }
    }

    let snapshot = trainer.snapshot();
    assert_eq!(snapshot.hits, 1);
    assert_eq!(snapshot.score, 10);
    assert_eq!(snapshot.shots, 1);
    assert_eq!(snapshot.target_count, 0);
}

#[test]
fn headless_pointer_flick_reaches_an_off_center_target() {
    // zero smoothing: the reticle reaches the aim target in one tick
    let settings = Settings {
        smoothing: 0.0,
        auto_respawn: false,
        ..Settings::default()
    };
    let (mut trainer, clock) = drill_trainer(settings);

    trainer.start();
    trainer.set_captured(true);
    let target_pos = Vec2::new(canvas_center().x + 40.0, canvas_center().y - 20.0);
    trainer.field.spawn_at(target_pos, clock.now());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(TrainerEvent::Pointer { dx: 40.0, dy: -20.0 }).unwrap();
    tx.send(TrainerEvent::Click).unwrap();
    drop(tx);

    let mut fired = false;
    for _ in 0..20u32 {
        match runner.step() {
            TrainerEvent::Tick => {
                clock.advance(Duration::from_millis(33));
                trainer.on_tick();
            }
            TrainerEvent::Pointer { dx, dy } => {
                trainer.pointer_delta(dx, dy);
                // one zero-smoothing tick snaps the reticle onto the target
                clock.advance(Duration::from_millis(33));
                trainer.on_tick();
            }
            TrainerEvent::Click => {
                trainer.shoot();
                fired = true;
                break;
            }
            _ => {}
        }
    }

    assert!(fired, "the queued click should have been delivered");
    assert_eq!(trainer.aim.position, target_pos);
    assert_eq!(trainer.snapshot().hits, 1);
    assert_eq!(trainer.snapshot().target_count, 0);
}

#[test]
fn headless_runner_falls_back_to_ticks() {
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    assert_matches!(runner.step(), TrainerEvent::Tick);
}
