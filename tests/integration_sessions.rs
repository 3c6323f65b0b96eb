// Scenario tests that drive whole sessions on a manually advanced clock.

use std::time::Duration;

use flick::config::{SettingField, Settings};
use flick::geometry::Vec2;
use flick::runtime::{Clock, ManualClock};
use flick::target::TARGET_LIFE_MS;
use flick::trainer::{Trainer, CANVAS_HEIGHT, CANVAS_WIDTH};

fn session(settings: Settings) -> (Trainer, ManualClock) {
    let clock = ManualClock::new();
    let trainer = Trainer::with_clock(settings, Box::new(clock.clone()));
    (trainer, clock)
}

#[test]
fn spawn_cadence_and_expiry_balance_out() {
    let (mut trainer, clock) = session(Settings::default());
    trainer.start();

    // at t=4000 with a 900ms cadence, spawns landed at 900/1800/2700/3600;
    // the 900 one has outlived its 3000ms and is swept the same tick
    clock.advance(Duration::from_millis(4000));
    trainer.on_tick();
    assert_eq!(trainer.field.len(), 3);

    for target in trainer.field.targets() {
        let half = trainer.settings.target_size / 2.0;
        assert!(target.pos.x >= half && target.pos.x <= CANVAS_WIDTH - half);
        assert!(target.pos.y >= half && target.pos.y <= CANVAS_HEIGHT - half);
    }
}

#[test]
fn stopped_loop_leaves_the_field_frozen() {
    let (mut trainer, clock) = session(Settings::default());
    trainer.start();

    clock.advance(Duration::from_millis(2000));
    trainer.on_tick();
    assert!(!trainer.field.is_empty());

    trainer.stop();
    // expiry needs a running loop; ticks are inert while stopped
    clock.advance(Duration::from_millis(TARGET_LIFE_MS * 2));
    trainer.on_tick();
    assert!(!trainer.field.is_empty());

    // a fresh start clears the leftovers immediately
    trainer.start();
    assert!(trainer.field.is_empty());
}

#[test]
fn spawn_rate_edits_apply_at_the_next_start() {
    let (mut trainer, clock) = session(Settings::default());
    trainer.start();
    trainer.stop();

    trainer.settings.spawn_rate_ms = 200;
    trainer.start();
    clock.advance(Duration::from_millis(1000));
    trainer.on_tick();
    assert_eq!(trainer.field.len(), 5);
}

#[test]
fn target_size_edits_apply_to_live_targets() {
    let settings = Settings {
        auto_respawn: false,
        ..Settings::default()
    };
    let (mut trainer, clock) = session(settings);
    trainer.start();

    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    trainer.field.spawn_at(center, clock.now());
    trainer.aim.position = Vec2::new(center.x + 30.0, center.y);

    trainer.shoot();
    assert_eq!(trainer.stats.hits, 0);

    // widen the configured size mid-run: the live target is now in reach
    SettingField::TargetSize.adjust(&mut trainer.settings, 1); // 30
    SettingField::TargetSize.adjust(&mut trainer.settings, 1); // 32
    for _ in 0..14 {
        SettingField::TargetSize.adjust(&mut trainer.settings, 1); // 60
    }
    trainer.shoot();
    assert_eq!(trainer.stats.hits, 1);
}

#[test]
fn capture_flow_gates_aim_and_recenters() {
    let (mut trainer, _clock) = session(Settings::default());
    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);

    trainer.start();
    trainer.pointer_delta(25.0, 25.0);
    assert_eq!(trainer.aim.target, center);

    trainer.set_captured(true);
    trainer.pointer_delta(25.0, 25.0);
    assert_eq!(trainer.aim.target, Vec2::new(center.x + 25.0, center.y + 25.0));

    // host released capture (e.g. escape); motion goes quiet again
    trainer.set_captured(false);
    trainer.pointer_delta(-100.0, 0.0);
    assert_eq!(trainer.aim.target, Vec2::new(center.x + 25.0, center.y + 25.0));

    // reacquisition recenters both points
    trainer.set_captured(true);
    assert_eq!(trainer.aim.position, center);
    assert_eq!(trainer.aim.target, center);
}

#[test]
fn restart_rearms_the_timer_and_zeroes_the_run() {
    let (mut trainer, clock) = session(Settings::default());
    trainer.start();
    clock.advance(Duration::from_millis(950));
    trainer.on_tick();
    trainer.aim.position = trainer.field.targets()[0].pos;
    trainer.shoot();
    assert_eq!(trainer.stats.hits, 1);
    trainer.stop();

    trainer.start();
    assert_eq!(trainer.stats.hits, 0);
    assert_eq!(trainer.field.len(), 0);

    clock.advance(Duration::from_millis(950));
    trainer.on_tick();
    assert_eq!(trainer.field.len(), 1);
}
