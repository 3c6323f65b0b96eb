use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Block, Borders, Paragraph, Widget,
    },
};

use crate::config::SettingField;
use crate::trainer::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::App;

const CROSS_GAP: f64 = 4.0;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let trainer = &self.trainer;

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let panel_lines = if trainer.is_running() {
            0
        } else {
            // settings rows plus headline and optional results row
            SettingField::ALL.len() as u16 + 2
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(panel_lines),
                Constraint::Length(1),
            ])
            .split(area);

        // stats header
        let snapshot = trainer.snapshot();
        let status = if trainer.is_running() {
            Span::styled("running", Style::default().fg(Color::Green).patch(bold_style))
        } else {
            Span::styled("stopped", Style::default().fg(Color::Red).patch(bold_style))
        };
        let capture_hint = if trainer.captured {
            Span::styled("  captured", dim_style)
        } else {
            Span::styled("  click the canvas to capture the pointer", dim_style)
        };
        let header = Paragraph::new(Line::from(vec![
            status,
            Span::raw("  "),
            Span::styled(format!("score {}", snapshot.score), bold_style),
            Span::raw(format!(
                "  hits {}  shots {}  targets {}",
                snapshot.hits, snapshot.shots, snapshot.target_count
            )),
            capture_hint,
        ]))
        .alignment(Alignment::Left);
        header.render(chunks[0], buf);

        // play surface
        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(" flick "))
            .marker(Marker::Braille)
            .x_bounds([0.0, CANVAS_WIDTH])
            .y_bounds([0.0, CANVAS_HEIGHT])
            .paint(|ctx| {
                let radius = trainer.settings.target_size / 2.0;
                for target in trainer.field.targets() {
                    ctx.draw(&Circle {
                        x: target.pos.x,
                        y: CANVAS_HEIGHT - target.pos.y,
                        radius,
                        color: Color::Green,
                    });
                }

                // reticle at the smoothed position; canvas y points up
                let ax = trainer.aim.position.x;
                let ay = CANVAS_HEIGHT - trainer.aim.position.y;
                let mode = trainer.settings.reticle_mode;
                if mode.draws_cross() {
                    let arm = trainer.settings.cross_size;
                    for (x1, y1, x2, y2) in [
                        (ax - arm, ay, ax - CROSS_GAP, ay),
                        (ax + CROSS_GAP, ay, ax + arm, ay),
                        (ax, ay - arm, ax, ay - CROSS_GAP),
                        (ax, ay + CROSS_GAP, ax, ay + arm),
                    ] {
                        ctx.draw(&CanvasLine {
                            x1,
                            y1,
                            x2,
                            y2,
                            color: Color::White,
                        });
                    }
                }
                if mode.draws_dot() {
                    ctx.draw(&Points {
                        coords: &[(ax, ay)],
                        color: Color::White,
                    });
                }
            });
        canvas.render(chunks[1], buf);

        // settings panel and run summary, shown while stopped
        if !trainer.is_running() {
            let mut lines = Vec::with_capacity(SettingField::ALL.len() + 2);
            if snapshot.shots > 0 {
                let accuracy = trainer
                    .stats
                    .accuracy()
                    .map_or_else(|| "-".into(), |a| format!("{:.0}%", a));
                let pace = trainer
                    .hits_per_minute()
                    .map_or_else(|| "-".into(), |h| format!("{:.1} hits/min", h));
                let consistency = trainer
                    .consistency()
                    .map_or_else(|| "-".into(), |sd| format!("{:.2}s spread", sd));
                lines.push(Line::from(Span::styled(
                    format!(
                        "last run: score {} · accuracy {} · {} · {}",
                        snapshot.score, accuracy, pace, consistency
                    ),
                    Style::default().fg(Color::Magenta),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "press space to start a run",
                    dim_style,
                )));
            }
            lines.push(Line::from(Span::styled("settings", bold_style)));
            for (idx, field) in SettingField::ALL.iter().enumerate() {
                let row = format!(
                    "{:<16} {}",
                    field.label(),
                    field.value_text(&trainer.settings)
                );
                let style = if idx == self.selected {
                    Style::default().fg(Color::Yellow).patch(bold_style)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(row, style)));
            }
            Paragraph::new(lines).render(chunks[2], buf);
        }

        // key help footer
        let footer = Paragraph::new(Span::styled(
            "space start/stop · click capture/shoot · esc release · ↑↓ select · ←→ adjust · r reset · q quit",
            dim_style,
        ))
        .alignment(Alignment::Center);
        footer.render(chunks[3], buf);
    }
}
