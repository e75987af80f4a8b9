//! The unit-circle diagram, drawn on a braille canvas.

use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::angle::format::format_coordinate;
use crate::angle::{KEY_ANGLES, SNAP_GRID};

use super::App;

/// Coordinate space of the diagram, matching a 3x3 window around the unit
/// circle. All drawing and pointer mapping happens in these units.
const BOUND: f64 = 1.5;

/// Maps terminal cells inside the circle panel to diagram coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CircleGeometry {
    inner: Rect,
}

impl CircleGeometry {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.inner.x
            && column < self.inner.x + self.inner.width
            && row >= self.inner.y
            && row < self.inner.y + self.inner.height
    }

    /// Center of the given cell in diagram coordinates, y up. Cells outside
    /// the panel still map sensibly, so a drag that strays past the border
    /// keeps working.
    pub fn point_at(&self, column: u16, row: u16) -> (f64, f64) {
        let dx = f64::from(column) - f64::from(self.inner.x) + 0.5;
        let dy = f64::from(row) - f64::from(self.inner.y) + 0.5;
        let x = -BOUND + dx / f64::from(self.inner.width) * 2.0 * BOUND;
        let y = BOUND - dy / f64::from(self.inner.height) * 2.0 * BOUND;
        (x, y)
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) -> CircleGeometry {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border()))
        .title(Span::styled(" Unit Circle ", Style::default().fg(theme.text())));
    let inner = block.inner(area);

    let angle = app.angle;
    let settings = app.settings;

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([-BOUND, BOUND])
        .y_bounds([-BOUND, BOUND])
        .paint(move |ctx| {
            // Axes
            ctx.draw(&CanvasLine {
                x1: -BOUND,
                y1: 0.0,
                x2: BOUND,
                y2: 0.0,
                color: theme.axis(),
            });
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: -BOUND,
                x2: 0.0,
                y2: BOUND,
                color: theme.axis(),
            });

            // Main circle
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: theme.circle(),
            });

            // Ticks every 15°, longer at the 30°/45° family
            for &tick in SNAP_GRID.iter() {
                let degrees = tick.to_degrees().round() as u32;
                let is_major = degrees % 30 == 0 || degrees % 45 == 0;
                let reach = if is_major { 1.08 } else { 1.04 };
                ctx.draw(&CanvasLine {
                    x1: tick.cos(),
                    y1: tick.sin(),
                    x2: tick.cos() * reach,
                    y2: tick.sin() * reach,
                    color: if is_major { theme.muted() } else { theme.axis() },
                });
            }

            // Swept arc along the circumference, tinted by how far around
            // the circle the angle has come
            let sweep_color = theme.accent((angle.radians / TAU) as f32, 0.6);
            draw_arc(ctx, 1.0, 0.0, angle.radians, sweep_color, false);

            // Central angle arc
            draw_arc(ctx, 0.25, 0.0, angle.radians, theme.handle(), false);

            // Reference angle arc, measured from the nearest x-axis half
            if settings.show_reference {
                let start = reference_arc_start(angle.radians);
                draw_arc(ctx, 0.38, start, angle.radians, theme.reference(), true);
            }

            // Radius to the handle
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: 0.0,
                x2: angle.cosine,
                y2: angle.sine,
                color: theme.muted(),
            });

            // Dotted drops onto the axes: the vertical marks the cosine
            // position, the horizontal the sine position
            draw_dashed_line(ctx, angle.cosine, angle.sine, angle.cosine, 0.0, theme.cosine());
            draw_dashed_line(ctx, angle.cosine, angle.sine, 0.0, angle.sine, theme.sine());

            // Symmetry points across both axes and the origin
            if settings.show_symmetry {
                for (x, y) in [
                    (-angle.cosine, angle.sine),
                    (-angle.cosine, -angle.sine),
                    (angle.cosine, -angle.sine),
                ] {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: 0.03,
                        color: theme.symmetry(),
                    });
                }
            }

            // Draggable handle
            ctx.draw(&Circle {
                x: angle.cosine,
                y: angle.sine,
                radius: 0.05,
                color: theme.handle(),
            });
            ctx.draw(&Points {
                coords: &[(angle.cosine, angle.sine)],
                color: theme.handle(),
            });

            // Labels are printed last so shapes never overdraw them
            for key in KEY_ANGLES {
                let is_cardinal = key.degrees % 90 == 0;
                let style = if is_cardinal {
                    Style::default().fg(theme.cosine())
                } else {
                    Style::default().fg(theme.muted())
                };
                ctx.print(
                    key.radians.cos() * 1.26,
                    key.radians.sin() * 1.22,
                    ratatui::text::Line::styled(key.label, style),
                );
            }

            let bisector = angle.radians / 2.0;
            ctx.print(
                0.55 * bisector.cos(),
                0.55 * bisector.sin(),
                ratatui::text::Line::styled(
                    format!("{:.1}°", angle.degrees),
                    Style::default().fg(theme.handle()).bold(),
                ),
            );

            ctx.print(
                angle.cosine * 1.3,
                angle.sine * 1.35,
                ratatui::text::Line::styled(
                    format!(
                        "({}, {})",
                        format_coordinate(angle.cosine),
                        format_coordinate(angle.sine)
                    ),
                    Style::default().fg(theme.text()).bold(),
                ),
            );
        });

    frame.render_widget(canvas, area);
    CircleGeometry { inner }
}

/// Start of the reference-angle arc: the x-axis half nearest the terminal
/// ray (0 in Q1, π in Q2/Q3, 2π in Q4).
fn reference_arc_start(radians: f64) -> f64 {
    if radians <= FRAC_PI_2 {
        0.0
    } else if radians <= 3.0 * FRAC_PI_2 {
        PI
    } else {
        TAU
    }
}

fn draw_arc(ctx: &mut Context, radius: f64, from: f64, to: f64, color: Color, dashed: bool) {
    let span = to - from;
    let steps = (span.abs() / 0.02).ceil().max(1.0) as usize;
    for i in 0..steps {
        if dashed && i % 2 == 1 {
            continue;
        }
        let a0 = from + span * (i as f64 / steps as f64);
        let a1 = from + span * ((i + 1) as f64 / steps as f64);
        ctx.draw(&CanvasLine {
            x1: radius * a0.cos(),
            y1: radius * a0.sin(),
            x2: radius * a1.cos(),
            y2: radius * a1.sin(),
            color,
        });
    }
}

fn draw_dashed_line(ctx: &mut Context, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
    let steps = 14;
    for i in 0..steps {
        if i % 2 == 1 {
            continue;
        }
        let t0 = i as f64 / steps as f64;
        let t1 = (i + 1) as f64 / steps as f64;
        ctx.draw(&CanvasLine {
            x1: x1 + (x2 - x1) * t0,
            y1: y1 + (y2 - y1) * t0,
            x2: x1 + (x2 - x1) * t1,
            y2: y1 + (y2 - y1) * t1,
            color,
        });
    }
}
