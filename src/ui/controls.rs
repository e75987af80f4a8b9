//! Controls panel: angle fields, toggles, playback.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::angle::format::format_radians;

use super::{App, Focus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border()))
        .title(Span::styled(" Controls ", Style::default().fg(theme.text())));

    let label_style = Style::default().fg(theme.muted());
    let value_style = Style::default().fg(theme.text());
    let focused_style = Style::default().fg(theme.background()).bg(theme.cosine());

    let degree_text = if app.focus == Focus::Degrees {
        format!("{}_", app.degree_field.buffer)
    } else {
        format!("{:.2}", app.angle.degrees)
    };
    let radian_text = if app.focus == Focus::Radians {
        format!("{}_", app.radian_field.buffer)
    } else {
        format_radians(app.angle.radians)
    };

    let field_style = |focus: Focus| {
        if app.focus == focus {
            focused_style
        } else {
            value_style
        }
    };

    let toggle = |on: bool| if on { "[x]" } else { "[ ]" };

    let lines = vec![
        Line::from(vec![
            Span::styled("Degrees (°)  ", label_style),
            Span::styled(degree_text, field_style(Focus::Degrees)),
        ]),
        Line::from(vec![
            Span::styled("Radians      ", label_style),
            Span::styled(radian_text, field_style(Focus::Radians)),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled(toggle(app.settings.snap), value_style),
            Span::styled(" Snap to key angles", label_style),
        ]),
        Line::from(vec![
            Span::styled(toggle(app.settings.show_reference), value_style),
            Span::styled(" Show reference angle", label_style),
        ]),
        Line::from(vec![
            Span::styled(toggle(app.settings.show_symmetry), value_style),
            Span::styled(" Show symmetry points", label_style),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled(
                if app.settings.animate { "⏸ " } else { "▶ " },
                Style::default().fg(theme.handle()),
            ),
            Span::styled(format!("Speed {:.1} rad/s ", app.settings.speed), value_style),
            Span::styled(speed_gauge(app.settings.speed), Style::default().fg(theme.cosine())),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// A coarse bar for the 0.1 to 5.0 rad/s speed range.
fn speed_gauge(speed: f64) -> String {
    let filled = ((speed / 5.0) * 10.0).round() as usize;
    let filled = filled.clamp(1, 10);
    format!("{}{}", "■".repeat(filled), "□".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_gauge_spans_the_range() {
        assert_eq!(speed_gauge(0.1), "■□□□□□□□□□");
        assert_eq!(speed_gauge(5.0), "■■■■■■■■■■");
        assert_eq!(speed_gauge(2.5), "■■■■■□□□□□");
    }
}
