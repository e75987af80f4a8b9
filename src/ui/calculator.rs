//! Manual trig calculator strip.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{App, Focus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border()))
        .title(Span::styled(
            " Trig Calculator ",
            Style::default().fg(theme.text()),
        ));

    let label_style = Style::default().fg(theme.muted());
    let value_style = Style::default().fg(theme.text());
    let focused = app.focus == Focus::Calculator;

    let input_style = if focused {
        Style::default().fg(theme.background()).bg(theme.cosine())
    } else {
        value_style
    };
    let input_text = if focused {
        format!("{}_", app.calc_field.buffer)
    } else if app.calc_field.buffer.is_empty() {
        "e.g. 45 or 1.57".to_string()
    } else {
        app.calc_field.buffer.clone()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Angle ", label_style),
        Span::styled(input_text, input_style),
        Span::styled("  mode ", label_style),
        Span::styled(
            app.calc_unit.short_name(),
            Style::default().fg(theme.cosine()).bold(),
        ),
        Span::styled(
            if focused {
                "  [u] switch · [enter] calculate"
            } else {
                "  [tab] to focus"
            },
            label_style,
        ),
    ])];

    match &app.calc_result {
        Some(result) => {
            lines.push(Line::from(vec![
                Span::styled("sin ", label_style),
                Span::styled(format!("{:.4}", result.sin), Style::default().fg(theme.sine())),
                Span::styled("   cos ", label_style),
                Span::styled(format!("{:.4}", result.cos), Style::default().fg(theme.cosine())),
                Span::styled("   tan ", label_style),
                Span::styled(result.tan.to_string(), Style::default().fg(theme.symmetry())),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Results appear here and set the circle's angle.",
                label_style,
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
