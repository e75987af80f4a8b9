//! Live values panel: the derived quantities for the current angle.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::angle::format::format_radians;

use super::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    let angle = app.angle;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border()))
        .title(Span::styled(" Live Values ", Style::default().fg(theme.text())));

    let label_style = Style::default().fg(theme.muted());
    let note_style = Style::default().fg(theme.muted());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("cos(θ) ", label_style),
            Span::styled(format!("{:>8.4}", angle.cosine), Style::default().fg(theme.cosine())),
            Span::styled("   sin(θ) ", label_style),
            Span::styled(format!("{:>8.4}", angle.sine), Style::default().fg(theme.sine())),
        ]),
        Line::from(vec![
            Span::styled("arc    ", label_style),
            Span::styled(
                format!("{:>8.4}", angle.arc_length()),
                Style::default().fg(theme.arc_value()),
            ),
            Span::styled("   sector ", label_style),
            Span::styled(
                format!("{:>8.4}", angle.sector_area()),
                Style::default().fg(theme.sector_value()),
            ),
        ]),
        Line::from(vec![
            Span::styled("quadrant ", label_style),
            Span::styled(angle.quadrant().to_string(), Style::default().fg(theme.text())),
            Span::styled("   reference ", label_style),
            Span::styled(format_radians(angle.reference()), Style::default().fg(theme.reference())),
        ]),
        Line::default(),
        Line::from(Span::styled("What to notice", Style::default().fg(theme.text()).bold())),
        Line::from(Span::styled(
            "· cos(θ) is the x-coordinate; positive in quadrants 1 & 4.",
            note_style,
        )),
        Line::from(Span::styled(
            "· sin(θ) is the y-coordinate; positive in quadrants 1 & 2.",
            note_style,
        )),
        Line::from(Span::styled(
            "· The radius is 1, so the hypotenuse is always 1.",
            note_style,
        )),
        Line::from(Span::styled(
            "· Angles repeat every 360° (2π): 45° and 405° share a point.",
            note_style,
        )),
    ];

    if app.settings.show_symmetry {
        lines.push(Line::from(Span::styled(
            "· Symmetry: (-cos,sin), (-cos,-sin), (cos,-sin) mirror θ.",
            note_style,
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}
