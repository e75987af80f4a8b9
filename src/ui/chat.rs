//! Math tutor chat overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tutor::ChatRole;

use super::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    let overlay = centered_rect(area, 70, 80);

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.cosine()))
        .style(Style::default().bg(theme.background()))
        .title(Span::styled(
            " Math Tutor · [esc] close ",
            Style::default().fg(theme.text()),
        ));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    if inner.height < 3 || inner.width < 8 {
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    // Transcript, bottom-aligned: wrap every message, keep the tail.
    let width = sections[0].width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for message in &app.chat_log {
        let (prefix, style) = match message.role {
            ChatRole::User => ("You: ", Style::default().fg(theme.cosine())),
            ChatRole::Assistant => ("Tutor: ", Style::default().fg(theme.text())),
        };
        for (i, chunk) in wrap_text(&format!("{}{}", prefix, message.text), width)
            .into_iter()
            .enumerate()
        {
            let style = if i == 0 { style } else { style.dim() };
            lines.push(Line::from(Span::styled(chunk, style)));
        }
    }
    if app.chat_pending {
        lines.push(Line::from(Span::styled(
            "Tutor is thinking…",
            Style::default().fg(theme.muted()).italic(),
        )));
    }

    let visible = sections[0].height as usize;
    let skip = lines.len().saturating_sub(visible);
    let transcript = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>());
    frame.render_widget(transcript, sections[0]);

    // Input line
    let can_send = app.tutor.is_enabled() && !app.chat_pending;
    let prompt = if can_send {
        format!("> {}_", app.chat_field.buffer)
    } else if app.chat_pending {
        format!("> {}", app.chat_field.buffer)
    } else {
        "> (tutor disabled)".to_string()
    };
    let input_style = if can_send {
        Style::default().fg(theme.text())
    } else {
        Style::default().fg(theme.muted())
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(prompt, input_style))),
        sections[1],
    );
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Greedy word wrap; long unbroken words are split hard at the width.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            // Flush whatever is pending, then split the oversized word.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            let head_len = head.len();
            lines.push(head);
            word = &word[head_len..];
        }
        let current_len = current.chars().count();
        let word_len = word.chars().count();
        if current.is_empty() {
            current = word.to_string();
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_text("sine is the y coordinate", 10);
        assert_eq!(lines, vec!["sine is", "the y", "coordinate"]);
    }

    #[test]
    fn splits_oversized_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
