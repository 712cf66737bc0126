//! Change log tab - every notification published by the registry

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let changes = app.changes.borrow();
    let lines: Vec<Line> = changes
        .iter()
        .rev()
        .map(|change| {
            let delta = change.new_value - change.old_value;
            let color = if delta >= 0.0 { Color::Green } else { Color::Red };
            Line::from(vec![
                Span::styled(format!("{:18}", change.name), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:>10.3} → {:<10.3}", change.old_value, change.new_value),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!("({:+.3})", delta), Style::default().fg(color)),
            ])
        })
        .collect();

    let title = format!(" Changes ({}) ", changes.len());
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((u16::try_from(app.log_scroll).unwrap_or(u16::MAX), 0));

    f.render_widget(paragraph, area);
}
