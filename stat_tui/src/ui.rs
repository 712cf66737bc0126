//! UI rendering

mod breakdown_view;
mod changes_view;
mod help_view;
mod stat_view;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status + keys
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Stats => stat_view::draw(f, app, chunks[1]),
        Tab::Breakdown => breakdown_view::draw(f, app, chunks[1]),
        Tab::Changes => changes_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Stats | Tab::Breakdown => vec![
            ("↑/↓", "Select"),
            ("←/→", "Tune"),
            ("o", "Pin"),
            ("p", "Buff"),
            ("s/L", "Save/Load"),
        ],
        Tab::Changes => vec![("↑/↓", "Scroll")],
        Tab::Help => vec![],
    };

    let mut spans = vec![Span::styled(
        format!("{}  ", app.status),
        Style::default().fg(Color::Green),
    )];
    for (key, desc) in keys.iter().chain([("?", "Help"), ("q", "Quit")].iter()) {
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}  ", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "));

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let title = format!(" Stat Tuner: {} ", app.registry.owner());
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

pub fn section_header(name: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", name),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

/// Format a range bound, showing the full-range defaults as infinities
pub fn format_bound(value: f64) -> String {
    if value <= f64::MIN {
        "-∞".to_string()
    } else if value >= f64::MAX {
        "∞".to_string()
    } else {
        format!("{:.1}", value)
    }
}
