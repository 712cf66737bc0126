//! Stats tab view

use crate::app::App;
use crate::ui::{format_bound, section_header};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use stat_core::{ModifierType, Stat};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_stat_list(f, app, chunks[0]);
    draw_modifiers(f, app, chunks[1]);
}

fn draw_stat_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .registry
        .iter()
        .map(|(name, stat)| ListItem::new(stat_row(app, name, stat)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Stats "))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn stat_row(app: &App, name: &str, stat: &Stat) -> Line<'static> {
    let changed = (stat.current_value() - stat.base_value()).abs() > f64::EPSILON;
    let value_color = if changed { Color::Green } else { Color::White };

    let mut spans = vec![
        Span::styled(format!("{:18}", name), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{:>9.2}", stat.current_value()),
            Style::default().fg(value_color),
        ),
        Span::styled(
            format!("  base {:>8.2}", stat.base_value()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if app.tuner.is_pinned(name) {
        spans.push(Span::styled(" [pinned]", Style::default().fg(Color::Magenta)));
    }
    Line::from(spans)
}

fn draw_modifiers(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    if let Some(stat) = app.selected_name().and_then(|name| app.registry.get_stat(&name)) {
        lines.push(section_header(stat.name()));
        lines.push(Line::from(format!(
            "  Range: [{}, {}]",
            format_bound(stat.min_value()),
            format_bound(stat.max_value())
        )));
        if let Some(desired) = app.tuner.desired(&app.registry, stat.name()) {
            lines.push(Line::from(format!("  Desired: {:.2}", desired)));
        }
        lines.push(Line::from(""));

        lines.push(section_header("Modifiers"));
        if stat.modifiers().is_empty() {
            lines.push(Line::from(Span::styled(
                "  (none)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for modifier in stat.modifiers() {
            let color = match modifier.kind() {
                ModifierType::FlatAddition => Color::Blue,
                ModifierType::PercentageMultiplier => Color::Green,
                ModifierType::Override => Color::Magenta,
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:8}", modifier.kind().name()),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!("{:<20}", modifier.to_string()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("order {}", modifier.order()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Selected "));

    f.render_widget(paragraph, area);
}
