//! Stat breakdown tab - shows each pass of the recalculation

use crate::app::App;
use crate::ui::{format_bound, section_header};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use stat_core::Stat;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_breakdown(f, app, chunks[0]);
    draw_formulas(f, chunks[1]);
}

fn draw_breakdown(f: &mut Frame, app: &App, area: Rect) {
    let lines = match app.selected_name().and_then(|name| app.registry.get_stat(&name)) {
        Some(stat) => stat_breakdown(stat),
        None => vec![Line::from("No stat selected")],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Breakdown "));

    f.render_widget(paragraph, area);
}

fn step(label: &str, value: f64, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:18}", label), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:.3}", value), Style::default().fg(color)),
    ])
}

fn stat_breakdown(stat: &Stat) -> Vec<Line<'static>> {
    let b = stat.breakdown();
    let mut lines = vec![section_header(stat.name()), Line::from("")];

    lines.push(step("Base", b.base, Color::Cyan));
    lines.push(step("× Percent", b.percentage_multiplier(), Color::Green));
    lines.push(step("= After %", b.after_percentage, Color::White));
    lines.push(step("+ Flat", b.flat_total(), Color::Blue));
    lines.push(step("= After flat", b.after_flat, Color::White));

    match b.override_value {
        Some(value) => lines.push(step("Override", value, Color::Magenta)),
        None => lines.push(Line::from(Span::styled(
            "  Override          (none)",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines.push(Line::from(Span::styled(
        format!(
            "  Clamp to          [{}, {}]",
            format_bound(stat.min_value()),
            format_bound(stat.max_value())
        ),
        Style::default().fg(Color::Gray),
    )));
    let color = if b.is_clamped() { Color::Red } else { Color::Yellow };
    lines.push(step("= Current", b.current, color));

    lines
}

fn draw_formulas(f: &mut Frame, area: Rect) {
    let lines = vec![
        section_header("Recalculation"),
        Line::from(""),
        Line::from(Span::styled(
            "1. value = base × Π(1 + percent)",
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            "2. value = value + Σ flat",
            Style::default().fg(Color::Blue),
        )),
        Line::from(Span::styled(
            "3. value = first override, if any",
            Style::default().fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            "4. current = clamp(value, min, max)",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Within a pass, modifiers apply by order",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "(ascending), then by insertion.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        section_header("Tuner"),
        Line::from(""),
        Line::from("Tuning adds one flat modifier per stat:"),
        Line::from("  delta = desired - base"),
        Line::from("Percent buffs still scale the base, so the"),
        Line::from("current value can differ from the desired one."),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Formulas "));

    f.render_widget(paragraph, area);
}
