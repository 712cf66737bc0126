//! Help tab view

use crate::app::App;
use crate::ui::section_header;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        section_header("Navigation"),
        key_line("1-4", "Jump to tab (Stats/Calc/Changes/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Select stat / scroll"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        section_header("Tuning"),
        key_line("←/h  →/l", &format!("Lower/raise desired value by {}", app.step)),
        key_line("+", "Cycle step (0.1 / 1 / 10)"),
        key_line("o", "Pin / release at current value (override)"),
        key_line("x", "Remove every tuner modifier"),
        Line::from(""),
        section_header("Modifiers"),
        key_line("p", "Add a +10% buff to the selected stat"),
        key_line("b", "Remove all buffs"),
        key_line("c", "Clear every modifier on the selected stat"),
        Line::from(""),
        section_header("Persistence"),
        key_line("s", &format!("Save base values to {}", app.save_path.display())),
        key_line("L", "Load base values (modifiers stay attached)"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
