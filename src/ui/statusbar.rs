use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    updated_at: Option<DateTime<Local>>,
    quit_hint: &str,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = pill_spans(quit_hint, "Quit", theme);
    let updated = match updated_at {
        Some(at) => format!("  Updated {}", format_clock(at)),
        None => "  Waiting for first sample".to_string(),
    };
    spans.push(Span::styled(
        updated,
        Style::default().fg(theme.text_secondary),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

pub fn format_clock(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
