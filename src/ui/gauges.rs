use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Gauge};

use crate::format::format_percent;
use crate::ui::theme::{BorderStyle, Theme};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    percent: f32,
    theme: &Theme,
    border_style: BorderStyle,
) {
    // Gauge panics on ratios outside 0..=1.
    let ratio = if percent.is_finite() {
        (percent as f64 / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_style.border_type())
        .border_style(Style::default().fg(theme.block_border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_color(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(format_percent(percent));

    frame.render_widget(gauge, area);
}
