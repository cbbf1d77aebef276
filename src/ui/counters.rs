use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::format::format_bytes;
use crate::ui::theme::{BorderStyle, Theme};
use crate::ui::{Dashboard, FieldId};

/// Process count plus the raw disk and network running totals.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    theme: &Theme,
    border_style: BorderStyle,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_style.border_type())
        .border_style(Style::default().fg(theme.block_border))
        .title(Span::styled(
            " sysglance ",
            Style::default()
                .fg(theme.title_accent_fg)
                .bg(theme.title_accent_bg)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        row(
            FieldId::Processes.label(),
            dashboard.process_count.to_string(),
            theme,
        ),
        row(
            "Disk total (R/W)",
            format!(
                "{} / {}",
                format_bytes(dashboard.disk.read_bytes),
                format_bytes(dashboard.disk.write_bytes)
            ),
            theme,
        ),
        row(
            "Network total (S/R)",
            format!(
                "{} / {}",
                format_bytes(dashboard.network.sent_bytes),
                format_bytes(dashboard.network.recv_bytes)
            ),
            theme,
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn row<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {label:<20}"),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ])
}
