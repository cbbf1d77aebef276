use chrono::{DateTime, Local};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::ui::theme::{BorderStyle, Theme};
use crate::ui::{Dashboard, DisplaySurface, FieldId, FieldValue, draw};

/// [`DisplaySurface`] that draws the dashboard into a ratatui terminal.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    dashboard: Dashboard,
    theme: Theme,
    border_style: BorderStyle,
    quit_hint: String,
    closed: bool,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(
        terminal: Terminal<B>,
        theme: Theme,
        border_style: BorderStyle,
        quit_hint: impl Into<String>,
    ) -> Self {
        Self {
            terminal,
            dashboard: Dashboard::default(),
            theme,
            border_style,
            quit_hint: quit_hint.into(),
            closed: false,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B> DisplaySurface for TerminalSurface<B>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    fn set_value(&mut self, field: FieldId, value: FieldValue) {
        self.dashboard.apply(field, value);
    }

    fn set_updated_at(&mut self, at: DateTime<Local>) {
        self.dashboard.updated_at = Some(at);
    }

    fn present(&mut self) -> Result<()> {
        let Self {
            terminal,
            dashboard,
            theme,
            border_style,
            quit_hint,
            ..
        } = self;
        terminal
            .draw(|frame| draw(frame, dashboard, theme, *border_style, quit_hint))
            .wrap_err("failed to draw dashboard")?;
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
