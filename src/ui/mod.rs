pub mod counters;
pub mod gauges;
pub mod statusbar;
pub mod surface;
pub mod theme;

use chrono::{DateTime, Local};
use color_eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::system::snapshot::{DiskCounters, NetworkCounters};
use crate::ui::theme::{BorderStyle, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Cpu,
    Memory,
    Processes,
    Disk,
    Network,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Cpu => "CPU",
            FieldId::Memory => "Memory",
            FieldId::Processes => "Processes",
            FieldId::Disk => "Disk",
            FieldId::Network => "Network",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Percent(f32),
    Count(usize),
    Disk(DiskCounters),
    Network(NetworkCounters),
}

/// Anything the refresh loop can push values into.
pub trait DisplaySurface {
    fn set_value(&mut self, field: FieldId, value: FieldValue);

    fn set_updated_at(&mut self, _at: DateTime<Local>) {}

    fn present(&mut self) -> Result<()>;

    fn close(&mut self);

    fn is_closed(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub process_count: usize,
    pub disk: DiskCounters,
    pub network: NetworkCounters,
    pub updated_at: Option<DateTime<Local>>,
}

impl Dashboard {
    /// Returns false, leaving the dashboard untouched, on a kind mismatch.
    pub fn apply(&mut self, field: FieldId, value: FieldValue) -> bool {
        match (field, value) {
            (FieldId::Cpu, FieldValue::Percent(v)) => self.cpu_percent = v,
            (FieldId::Memory, FieldValue::Percent(v)) => self.memory_percent = v,
            (FieldId::Processes, FieldValue::Count(n)) => self.process_count = n,
            (FieldId::Disk, FieldValue::Disk(c)) => self.disk = c,
            (FieldId::Network, FieldValue::Network(c)) => self.network = c,
            _ => {
                tracing::warn!(?field, ?value, "value does not match display element");
                return false;
            }
        }
        true
    }
}

pub fn draw(
    frame: &mut Frame,
    dashboard: &Dashboard,
    theme: &Theme,
    border_style: BorderStyle,
    quit_hint: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    gauges::render(
        frame,
        chunks[0],
        FieldId::Cpu.label(),
        dashboard.cpu_percent,
        theme,
        border_style,
    );
    gauges::render(
        frame,
        chunks[1],
        FieldId::Memory.label(),
        dashboard.memory_percent,
        theme,
        border_style,
    );
    counters::render(frame, chunks[2], dashboard, theme, border_style);
    statusbar::render(frame, chunks[4], dashboard.updated_at, quit_hint, theme);
}
