use std::pin::pin;
use std::time::Duration;

use chrono::Local;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use tokio::time::{self, Instant};

use crate::action::Action;
use crate::config::{KeybindsConfig, parse_key};
use crate::event::Event;
use crate::system::provider::MetricsProvider;
use crate::system::snapshot::{Snapshot, sample};
use crate::ui::{DisplaySurface, FieldId, FieldValue};

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
        }
    }

    pub fn quit_label(&self) -> String {
        key_label(self.quit)
    }
}

impl Default for ResolvedKeybinds {
    fn default() -> Self {
        Self::from_config(&KeybindsConfig::default())
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

/// Pushes every field of `snapshot` into `surface` and presents it.
pub fn render<S: DisplaySurface + ?Sized>(snapshot: &Snapshot, surface: &mut S) -> Result<()> {
    surface.set_value(FieldId::Cpu, FieldValue::Percent(snapshot.cpu_percent));
    surface.set_value(
        FieldId::Memory,
        FieldValue::Percent(snapshot.memory_percent),
    );
    surface.set_value(
        FieldId::Processes,
        FieldValue::Count(snapshot.process_count),
    );
    surface.set_value(FieldId::Disk, FieldValue::Disk(snapshot.disk));
    surface.set_value(FieldId::Network, FieldValue::Network(snapshot.network));
    surface.set_updated_at(Local::now());
    surface.present()
}

pub struct Monitor<P, S> {
    provider: P,
    surface: S,
    keybinds: ResolvedKeybinds,
    ticks: u64,
}

impl<P, S> Monitor<P, S>
where
    P: MetricsProvider,
    S: DisplaySurface,
{
    pub fn new(provider: P, surface: S, keybinds: ResolvedKeybinds) -> Self {
        Self {
            provider,
            surface,
            keybinds,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> Result<Snapshot> {
        let _span = tracing::debug_span!("monitor.tick", tick = self.ticks).entered();

        let snapshot = sample(&mut self.provider)?;
        tracing::debug!(
            cpu = snapshot.cpu_percent,
            memory = snapshot.memory_percent,
            processes = snapshot.process_count,
            disk_read = snapshot.disk.read_bytes,
            disk_write = snapshot.disk.write_bytes,
            net_sent = snapshot.network.sent_bytes,
            net_recv = snapshot.network.recv_bytes,
            "sampled"
        );
        render(&snapshot, &mut self.surface)?;
        self.ticks += 1;
        Ok(snapshot)
    }

    pub fn map_event(&self, event: &Event) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.map_key(*key),
            Event::Key(_) => Action::None,
            Event::Resize => Action::Redraw,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        if key.code == self.keybinds.quit || key.code == KeyCode::Esc {
            Action::Quit
        } else {
            Action::None
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match self.map_event(&event) {
            Action::Quit => self.close(),
            Action::Redraw => self.surface.present()?,
            Action::None => {}
        }
        Ok(())
    }

    pub fn close(&mut self) {
        tracing::debug!(ticks = self.ticks, "closing");
        self.surface.close();
    }

    pub fn is_closed(&self) -> bool {
        self.surface.is_closed()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Ticks immediately, then again `delay` after each render finishes, until
/// the surface is closed or `events` ends. An input error ends the run with
/// that error.
pub async fn run<P, S, E>(monitor: &mut Monitor<P, S>, delay: Duration, events: E) -> Result<()>
where
    P: MetricsProvider,
    S: DisplaySurface,
    E: Stream<Item = Result<Event>>,
{
    let mut events = pin!(events);

    if monitor.is_closed() {
        return Ok(());
    }
    monitor.tick()?;

    let mut next_tick = pin!(time::sleep(delay));
    while !monitor.is_closed() {
        tokio::select! {
            () = &mut next_tick => {
                monitor.tick()?;
                next_tick.as_mut().reset(Instant::now() + delay);
            }
            event = events.next() => match event {
                Some(event) => {
                    let event = event.wrap_err("failed to read terminal input")?;
                    monitor.handle_event(event)?;
                }
                None => monitor.close(),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::snapshot::{DiskCounters, NetworkCounters};
    use crate::ui::Dashboard;

    struct Fixed;

    impl MetricsProvider for Fixed {
        fn read_cpu_percent(&mut self) -> Result<f32> {
            Ok(42.0)
        }

        fn read_memory_percent(&mut self) -> Result<f32> {
            Ok(63.5)
        }

        fn read_process_count(&mut self) -> Result<usize> {
            Ok(180)
        }

        fn read_disk_counters(&mut self) -> Result<DiskCounters> {
            Ok(DiskCounters {
                read_bytes: 1000,
                write_bytes: 2000,
            })
        }

        fn read_network_counters(&mut self) -> Result<NetworkCounters> {
            Ok(NetworkCounters {
                sent_bytes: 500,
                recv_bytes: 700,
            })
        }
    }

    #[derive(Default)]
    struct Recorder {
        dashboard: Dashboard,
        presents: usize,
        closed: bool,
    }

    impl DisplaySurface for Recorder {
        fn set_value(&mut self, field: FieldId, value: FieldValue) {
            self.dashboard.apply(field, value);
        }

        fn present(&mut self) -> Result<()> {
            self.presents += 1;
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }

        fn is_closed(&self) -> bool {
            self.closed
        }
    }

    fn monitor() -> Monitor<Fixed, Recorder> {
        Monitor::new(Fixed, Recorder::default(), ResolvedKeybinds::default())
    }

    #[test]
    fn tick_fills_every_field() {
        let mut monitor = monitor();
        monitor.tick().unwrap();
        let dashboard = &monitor.surface().dashboard;
        assert_eq!(dashboard.cpu_percent, 42.0);
        assert_eq!(dashboard.memory_percent, 63.5);
        assert_eq!(dashboard.process_count, 180);
        assert_eq!(dashboard.disk.write_bytes, 2000);
        assert_eq!(dashboard.network.sent_bytes, 500);
        assert_eq!(monitor.surface().presents, 1);
        assert_eq!(monitor.ticks(), 1);
    }

    #[test]
    fn quit_keys() {
        let monitor = monitor();
        let press = |code, modifiers| Event::Key(KeyEvent::new(code, modifiers));
        assert_eq!(
            monitor.map_event(&press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::Quit
        );
        assert_eq!(
            monitor.map_event(&press(KeyCode::Esc, KeyModifiers::NONE)),
            Action::Quit
        );
        assert_eq!(
            monitor.map_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            monitor.map_event(&press(KeyCode::Char('c'), KeyModifiers::NONE)),
            Action::None
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let monitor = monitor();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(monitor.map_event(&Event::Key(key)), Action::None);
    }

    #[test]
    fn custom_quit_key() {
        let keybinds = ResolvedKeybinds::from_config(&KeybindsConfig {
            quit: "x".to_string(),
        });
        let monitor = Monitor::new(Fixed, Recorder::default(), keybinds);
        let key = |c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        assert_eq!(monitor.map_event(&key('x')), Action::Quit);
        assert_eq!(monitor.map_event(&key('q')), Action::None);
    }

    #[test]
    fn unparsable_quit_key_falls_back_to_q() {
        let keybinds = ResolvedKeybinds::from_config(&KeybindsConfig {
            quit: "nonsense".to_string(),
        });
        assert_eq!(keybinds.quit, KeyCode::Char('q'));
        assert_eq!(keybinds.quit_label(), "q");
    }

    #[test]
    fn resize_redraws_without_sampling() {
        let mut monitor = monitor();
        monitor.tick().unwrap();
        monitor.handle_event(Event::Resize).unwrap();
        assert_eq!(monitor.surface().presents, 2);
        assert_eq!(monitor.ticks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ending_input_closes_after_first_tick() {
        let mut monitor = monitor();
        run(&mut monitor, TICK_INTERVAL, futures::stream::empty())
            .await
            .unwrap();
        assert!(monitor.is_closed());
        assert_eq!(monitor.ticks(), 1);
    }
}
