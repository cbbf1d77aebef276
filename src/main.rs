use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use sysglance::app::{Monitor, ResolvedKeybinds, TICK_INTERVAL, run};
use sysglance::config::{Config, load_config};
use sysglance::event::terminal_events;
use sysglance::system::collector::Collector;
use sysglance::ui::surface::TerminalSurface;
use sysglance::ui::theme::{BorderStyle, Theme, resolve_color_support};

#[derive(Parser)]
#[command(
    name = "sysglance",
    version,
    about = "CPU, memory, process, disk and network counters, refreshed every second"
)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _cli = Cli::parse();

    #[cfg(feature = "trace-log")]
    sysglance::logging::init_tracing_json(&sysglance::logging::log_path())?;

    let config = load_config();
    // Fail before taking over the terminal so the report stays readable.
    let collector = Collector::new().wrap_err("cannot read system metrics")?;

    let terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run_dashboard(terminal, collector, &config).await;

    ratatui::restore();

    result
}

async fn run_dashboard(
    terminal: ratatui::DefaultTerminal,
    collector: Collector,
    config: &Config,
) -> Result<()> {
    let color_support = resolve_color_support(&config.general.color_support);
    let theme = Theme::from_config(&config.general.theme, color_support);
    let border_style = BorderStyle::from_config_str(&config.general.border_style);
    let keybinds = ResolvedKeybinds::from_config(&config.keybinds);

    let surface = TerminalSurface::new(terminal, theme, border_style, keybinds.quit_label());
    let mut monitor = Monitor::new(collector, surface, keybinds);

    tracing::info!(interval_ms = TICK_INTERVAL.as_millis() as u64, "starting");
    run(&mut monitor, TICK_INTERVAL, terminal_events()).await
}
