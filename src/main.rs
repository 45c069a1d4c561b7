// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod fetch;
mod settings;
mod source;
mod ui;

use app::{App, View};
use settings::Settings;
use data::{check_thresholds, ReadingSet};
use fetch::ThingSpeakClient;
use source::{DataSource, FeedPage, FileSource, HttpSource};

#[derive(Parser, Debug)]
#[command(name = "aqwatch")]
#[command(about = "Terminal dashboard for monitoring air quality telemetry from ThingSpeak channels")]
struct Args {
    /// Path to a settings file (TOML); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ThingSpeak channel ID to poll
    #[arg(long, conflicts_with = "file")]
    channel: Option<String>,

    /// Read API key (not needed for public channels)
    #[arg(long, conflicts_with = "file")]
    api_key: Option<String>,

    /// Number of records to fetch per cycle
    #[arg(long)]
    results: Option<u32>,

    /// Read a saved feed JSON file instead of polling the network
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Gas concentration alert threshold (ppm)
    #[arg(long)]
    gas_limit: Option<f64>,

    /// Temperature alert threshold (°C)
    #[arg(long)]
    temperature_limit: Option<f64>,

    /// Humidity alert threshold (%)
    #[arg(long)]
    humidity_limit: Option<f64>,

    /// Export a JSON summary to the given path and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    apply_overrides(&mut settings, &args);

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&args, &settings, export_path);
    }

    // Handle file mode
    if let Some(ref path) = args.file {
        let source = Box::new(FileSource::new(path));
        return run_tui(
            source,
            settings.thresholds,
            Duration::from_secs(settings.refresh.max(1)),
        );
    }

    // Default: poll the feeds API
    run_with_http(settings)
}

/// Fold CLI flags over the loaded settings (CLI wins).
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(ref channel) = args.channel {
        settings.channel_id = channel.clone();
    }
    if let Some(ref api_key) = args.api_key {
        settings.api_key = Some(api_key.clone());
    }
    if let Some(results) = args.results {
        settings.results = results;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh = refresh;
    }
    if let Some(gas) = args.gas_limit {
        settings.thresholds.gas = gas;
    }
    if let Some(temperature) = args.temperature_limit {
        settings.thresholds.temperature = temperature;
    }
    if let Some(humidity) = args.humidity_limit {
        settings.thresholds.humidity = humidity;
    }
}

fn build_client(settings: &Settings) -> ThingSpeakClient {
    let mut builder = ThingSpeakClient::builder()
        .channel(settings.channel_id.clone())
        .results(settings.results);
    if let Some(ref api_key) = settings.api_key {
        builder = builder.api_key(api_key.clone());
    }
    builder.build()
}

/// Run with an interval-polling HTTP data source
fn run_with_http(settings: Settings) -> Result<()> {
    if settings.channel_id.is_empty() {
        bail!("no channel configured; pass --channel or set channel_id in the config file");
    }

    let client = build_client(&settings);
    let fetch_interval = Duration::from_secs(settings.refresh.max(1));

    // Build a tokio runtime for the background fetch task
    let rt = tokio::runtime::Runtime::new()?;
    let source =
        rt.block_on(async { Box::new(HttpSource::spawn(client, fetch_interval)) as Box<dyn DataSource> });

    // Fetch cadence lives in the background task; poll the source fast
    run_tui(source, settings.thresholds, Duration::from_millis(250))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    thresholds: data::Thresholds,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, thresholds);
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let alert_rows = app.alerts.len().min(4) as u16;

            let mut constraints = vec![
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Length(4), // Current-readings metrics
            ];
            if alert_rows > 0 {
                constraints.push(Constraint::Length(alert_rows));
            }
            constraints.push(Constraint::Min(8)); // Chart content
            constraints.push(Constraint::Length(1)); // Status bar

            let chunks = Layout::vertical(constraints).split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::common::render_metrics(frame, app, chunks[2]);

            let mut next = 3;
            if alert_rows > 0 {
                ui::common::render_alerts(frame, app, chunks[next]);
                next += 1;
            }

            // A failed fetch with nothing to show halts the cycle visibly;
            // otherwise render the selected view
            let content = chunks[next];
            if app.data.is_none() && app.load_error.is_some() {
                ui::common::render_fetch_error(frame, app, content);
            } else {
                match app.current_view {
                    View::Averages => ui::averages::render(frame, app, content),
                    view => {
                        if let Some(spec) = view.chart_spec() {
                            ui::chart::render(frame, app, content, spec);
                        }
                    }
                }
            }

            ui::common::render_status_bar(frame, app, chunks[next + 1]);

            // Render readings overlay if active
            if app.show_data_overlay {
                ui::data::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Fetch (or read) one feed page, run the pipeline, and write the JSON
/// summary to a file
fn export_to_file(args: &Args, settings: &Settings, export_path: &std::path::Path) -> Result<()> {
    use std::io::Write;

    let page: FeedPage = if let Some(ref path) = args.file {
        serde_json::from_str(&std::fs::read_to_string(path)?)?
    } else {
        if settings.channel_id.is_empty() {
            bail!("no channel configured; pass --channel or set channel_id in the config file");
        }
        let client = build_client(settings);
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(client.fetch_feed())?
    };

    let channel_name = page.channel.as_ref().and_then(|c| c.display_name());
    let data = ReadingSet::from_feed(page.feeds);
    let alerts = data
        .latest()
        .map(|latest| check_thresholds(latest, &settings.thresholds))
        .unwrap_or_default();

    let json = serde_json::to_string_pretty(&app::export_json(
        &data,
        &alerts,
        channel_name.as_deref(),
    ))?;
    let mut file = std::fs::File::create(export_path)?;
    file.write_all(json.as_bytes())?;

    println!("Exported air quality summary to: {}", export_path.display());
    Ok(())
}
