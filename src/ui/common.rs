//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, metrics row, alert
//! banners, status bar, help overlay, and the error/empty placeholders.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::{clock, Field, FieldStatus};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the header bar with channel and alert overview.
///
/// Displays: status indicator, channel name, reading count, alert count,
/// and the current time in the dashboard timezone.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let wall_clock = format!("{} {}", clock::current_display_time(), clock::DISPLAY_TZ_LABEL);

    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(
                " AQWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("│ Loading... │ "),
            Span::raw(wall_clock),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    // Overall status indicator: red if any threshold is breached
    let status_style = if app.alerts.is_empty() {
        app.theme.status_style(FieldStatus::Normal)
    } else {
        app.theme.status_style(FieldStatus::Exceeded)
    };

    let channel = app.channel_name.as_deref().unwrap_or("unknown channel");

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("AQWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(channel.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::raw(format!("{} readings", data.len())),
    ];

    if data.dropped > 0 {
        spans.push(Span::styled(
            format!(" ({} dropped)", data.dropped),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    spans.push(Span::raw(" │ "));
    if app.alerts.is_empty() {
        spans.push(Span::styled("0", Style::default().add_modifier(Modifier::DIM)));
    } else {
        spans.push(Span::styled(
            format!("{}", app.alerts.len()),
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(" alerts │ "));
    spans.push(Span::raw(wall_clock));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Gas "),
        Line::from(" 2:Temperature "),
        Line::from(" 3:Humidity "),
        Line::from(" 4:Averages "),
    ];

    let selected = match app.current_view {
        View::Gas => 0,
        View::Temperature => 1,
        View::Humidity => 2,
        View::Averages => 3,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the current-readings metrics row.
///
/// One cell per field (temperature, humidity, gas) showing the latest
/// value and a trend sparkline across refresh cycles. Values that exceed
/// their threshold are shown in the critical style.
pub fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    // Display order follows the dashboard layout, not the alert order.
    let fields = [Field::Temperature, Field::Humidity, Field::Gas];

    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let latest = app.data.as_ref().and_then(|d| d.latest());

    for (field, cell) in fields.into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .title(format!(" {} ", field.label()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));

        let lines = match latest {
            Some(reading) => {
                let value = reading.value(field);
                let status = app.thresholds.status(field, value);
                let value_style = match status {
                    FieldStatus::Normal => Style::default().add_modifier(Modifier::BOLD),
                    FieldStatus::Exceeded => {
                        app.theme.status_style(status).add_modifier(Modifier::BOLD)
                    }
                };

                vec![
                    Line::from(Span::styled(field.format_value(value), value_style)),
                    Line::from(Span::styled(
                        render_sparkline(&app.history.sparkline(field)),
                        Style::default().fg(app.theme.field_color(field)),
                    )),
                ]
            }
            None => vec![Line::from(Span::styled(
                "-",
                Style::default().add_modifier(Modifier::DIM),
            ))],
        };

        frame.render_widget(Paragraph::new(lines).block(block), *cell);
    }
}

/// Render one warning banner line per alert, in analyzer order.
pub fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .alerts
        .iter()
        .take(area.height as usize)
        .map(|alert| {
            Line::from(vec![
                Span::styled(
                    " ⚠ ",
                    Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
                ),
                Span::styled(alert.message(), Style::default().fg(app.theme.warning)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();

        let controls = if app.show_data_overlay {
            "↑↓:scroll Esc:close q:quit"
        } else {
            "Tab:switch 1-4:view Enter:data r:reload e:export ?:help q:quit"
        };

        match app.load_error {
            Some(ref err) => format!(
                " {} | Updated {:.1}s ago | Error: {}",
                app.source_description(),
                elapsed.as_secs_f64(),
                err,
            ),
            None => format!(
                " {} | Updated {:.1}s ago | {}",
                app.source_description(),
                elapsed.as_secs_f64(),
                controls,
            ),
        }
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render a full-area message for a failed fetch with no data to show.
pub fn render_fetch_error(frame: &mut Frame, app: &App, area: Rect) {
    let error = app.load_error.as_deref().unwrap_or("unknown error");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to fetch data",
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Check your connection and channel settings, then press r to retry.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.critical));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render a placeholder for a view with no usable readings.
///
/// A fetch that yields zero rows (or only unparseable ones) is a distinct
/// empty state, not an error.
pub fn render_empty(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No data yet",
            Style::default().fg(app.theme.warning).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "The channel returned no usable readings for this window.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  1-4         Jump to view"),
        Line::from("  Enter       Show cleaned readings"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Readings Table",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Scroll"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Reload data"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    // Take the most recent values that fit a small cell
    let values: Vec<u8> = data.iter().rev().take(16).rev().copied().collect();

    values.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}
