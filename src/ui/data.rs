//! Cleaned-readings overlay rendering.
//!
//! Displays a modal overlay with the cleaned reading table, most recent
//! first. Values exceeding their threshold are highlighted.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{Field, FieldStatus};

/// Minimum width required for the overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 12;

/// Render the cleaned readings as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref data) = app.data else {
        return;
    };

    // Width: 80% of screen, clamped to [MIN_OVERLAY_WIDTH, 90]
    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    // Height: 90% of screen, clamped to [MIN_OVERLAY_HEIGHT, 40]
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 40);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(6),    // Readings table
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("Temperature"),
        Cell::from("Humidity"),
        Cell::from("Gas"),
    ])
    .height(1)
    .style(app.theme.header);

    // Most recent reading first; scroll moves towards older rows
    let visible = chunks[0].height.saturating_sub(3) as usize;
    let rows: Vec<Row> = data
        .readings
        .iter()
        .rev()
        .skip(app.data_scroll)
        .take(visible.max(1))
        .map(|reading| {
            let cells = [Field::Temperature, Field::Humidity, Field::Gas].map(|field| {
                let value = reading.value(field);
                let style = match app.thresholds.status(field, value) {
                    FieldStatus::Normal => Style::default(),
                    FieldStatus::Exceeded => app.theme.status_style(FieldStatus::Exceeded),
                };
                Cell::from(field.format_value(value)).style(style)
            });

            let [temperature, humidity, gas] = cells;
            Row::new(vec![
                Cell::from(reading.time_of_day.clone()),
                temperature,
                humidity,
                gas,
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10), // Time
        Constraint::Fill(1),    // Temperature
        Constraint::Fill(1),    // Humidity
        Constraint::Fill(1),    // Gas
    ];

    let title = format!(
        " Readings ({}{}) [{}/{}] ",
        data.len(),
        if data.dropped > 0 {
            format!(", {} dropped", data.dropped)
        } else {
            String::new()
        },
        (app.data_scroll + 1).min(data.len().max(1)),
        data.len().max(1),
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );

    frame.render_widget(table, chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑↓:scroll  Esc:close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
