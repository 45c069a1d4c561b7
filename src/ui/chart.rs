//! Line-chart view rendering.
//!
//! Draws one monitored field over the fetched window, with the field's
//! alert threshold as a flat reference line.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::{App, ChartSpec};

/// Render a line chart for the given view spec.
pub fn render(frame: &mut Frame, app: &App, area: Rect, spec: ChartSpec) {
    let Some(ref data) = app.data else {
        return;
    };

    if data.is_empty() {
        super::common::render_empty(frame, app, area, spec.title);
        return;
    }

    let points = data.series(spec.field);
    let limit = app.thresholds.limit(spec.field);

    // Scale the y axis over both the observed values and the threshold,
    // so the reference line is always on screen.
    let Some((min, max)) = data.value_bounds(spec.field) else {
        return;
    };
    let y_low = min.min(limit);
    let y_high = max.max(limit);
    let pad = ((y_high - y_low) * 0.1).max(1.0);
    let y_bounds = [y_low - pad, y_high + pad];

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let threshold_points = [(0.0, limit), (x_max, limit)];

    let datasets = vec![
        Dataset::default()
            .name(spec.field.label())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.field_color(spec.field)))
            .data(&points),
        Dataset::default()
            .name(format!("threshold {}", spec.field.format_value(limit)))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.critical).add_modifier(Modifier::DIM))
            .data(&threshold_points),
    ];

    let x_labels = x_axis_labels(data);
    let y_labels: Vec<Line> = [y_bounds[0], (y_bounds[0] + y_bounds[1]) / 2.0, y_bounds[1]]
        .iter()
        .map(|v| Line::from(format!("{:.*}", spec.field.precision(), v)))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", spec.title))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_label)
                .style(Style::default().fg(app.theme.border))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// First, middle and last reading times label the x axis.
fn x_axis_labels(data: &crate::data::ReadingSet) -> Vec<Line<'static>> {
    let times: Vec<&str> = match data.readings.as_slice() {
        [] => Vec::new(),
        [only] => vec![only.time_of_day.as_str()],
        readings => {
            let mid = readings.len() / 2;
            vec![
                readings[0].time_of_day.as_str(),
                readings[mid].time_of_day.as_str(),
                readings[readings.len() - 1].time_of_day.as_str(),
            ]
        }
    };

    times.into_iter().map(|t| Line::from(t.to_string())).collect()
}
