//! Averages view rendering.
//!
//! Bar chart of the per-field means over the fetched window.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

use crate::app::App;
use crate::data::Field;

const TITLE: &str = "Average Air Quality Parameters";

/// Render the averages bar chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let Some(averages) = data.averages() else {
        super::common::render_empty(frame, app, area, TITLE);
        return;
    };

    let bars: Vec<Bar> = Field::ALL
        .iter()
        .map(|&field| {
            let mean = averages.value(field);
            Bar::default()
                .label(Line::from(format!("{} ({})", field.label(), field.unit())))
                .value(mean.max(0.0).round() as u64)
                .text_value(format!("{:.*}", field.precision(), mean))
                .style(Style::default().fg(app.theme.field_color(field)))
        })
        .collect();

    // Three bars share the width, leaving room for gaps and borders
    let bar_width = (area.width.saturating_sub(8) / 3).clamp(5, 24);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" {} ", TITLE))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2);

    frame.render_widget(chart, area);
}
