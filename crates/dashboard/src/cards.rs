//! Metric card widgets.

use counter_anim::CounterFormat;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

/// Render one metric card. `value` is the current (possibly mid-animation)
/// displayed value; `None` renders the loading skeleton.
pub fn render_metric_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: Option<f64>,
    format: &CounterFormat,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_owned());

    let line = match value {
        Some(value) => {
            let mut spans = vec![Span::styled(
                format.number(value),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(suffix) = &format.suffix {
                // unit suffix stays visually de-emphasized next to the number
                spans.push(Span::styled(
                    format!(" {suffix}"),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "···",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the error panel shown when the latest attempt failed and no
/// usable data exists.
pub fn render_error_panel(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("metrics unavailable")
        .style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(message.to_owned())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}
