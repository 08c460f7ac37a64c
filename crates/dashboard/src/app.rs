//! Dashboard application state and rendering.

use std::time::Duration;

use api_types::MetricsSnapshot;
use counter_anim::Counter;
use counter_anim::CounterDriver;
use counter_anim::CounterFormat;
use counter_anim::CounterHandle;
use counter_anim::Locale;
use metrics_poller::PollState;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::cards::render_error_panel;
use crate::cards::render_metric_card;

/// One displayed metric: a title, a formatter, a field extractor and the
/// animated counter behind it.
pub struct MetricCard {
    /// card title
    pub title: &'static str,
    /// number formatting and unit suffix
    pub format: CounterFormat,
    extract: fn(&MetricsSnapshot) -> Option<f64>,
    handle: CounterHandle,
}

impl MetricCard {
    /// Currently displayed value of this card's counter.
    pub fn value(&self) -> f64 {
        self.handle.value()
    }
}

/// The dashboard: poll state in, animated cards out.
pub struct DashboardApp {
    state_rx: watch::Receiver<PollState>,
    cards: Vec<MetricCard>,
    /// flips once the cards have been drawn with a real area
    armed: bool,
}

impl DashboardApp {
    /// Build the card set, spawning one counter driver per metric. All
    /// drivers stop when `cancel` fires.
    pub fn new(
        state_rx: watch::Receiver<PollState>,
        animation: Duration,
        locale: Locale,
        cancel: &CancellationToken,
    ) -> Self {
        let card = |title: &'static str,
                    suffix: Option<&'static str>,
                    extract: fn(&MetricsSnapshot) -> Option<f64>| {
            let mut format = CounterFormat::new(locale);
            if let Some(suffix) = suffix {
                format = format.with_suffix(suffix);
            }
            MetricCard {
                title,
                format,
                extract,
                handle: CounterDriver::spawn(Counter::new(animation), cancel.child_token()),
            }
        };

        let cards = vec![
            card("Active automations", None, |s| {
                Some(s.active_automations as f64)
            }),
            card("Tasks executed", None, |s| Some(s.tasks_executed as f64)),
            card("Time saved", Some("min"), |s| {
                Some(s.time_saved_minutes as f64)
            }),
            card("Estimated ROI", Some("USD"), |s| Some(s.estimated_roi)),
            card("Events processed", None, |s| {
                s.events_processed.map(|v| v as f64)
            }),
        ];

        Self {
            state_rx,
            cards,
            armed: false,
        }
    }

    /// Cards in display order.
    pub fn cards(&self) -> &[MetricCard] {
        &self.cards
    }

    /// Push the latest snapshot's fields into the counters as targets.
    /// Unchanged targets animate nothing, so calling this every tick is
    /// harmless.
    pub fn sync_targets(&mut self) {
        let state = self.state_rx.borrow().clone();
        let Some(data) = state.data.as_ref() else {
            return;
        };
        for card in &self.cards {
            if let Some(target) = (card.extract)(data) {
                card.handle.set_target(target);
            }
        }
    }

    /// Draw the whole dashboard.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " pulseboard",
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            header,
        );

        let state = self.state_rx.borrow().clone();

        if state.error.is_some() && !state.has_data() && !state.is_loading {
            render_error_panel(frame, body, state.error.as_deref().unwrap_or_default());
        } else {
            self.render_cards(frame, body, &state);
        }

        frame.render_widget(Paragraph::new(footer_line(&state)), footer);
    }

    fn render_cards(&mut self, frame: &mut Frame, body: Rect, state: &PollState) {
        // the cards entering the viewport is the one-shot visibility signal
        if !self.armed && body.width > 0 && body.height > 0 {
            for card in &self.cards {
                card.handle.mark_visible();
            }
            self.armed = true;
        }

        let constraints: Vec<Constraint> = self
            .cards
            .iter()
            .map(|_| Constraint::Ratio(1, self.cards.len() as u32))
            .collect();
        let columns = Layout::horizontal(constraints).split(body);

        for (card, column) in self.cards.iter().zip(columns.iter()) {
            let value = if state.is_loading {
                None
            } else {
                Some(card.value())
            };
            render_metric_card(frame, *column, card.title, value, &card.format);
        }
    }
}

fn footer_line(state: &PollState) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(fetched_at) = state.fetched_at {
        spans.push(Span::styled(
            format!(" updated {}", fetched_at.format("%H:%M:%S")),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    if state.has_data() {
        if let Some(error) = &state.error {
            // stale data stays up, the failure is only a footnote
            spans.push(Span::styled(
                format!("  last attempt failed: {error}"),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
    }
    spans.push(Span::styled(
        "  q to quit",
        Style::default().add_modifier(Modifier::DIM),
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use api_types::MetricsSnapshot;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use test_log::test;
    use tokio::sync::watch;

    use super::*;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            tasks_executed: 42,
            time_saved_minutes: 360,
            estimated_roi: 1250.0,
            active_automations: 7,
            events_processed: None,
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    async fn settle() {
        // fast animations settle well within this window
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    #[test(tokio::test)]
    async fn loading_state_renders_skeletons() {
        let (_tx, rx) = watch::channel(PollState::loading());
        let cancel = CancellationToken::new();
        let mut app = DashboardApp::new(rx, Duration::from_millis(10), Locale::en, &cancel);

        let mut terminal = Terminal::new(TestBackend::new(120, 12)).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("Tasks executed"));
        assert!(text.contains("···"));

        cancel.cancel();
    }

    #[test(tokio::test)]
    async fn error_without_data_renders_error_panel() {
        let state = PollState::loading().with_error("credential absent");
        let (_tx, rx) = watch::channel(state);
        let cancel = CancellationToken::new();
        let mut app = DashboardApp::new(rx, Duration::from_millis(10), Locale::en, &cancel);

        let mut terminal = Terminal::new(TestBackend::new(120, 12)).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("metrics unavailable"));
        assert!(text.contains("credential absent"));

        cancel.cancel();
    }

    #[test(tokio::test)]
    async fn counters_settle_on_snapshot_values() {
        let state = PollState::loading().with_snapshot(snapshot());
        let (_tx, rx) = watch::channel(state);
        let cancel = CancellationToken::new();
        let mut app = DashboardApp::new(rx, Duration::from_millis(10), Locale::en, &cancel);

        let mut terminal = Terminal::new(TestBackend::new(150, 12)).expect("terminal");

        // first draw arms visibility, then targets flow in
        terminal.draw(|f| app.render(f)).expect("draw");
        app.sync_targets();
        settle().await;

        terminal.draw(|f| app.render(f)).expect("draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("42"), "missing tasks executed: {text}");
        assert!(text.contains("360"), "missing time saved: {text}");
        assert!(text.contains("min"));
        assert!(text.contains("1,250"), "missing roi: {text}");

        cancel.cancel();
    }

    #[test(tokio::test)]
    async fn stale_data_keeps_cards_with_footer_notice() {
        let state = PollState::loading()
            .with_snapshot(snapshot())
            .with_error("503 Service Unavailable");
        let (_tx, rx) = watch::channel(state);
        let cancel = CancellationToken::new();
        let mut app = DashboardApp::new(rx, Duration::from_millis(10), Locale::en, &cancel);

        let mut terminal = Terminal::new(TestBackend::new(150, 12)).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");
        app.sync_targets();
        settle().await;
        terminal.draw(|f| app.render(f)).expect("draw");

        let text = buffer_text(&terminal);
        // no error panel, cards stay up
        assert!(!text.contains("metrics unavailable"));
        assert!(text.contains("Tasks executed"));
        assert!(text.contains("last attempt failed"));

        cancel.cancel();
    }
}
