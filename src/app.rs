use crate::chat::{ConversationLog, Sender};
use crate::constants::REPLY_DELAY_MS;
use crate::simulator::{ResponseSimulator, SimulatorEvent};
use crate::typing_indicator::TypingIndicator;
use log::info;
use ratatui::layout::Rect;
use std::time::Duration;
use tokio::sync::mpsc;

/// The widget instance: all mutable UI state, the conversation log, and the
/// response simulator. Constructed when the event loop starts and dropped on
/// exit; `shutdown` cancels any reply still in flight.
pub struct App {
    pub panel_open: bool,
    pub log: ConversationLog,
    pub input: String,
    pub scroll: u16,
    pub should_quit: bool,
    pub typing_indicator: TypingIndicator,
    /// Hit-test targets for mouse clicks, refreshed on every draw.
    pub bubble_area: Option<Rect>,
    pub send_area: Option<Rect>,
    simulator: ResponseSimulator,
    sim_rx: mpsc::UnboundedReceiver<SimulatorEvent>,
}

impl App {
    pub fn new() -> App {
        let (simulator, sim_rx) =
            ResponseSimulator::new(Duration::from_millis(REPLY_DELAY_MS));
        App {
            panel_open: false,
            log: ConversationLog::default(),
            input: String::new(),
            scroll: 0,
            should_quit: false,
            typing_indicator: TypingIndicator::new(),
            bubble_area: None,
            send_area: None,
            simulator,
            sim_rx,
        }
    }

    /// Flips panel visibility. Deliberately touches nothing else: the
    /// conversation and any pending reply are unaffected.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// The single submission entry point, shared by the Enter key and the
    /// send control. Blank input (after trimming) is silently discarded and
    /// the buffer is left as typed; otherwise the buffer is cleared and the
    /// message appended.
    pub fn submit_message(&mut self) -> bool {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return false;
        }
        self.input.clear();
        info!("user message submitted ({} chars)", text.len());
        self.append_message(Sender::User, &text);
        true
    }

    /// True while an echo is scheduled and not yet delivered or superseded.
    pub fn is_response_pending(&self) -> bool {
        self.simulator.is_pending()
    }

    /// Drains fired reply timers. Stale echoes, from timers that fired into
    /// the channel just before being superseded, are dropped here.
    pub fn poll_simulator(&mut self) {
        while let Ok(event) = self.sim_rx.try_recv() {
            match event {
                SimulatorEvent::Echo { text, generation } => {
                    if self.simulator.accept(generation) {
                        info!("echo delivered");
                        self.append_message(Sender::Bot, &text);
                    }
                }
            }
        }
    }

    /// Advances animation state. Driven by the event-loop tick.
    pub fn tick(&mut self) {
        self.typing_indicator.advance();
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Cancels any outstanding reply timer. Called on teardown so a timer
    /// can never fire into a dismantled widget.
    pub fn shutdown(&mut self) {
        self.simulator.cancel();
    }

    fn append_message(&mut self, sender: Sender, text: &str) {
        if let Some(message) = self.log.append(sender, text) {
            self.simulator.evaluate(message);
        }
        // Follow the newest message; clamped to the real maximum at draw.
        self.scroll = u16::MAX;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    fn texts(app: &App) -> Vec<(Sender, &str)> {
        app.log
            .messages()
            .iter()
            .map(|m| (m.sender(), m.text()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn submit_then_echo_round_trip() {
        let mut app = App::new();
        app.input.push_str("hello");
        assert!(app.submit_message());

        assert_eq!(texts(&app), vec![(Sender::User, "hello")]);
        assert!(app.is_response_pending());
        assert!(app.input.is_empty());

        time::sleep(Duration::from_millis(1001)).await;
        app.poll_simulator();

        assert_eq!(
            texts(&app),
            vec![(Sender::User, "hello"), (Sender::Bot, "hello")]
        );
        assert!(!app.is_response_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_submission_is_ignored() {
        let mut app = App::new();
        app.input.push_str("   ");
        assert!(!app.submit_message());

        assert!(app.log.is_empty());
        assert!(!app.is_response_pending());
        // The early return skips the clear, matching the guard semantics.
        assert_eq!(app.input, "   ");

        time::sleep(Duration::from_millis(2000)).await;
        app.poll_simulator();
        assert!(app.log.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_supersedes_pending_reply() {
        let mut app = App::new();
        app.input.push_str("a");
        app.submit_message();

        time::sleep(Duration::from_millis(500)).await;
        app.input.push_str("b");
        app.submit_message();
        assert!(app.is_response_pending());

        time::sleep(Duration::from_millis(1001)).await;
        app.poll_simulator();

        assert_eq!(
            texts(&app),
            vec![
                (Sender::User, "a"),
                (Sender::User, "b"),
                (Sender::Bot, "b"),
            ]
        );
        assert!(!app.is_response_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn supersession_after_first_timer_fires_unconsumed() {
        let mut app = App::new();
        app.input.push_str("a");
        app.submit_message();

        // First timer fires into the channel, but a new user message lands
        // before the event loop drains it.
        time::sleep(Duration::from_millis(1001)).await;
        app.input.push_str("b");
        app.submit_message();
        app.poll_simulator();

        // The stale echo of "a" was rejected; "b" is still pending.
        assert_eq!(
            texts(&app),
            vec![(Sender::User, "a"), (Sender::User, "b")]
        );
        assert!(app.is_response_pending());

        time::sleep(Duration::from_millis(1001)).await;
        app.poll_simulator();
        assert_eq!(
            texts(&app),
            vec![
                (Sender::User, "a"),
                (Sender::User, "b"),
                (Sender::Bot, "b"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_panel_leaves_conversation_untouched() {
        let mut app = App::new();
        app.input.push_str("hello");
        app.submit_message();

        app.toggle_panel();
        assert!(app.panel_open);
        app.toggle_panel();
        assert!(!app.panel_open);

        assert_eq!(texts(&app), vec![(Sender::User, "hello")]);
        assert!(app.is_response_pending());

        // And the reply lands regardless of panel visibility.
        time::sleep(Duration::from_millis(1001)).await;
        app.poll_simulator();
        assert_eq!(app.log.len(), 2);
        assert!(!app.panel_open);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_reply() {
        let mut app = App::new();
        app.input.push_str("bye");
        app.submit_message();
        app.shutdown();
        assert!(!app.is_response_pending());

        time::sleep(Duration::from_millis(2000)).await;
        app.poll_simulator();
        assert_eq!(texts(&app), vec![(Sender::User, "bye")]);
    }
}
