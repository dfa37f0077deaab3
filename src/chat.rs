use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single chat message. Immutable once created: the fields are private and
/// only readable through accessors, and the log exposes no way to touch one
/// after it has been appended.
#[derive(Debug, Clone)]
pub struct Message {
    sender: Sender,
    text: String,
    timestamp: DateTime<Local>,
}

impl Message {
    fn new(sender: Sender, text: String) -> Self {
        Self {
            sender,
            text,
            timestamp: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Renders the message as a bubble: a dim header line with the sender
    /// label and HH:MM timestamp, then the text wrapped to at most 80% of
    /// the panel width. User bubbles hug the right edge, bot bubbles the
    /// left, mirroring the usual chat layout.
    pub fn render(&self, width: u16) -> Vec<Line<'static>> {
        let wrap_width = ((width as usize * 4) / 5).max(8);
        let (label, style) = match self.sender {
            Sender::User => ("you", Style::default().fg(Color::Rgb(255, 223, 128))),
            Sender::Bot => ("bot", Style::default().fg(Color::Rgb(144, 238, 144))),
        };

        let mut lines = Vec::new();
        let header = Line::from(Span::styled(
            format!("{} {}", label, self.timestamp.format("%H:%M")),
            style.add_modifier(Modifier::DIM),
        ));
        lines.push(self.align(header));

        for piece in wrap(&self.text, wrap_width) {
            let line = Line::from(Span::styled(piece.into_owned(), style));
            lines.push(self.align(line));
        }
        lines
    }

    fn align(&self, line: Line<'static>) -> Line<'static> {
        match self.sender {
            Sender::User => line.right_aligned(),
            Sender::Bot => line.left_aligned(),
        }
    }
}

/// Append-only, insertion-ordered conversation store. Messages are never
/// edited, reordered, deduplicated, or removed.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    /// Appends a message, trimming surrounding whitespace first. Blank text
    /// is silently discarded and nothing is stored. Returns a reference to
    /// the appended message so the caller can feed the response simulator.
    pub fn append(&mut self, sender: Sender, text: &str) -> Option<&Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(Message::new(sender, text.to_string()));
        self.messages.last()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_submission_order() {
        let mut log = ConversationLog::default();
        for text in ["first", "second", "third"] {
            log.append(Sender::User, text);
        }
        let texts: Vec<&str> = log.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(log.messages().iter().all(|m| m.sender() == Sender::User));
    }

    #[test]
    fn append_rejects_blank_text() {
        let mut log = ConversationLog::default();
        assert!(log.append(Sender::User, "").is_none());
        assert!(log.append(Sender::User, "   ").is_none());
        assert!(log.append(Sender::User, "\t\n").is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn append_trims_surrounding_whitespace() {
        let mut log = ConversationLog::default();
        let msg = log.append(Sender::User, "  hello  ").unwrap();
        assert_eq!(msg.text(), "hello");
    }
}
