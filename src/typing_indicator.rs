use crate::constants::INDICATOR_FRAME_MS;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::time::{Duration, Instant};

const FRAMES: [&str; 3] = ["●∙∙", "∙●∙", "∙∙●"];

/// The three bouncing dots shown at the bottom of the message list while a
/// reply is pending. Frame advancement is driven by the event-loop tick.
#[derive(Debug)]
pub struct TypingIndicator {
    frame: usize,
    last_frame_update: Instant,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self {
            frame: 0,
            last_frame_update: Instant::now(),
        }
    }

    pub fn advance(&mut self) {
        if self.last_frame_update.elapsed() >= Duration::from_millis(INDICATOR_FRAME_MS) {
            self.frame = (self.frame + 1) % FRAMES.len();
            self.last_frame_update = Instant::now();
        }
    }

    pub fn line(&self) -> Line<'static> {
        Line::from(Span::styled(
            FRAMES[self.frame],
            Style::default().fg(Color::Rgb(144, 238, 144)),
        ))
    }
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new()
    }
}
