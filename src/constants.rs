// UI Constants
pub const PANEL_WIDTH: u16 = 44;
pub const BUBBLE_WIDTH: u16 = 5;
pub const BUBBLE_HEIGHT: u16 = 3;
pub const BUBBLE_GLYPH: &str = "💬";
pub const SEND_GLYPH: &str = "➤";
pub const PANEL_TITLE: &str = "Chat";

// Timing Constants
pub const REPLY_DELAY_MS: u64 = 1000;
pub const TICK_MS: u64 = 100;
pub const INDICATOR_FRAME_MS: u64 = 250;
