use crate::constants::{
    BUBBLE_GLYPH, BUBBLE_HEIGHT, BUBBLE_WIDTH, PANEL_TITLE, PANEL_WIDTH, SEND_GLYPH,
};
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Minimum terminal size below which only the bubble is drawn.
const MIN_PANEL_COLS: u16 = 20;
const MIN_PANEL_ROWS: u16 = 10;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    draw_backdrop(f, size);

    let bubble = bubble_rect(size);
    draw_bubble(f, bubble);
    app.bubble_area = Some(bubble);

    if app.panel_open && size.width >= MIN_PANEL_COLS && size.height >= MIN_PANEL_ROWS {
        draw_panel(f, app, panel_rect(size));
    } else {
        app.send_area = None;
    }
}

fn draw_backdrop(f: &mut Frame, size: Rect) {
    if size.height == 0 {
        return;
    }
    let hint = Paragraph::new(Line::from(Span::styled(
        " ctrl+t chat · q quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(
        hint,
        Rect {
            x: size.x,
            y: size.y + size.height - 1,
            width: size.width.min(24),
            height: 1,
        },
    );
}

/// The circular toggle control, fixed at the bottom-right of the viewport.
fn bubble_rect(size: Rect) -> Rect {
    let width = BUBBLE_WIDTH.min(size.width);
    let height = BUBBLE_HEIGHT.min(size.height);
    Rect {
        x: (size.x + size.width).saturating_sub(width + 2).max(size.x),
        y: (size.y + size.height).saturating_sub(height + 1).max(size.y),
        width,
        height,
    }
}

fn draw_bubble(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(BUBBLE_GLYPH).centered(),
        inner,
    );
}

fn panel_rect(size: Rect) -> Rect {
    let width = PANEL_WIDTH.min(size.width.saturating_sub(2));
    let max_height = size.height.saturating_sub(BUBBLE_HEIGHT + 2);
    let height = (size.height.saturating_mul(2) / 3).clamp(MIN_PANEL_ROWS.min(max_height), max_height);
    Rect {
        x: (size.x + size.width).saturating_sub(width + 2),
        y: (size.y + size.height).saturating_sub(height + BUBBLE_HEIGHT + 1),
        width,
        height,
    }
}

fn draw_panel(f: &mut Frame, app: &mut App, area: Rect) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(inner);

    draw_header(f, chunks[0]);
    draw_messages(f, app, chunks[1]);
    draw_input(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(PANEL_TITLE)
            .centered()
            .style(Style::default().fg(Color::White).bg(Color::Blue)),
        area,
    );
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.log.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area.width));
    }
    if app.is_response_pending() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(app.typing_indicator.line());
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    if app.scroll > max_scroll {
        app.scroll = max_scroll;
    }

    let messages = Paragraph::new(lines).scroll((app.scroll, 0));
    f.render_widget(messages, area);
}

fn draw_input(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 4 || inner.height == 0 {
        app.send_area = None;
        return;
    }

    // Leave room on the right for the send glyph.
    let text_area = Rect {
        width: inner.width - 3,
        ..inner
    };
    let text_width = app.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(text_area.width.saturating_sub(1));

    let input = if app.input.is_empty() {
        Paragraph::new(Span::styled(
            "Type a message…",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ))
    } else {
        Paragraph::new(Span::raw(app.input.clone())).scroll((0, scroll_offset))
    };
    f.render_widget(input, text_area);

    let send = Rect {
        x: inner.x + inner.width - 2,
        y: inner.y,
        width: 2,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(Span::styled(SEND_GLYPH, Style::default().fg(Color::Blue))),
        send,
    );
    app.send_area = Some(send);

    let cursor_x = text_area.x + (text_width - scroll_offset).min(text_area.width - 1);
    f.set_cursor_position((cursor_x, text_area.y));
}
