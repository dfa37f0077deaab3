use anyhow::Result;
use burble::constants::TICK_MS;
use burble::errors::{WidgetError, WidgetResult};
use burble::{chat_view, key_handlers, logging, App};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = logging::init()?;
    info!("starting burble");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal).await;

    // Restore the terminal before surfacing any failure.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("burble stopped");
    res?;
    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>) -> WidgetResult<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Reader task: polls crossterm and emits input plus a steady tick for
    // the typing-indicator animation.
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            match event::poll(Duration::from_millis(TICK_MS)) {
                Ok(true) => {
                    if let Ok(ev) = event::read() {
                        if tx.send(Event::Input(ev)).await.is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => return,
            }
            if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        terminal.draw(|f| chat_view::draw(f, &mut app))?;

        match rx.recv().await.ok_or(WidgetError::ChannelClosed)? {
            Event::Input(CEvent::Key(key)) => key_handlers::handle_key(key, &mut app),
            Event::Input(CEvent::Mouse(mouse)) => key_handlers::handle_mouse(mouse, &mut app),
            Event::Input(_) => {}
            Event::Tick => app.tick(),
        }

        // Fired reply timers land here, on the event loop, never from the
        // timer task itself.
        app.poll_simulator();

        if app.should_quit {
            break;
        }
    }

    app.shutdown();
    Ok(())
}
