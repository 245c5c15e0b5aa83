pub mod event;
pub mod layout;
pub mod refresh;
pub mod session;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::DisplayItem;

use self::event::EventHandler;
use self::session::Session;

/// How often the event loop wakes up without input. Bounds the latency of
/// refresh-countdown expiry detection.
const TICK_RATE: Duration = Duration::from_millis(250);

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_session(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_session(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    // initial load may reuse the transport cache; in-session refreshes force
    let entries = ctx.source.fetch_all(false).await?;
    let items: Vec<DisplayItem> = entries.iter().map(DisplayItem::from_entry).collect();

    let size = crossterm::terminal::size()?;
    let mut session = Session::new(&config, items, size)?;
    let events = EventHandler::new(TICK_RATE);

    loop {
        terminal.draw(|frame| layout::render(frame, &mut session))?;

        let event = events.next()?;
        session.handle_event(&ctx, event).await?;

        if session.should_quit {
            break;
        }
    }

    Ok(())
}
