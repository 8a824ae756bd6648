use super::App;
use crate::event_handler::EventHandler;

use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::{panic, time::Duration};

/// Run the TUI until the user quits
///
/// Raw mode and the alternate screen are restored on exit and from the panic
/// hook. The select loop interleaves terminal events with delayed bot replies
/// coming back over the app's channel.
pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backend = CrosstermBackend::new(std::io::stdout());
        if let Ok(mut terminal) = Terminal::new(backend) {
            let _ = terminal.show_cursor();
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal.clear()?;
    app.draw(&mut terminal)?;

    while !app.state().should_exit {
        let tui_poll = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            EventHandler::read()
        };

        tokio::select! {
            maybe_event = tui_poll => {
                if let Ok(Some(event)) = maybe_event {
                    app.handle_event(event);
                    app.draw(&mut terminal)?;
                }
            }
            maybe_reply = app.next_reply() => {
                if let Some(pending) = maybe_reply {
                    app.state_mut().reply_arrived(pending);
                    app.draw(&mut terminal)?;
                }
            }
        }
    }

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}
