pub mod event_loop;

use crate::components::{Footer, Header, Transcript};
use crate::event_handler::{EventHandler, KeyAction};
use crate::layout::TuiLayout;
use crate::state::AppState;

use crossterm::event::Event;
use greencheck_core::PendingReply;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use tokio::sync::mpsc;

/// Main TUI application
///
/// Owns the state and the channel that carries delayed bot replies back to
/// the event loop once their typing delay has elapsed.
pub struct App {
    state: AppState,
    reply_tx: mpsc::UnboundedSender<PendingReply>,
    reply_rx: mpsc::UnboundedReceiver<PendingReply>,
}

impl App {
    /// Create a new application
    pub fn new(state: AppState) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self { state, reply_tx, reply_rx }
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a mutable reference to the application state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a terminal event
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match EventHandler::handle_key_event(key, &mut self.state) {
                Some(KeyAction::Send) => self.dispatch_send(),
                Some(KeyAction::NewScript) => self.state.new_script(),
                Some(KeyAction::OpenSource) => self.open_source(),
                Some(KeyAction::Exit) => self.state.should_exit = true,
                None => {}
            }
        }
    }

    /// Submit the staged input and schedule its delayed reply
    ///
    /// The sleep runs on a background task; the token comes back through the
    /// reply channel and is applied on the UI task. Single-flight is upheld
    /// by the player: while a reply is in flight, `send` is a no-op.
    fn dispatch_send(&mut self) {
        let Some(pending) = self.state.send() else {
            return;
        };

        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(pending.delay()).await;
            let _ = tx.send(pending);
        });
    }

    /// Open the latest citation in the default browser
    fn open_source(&self) {
        if let Some(url) = self.state.latest_source_url()
            && let Err(e) = open::that(url)
        {
            tracing::warn!(url, error = %e, "failed to open citation");
        }
    }

    /// Receive the next delayed reply, if the channel has one ready
    pub async fn next_reply(&mut self) -> Option<PendingReply> {
        self.reply_rx.recv().await
    }

    /// Draw the UI
    pub fn draw(&self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        terminal.draw(|frame| {
            let layout = TuiLayout::calculate(frame.area());

            Header::new(&self.state).render(frame, layout.header);
            Transcript::new(&self.state).render(frame, layout.transcript);
            Footer::new(&self.state).render(frame, layout.footer);
        })?;

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
