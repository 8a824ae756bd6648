pub mod input;

pub use input::InputState;

use greencheck_core::{PendingReply, Player, Speaker};

/// Top-level TUI state: the conversation player plus view concerns
///
/// All mutation goes through the methods below; the event loop calls them in
/// response to key events and delayed reply completions.
#[derive(Debug)]
pub struct AppState {
    /// The conversation script player
    pub player: Player,
    /// Input composer
    pub input: InputState,
    /// Set when the user asks to quit
    pub should_exit: bool,
    /// Transcript scroll offset, in lines up from the bottom
    pub scroll_offset: usize,
}

impl AppState {
    /// Create the state with the input seeded from the player's first prompt
    pub fn new(player: Player) -> Self {
        let input = InputState::seeded(player.pending_input());
        Self { player, input, should_exit: false, scroll_offset: 0 }
    }

    /// Whether the send action is currently enabled
    pub fn can_send(&self) -> bool {
        !self.player.is_awaiting_reply() && !self.player.is_exhausted()
    }

    /// Whether the input field accepts edits
    pub fn can_edit(&self) -> bool {
        !self.player.is_exhausted()
    }

    /// Submit the staged input; returns the typing-delay token to schedule
    ///
    /// No-op (None) while a reply is in flight or the script is exhausted.
    pub fn send(&mut self) -> Option<PendingReply> {
        if !self.can_send() {
            return None;
        }
        let text = self.input.take();
        let pending = self.player.begin_advance(text)?;
        self.scroll_offset = 0;
        Some(pending)
    }

    /// Apply a delayed reply completion; stale tokens are dropped
    pub fn reply_arrived(&mut self, pending: PendingReply) -> bool {
        if !self.player.complete_advance(pending) {
            return false;
        }
        self.input.set_text(self.player.pending_input());
        self.scroll_offset = 0;
        true
    }

    /// Abandon the current conversation and start the next script
    pub fn new_script(&mut self) {
        self.player.next_script();
        self.input.set_text(self.player.pending_input());
        self.scroll_offset = 0;
    }

    /// Citation URL of the most recent bot response, if any
    pub fn latest_source_url(&self) -> Option<&str> {
        self.player
            .transcript()
            .iter()
            .rev()
            .find(|e| e.speaker == Speaker::Bot)
            .and_then(|e| e.source_url.as_deref())
    }

    /// Scroll the transcript up (towards older entries)
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    /// Scroll the transcript down (towards the latest entries)
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Player::default())
    }
}
