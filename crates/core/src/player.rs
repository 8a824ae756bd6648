use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::script::{Script, ScriptLibrary};

/// Default simulated typing delay before a bot response lands
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1000);

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message in the conversation transcript
///
/// Bot entries capture the source URL of the script that produced them, so a
/// citation never dangles when the active script changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    /// Citation backing a bot response; `None` for user entries
    pub source_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Create a user entry
    pub fn user(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::User, text: text.into(), source_url: None, timestamp: Utc::now() }
    }

    /// Create a bot entry with its captured citation
    pub fn bot(text: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
            source_url: Some(source_url.into()),
            timestamp: Utc::now(),
        }
    }

    /// Wall-clock label for the transcript view, e.g. "14:32"
    pub fn time_label(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }
}

/// Token for an in-flight delayed bot reply
///
/// Returned by [`Player::begin_advance`]; redeem it with
/// [`Player::complete_advance`] after sleeping for `delay`. Tokens from a
/// script generation that has since been abandoned are silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    generation: u64,
    delay: Duration,
}

impl PendingReply {
    /// How long the bot "types" before this reply may be delivered
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Conversation script player
///
/// Owns the script library, a cursor into the active script, and the
/// transcript of exchanged messages. State changes only through
/// [`begin_advance`](Self::begin_advance) /
/// [`complete_advance`](Self::complete_advance) and
/// [`next_script`](Self::next_script).
///
/// Invariants:
/// - `active_script < library.len()`
/// - `turn_cursor <= active script turn count`
/// - at most one [`PendingReply`] of the current generation is outstanding
#[derive(Debug, Clone)]
pub struct Player {
    library: ScriptLibrary,
    typing_delay: Duration,
    active_script: usize,
    turn_cursor: usize,
    pending_input: String,
    awaiting_reply: bool,
    exhausted: bool,
    generation: u64,
    transcript: Vec<TranscriptEntry>,
}

impl Player {
    /// Create a player over the given library, active on script 0 with the
    /// opening prompt pre-seeded
    pub fn new(library: ScriptLibrary) -> Self {
        let pending_input = library.scripts()[0].opening_prompt().to_string();
        Self {
            library,
            typing_delay: DEFAULT_TYPING_DELAY,
            active_script: 0,
            turn_cursor: 0,
            pending_input,
            awaiting_reply: false,
            exhausted: false,
            generation: 0,
            transcript: Vec::new(),
        }
    }

    /// Override the simulated typing delay
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// The currently active script
    pub fn active_script(&self) -> &Script {
        &self.library.scripts()[self.active_script]
    }

    /// Index of the active script in the library
    pub fn active_script_index(&self) -> usize {
        self.active_script
    }

    /// Cursor into the active script's turns
    pub fn turn_cursor(&self) -> usize {
        self.turn_cursor
    }

    /// Text currently staged in the input composer
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replace the staged input (the user may edit the seeded prompt)
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Whether a delayed bot reply is in flight
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Whether the active script has been played to the end
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The transcript for the active script run
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The underlying script library
    pub fn library(&self) -> &ScriptLibrary {
        &self.library
    }

    /// Begin an advance: record the user message and stage the bot reply
    ///
    /// Returns `None` (a silent no-op) while a reply is already in flight or
    /// the script is exhausted. Otherwise appends the user entry, clears the
    /// staged input, and returns the token to redeem after the typing delay.
    pub fn begin_advance(&mut self, input: impl Into<String>) -> Option<PendingReply> {
        if self.awaiting_reply || self.exhausted {
            tracing::debug!(
                awaiting = self.awaiting_reply,
                exhausted = self.exhausted,
                "advance ignored"
            );
            return None;
        }

        let input = input.into();
        tracing::debug!(script = self.active_script, turn = self.turn_cursor, "advance started");

        self.transcript.push(TranscriptEntry::user(input));
        self.pending_input.clear();
        self.awaiting_reply = true;

        Some(PendingReply { generation: self.generation, delay: self.typing_delay })
    }

    /// Deliver the bot reply for a previously started advance
    ///
    /// Returns `false` without touching state when the token belongs to an
    /// abandoned script generation (the script changed while the reply was in
    /// flight). On success appends the bot entry, then either marks the
    /// script exhausted or moves the cursor and re-seeds the next prompt.
    pub fn complete_advance(&mut self, pending: PendingReply) -> bool {
        if pending.generation != self.generation || !self.awaiting_reply {
            tracing::debug!(
                token = pending.generation,
                current = self.generation,
                "stale reply dropped"
            );
            return false;
        }

        let script = &self.library.scripts()[self.active_script];
        let Some(turn) = script.turn(self.turn_cursor) else {
            return false;
        };
        let entry = TranscriptEntry::bot(turn.response.clone(), script.source_url.clone());
        let last_turn = self.turn_cursor == script.len() - 1;
        let next_prompt = script.turn(self.turn_cursor + 1).map(|t| t.prompt.clone());

        self.transcript.push(entry);
        self.awaiting_reply = false;

        if last_turn {
            // Cursor lands one past the final turn: exhausted iff cursor == turn count.
            self.turn_cursor += 1;
            self.exhausted = true;
            tracing::debug!(script = self.active_script, "script exhausted");
        } else {
            self.turn_cursor += 1;
            self.pending_input = next_prompt.unwrap_or_default();
        }

        true
    }

    /// Run a full advance, sleeping through the typing delay
    ///
    /// Convenience wrapper over the split-phase API; returns `false` when the
    /// advance was a no-op.
    pub async fn advance(&mut self, input: impl Into<String>) -> bool {
        let Some(pending) = self.begin_advance(input) else {
            return false;
        };
        tokio::time::sleep(pending.delay()).await;
        self.complete_advance(pending)
    }

    /// Abandon the current script and start the next one in the library
    ///
    /// Always accepted, even mid-conversation. Bumps the generation so any
    /// in-flight reply from the old script is dropped on delivery.
    pub fn next_script(&mut self) {
        self.generation += 1;
        self.active_script = self.library.next_index(self.active_script);
        self.turn_cursor = 0;
        self.transcript.clear();
        self.exhausted = false;
        self.awaiting_reply = false;
        self.pending_input = self.active_script().opening_prompt().to_string();

        tracing::debug!(script = self.active_script, "switched to next script");
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(ScriptLibrary::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_player() -> Player {
        Player::new(ScriptLibrary::builtin()).with_typing_delay(Duration::ZERO)
    }

    #[test]
    fn test_time_label_is_hours_and_minutes() {
        let label = TranscriptEntry::user("olá").time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn test_initial_state() {
        let player = test_player();
        assert_eq!(player.active_script_index(), 0);
        assert_eq!(player.turn_cursor(), 0);
        assert!(!player.is_awaiting_reply());
        assert!(!player.is_exhausted());
        assert!(player.transcript().is_empty());
        assert!(player.pending_input().starts_with("Chuva de peixes em ruas"));
    }

    #[test]
    fn test_begin_advance_appends_user_entry() {
        let mut player = test_player();
        let input = player.pending_input().to_string();
        let pending = player.begin_advance(input.clone());

        assert!(pending.is_some());
        assert!(player.is_awaiting_reply());
        assert_eq!(player.pending_input(), "");
        assert_eq!(player.transcript().len(), 1);
        assert_eq!(player.transcript()[0].speaker, Speaker::User);
        assert_eq!(player.transcript()[0].text, input);
        assert!(player.transcript()[0].source_url.is_none());
    }

    #[test]
    fn test_begin_advance_noop_while_awaiting() {
        let mut player = test_player();
        let _pending = player.begin_advance("first").unwrap();

        assert!(player.begin_advance("second").is_none());
        assert_eq!(player.transcript().len(), 1);
        assert_eq!(player.turn_cursor(), 0);
    }

    #[test]
    fn test_complete_advance_appends_bot_entry() {
        let mut player = test_player();
        let pending = player.begin_advance("claim").unwrap();

        assert!(player.complete_advance(pending));
        assert!(!player.is_awaiting_reply());
        assert_eq!(player.transcript().len(), 2);

        let bot = &player.transcript()[1];
        assert_eq!(bot.speaker, Speaker::Bot);
        assert!(bot.text.starts_with("É fake"));
        assert_eq!(bot.source_url.as_deref(), Some(player.active_script().source_url.as_str()));
    }

    #[test]
    fn test_user_entry_precedes_bot_entry() {
        let mut player = test_player();
        let pending = player.begin_advance("claim").unwrap();
        player.complete_advance(pending);

        assert_eq!(player.transcript()[0].speaker, Speaker::User);
        assert_eq!(player.transcript()[1].speaker, Speaker::Bot);
    }

    #[test]
    fn test_advance_reseeds_next_prompt() {
        let mut player = test_player();
        let pending = player.begin_advance("claim").unwrap();
        player.complete_advance(pending);

        assert_eq!(player.turn_cursor(), 1);
        assert!(!player.is_exhausted());
        assert_eq!(player.pending_input(), "As imagens que aparecem em 2015 são verdadeiras?");
    }

    #[test]
    fn test_script_exhaustion_after_all_turns() {
        let mut player = test_player();

        for _ in 0..2 {
            let input = player.pending_input().to_string();
            let pending = player.begin_advance(input).unwrap();
            assert!(player.complete_advance(pending));
        }

        assert!(player.is_exhausted());
        assert_eq!(player.turn_cursor(), player.active_script().len());
        assert_eq!(player.transcript().len(), 4);
    }

    #[test]
    fn test_advance_noop_when_exhausted() {
        let mut player = test_player();
        for _ in 0..2 {
            let pending = player.begin_advance("x").unwrap();
            player.complete_advance(pending);
        }
        assert!(player.is_exhausted());

        assert!(player.begin_advance("one more").is_none());
        assert_eq!(player.transcript().len(), 4);
    }

    #[test]
    fn test_next_script_cycles_and_resets() {
        let mut player = test_player();
        for _ in 0..2 {
            let pending = player.begin_advance("x").unwrap();
            player.complete_advance(pending);
        }

        player.next_script();

        assert_eq!(player.active_script_index(), 1);
        assert_eq!(player.turn_cursor(), 0);
        assert!(player.transcript().is_empty());
        assert!(!player.is_exhausted());
        assert_eq!(
            player.pending_input(),
            "É verdade que Veneza corre o risco de ser permanentemente inundada?"
        );
    }

    #[test]
    fn test_next_script_wraps_around() {
        let mut player = test_player();
        player.next_script();
        player.next_script();
        assert_eq!(player.active_script_index(), 0);
    }

    #[test]
    fn test_next_script_drops_in_flight_reply() {
        let mut player = test_player();
        let pending = player.begin_advance("abandoned claim").unwrap();

        player.next_script();

        assert!(!player.complete_advance(pending));
        assert!(player.transcript().is_empty());
        assert!(!player.is_awaiting_reply());
        assert_eq!(player.turn_cursor(), 0);
    }

    #[test]
    fn test_citation_survives_script_switch() {
        let mut player = test_player();
        let pending = player.begin_advance("claim").unwrap();
        player.complete_advance(pending);

        let captured = player.transcript()[1].source_url.clone().unwrap();
        let old_url = player.active_script().source_url.clone();
        player.next_script();

        assert_eq!(captured, old_url);
        assert_ne!(captured, player.active_script().source_url);
    }

    #[test]
    fn test_edited_input_is_recorded_verbatim() {
        let mut player = test_player();
        player.set_pending_input("my own wording of the claim");
        let input = player.pending_input().to_string();
        let pending = player.begin_advance(input).unwrap();
        player.complete_advance(pending);

        assert_eq!(player.transcript()[0].text, "my own wording of the claim");
    }

    #[test]
    fn test_transcript_bounded_by_turns() {
        let mut player = test_player();
        for _ in 0..10 {
            if let Some(pending) = player.begin_advance("x") {
                player.complete_advance(pending);
            }
        }
        let turns = player.active_script().len();
        assert_eq!(player.transcript().len(), 2 * turns);
    }

    #[tokio::test]
    async fn test_async_advance_full_cycle() {
        let mut player = test_player();

        assert!(player.advance("claim").await);
        assert_eq!(player.transcript().len(), 2);
        assert!(!player.is_awaiting_reply());

        assert!(player.advance("follow-up").await);
        assert!(player.is_exhausted());

        assert!(!player.advance("ignored").await);
        assert_eq!(player.transcript().len(), 4);
    }

    #[test]
    fn test_pending_reply_delay() {
        let mut player = Player::default().with_typing_delay(Duration::from_millis(250));
        let pending = player.begin_advance("claim").unwrap();
        assert_eq!(pending.delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_speaker_display() {
        assert_eq!(Speaker::User.to_string(), "user");
        assert_eq!(Speaker::Bot.to_string(), "bot");
    }
}
