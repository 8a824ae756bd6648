use crate::{state::AppState, theme::Theme};

use greencheck_core::Speaker;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// Transcript component displaying the conversation
///
/// Entries render as speaker-labelled cards with word-wrapped text; bot cards
/// carry their captured citation. The view is anchored to the bottom so every
/// transcript mutation scrolls the latest entry into sight.
pub struct Transcript<'a> {
    state: &'a AppState,
}

impl<'a> Transcript<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render transcript to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Block::default().style(Theme::base()), area);

        if area.width < 6 || area.height < 1 {
            return;
        }

        let lines = self.build_lines(area.width.saturating_sub(4) as usize);
        let total = lines.len();
        let height = area.height as usize;

        let max_offset = total.saturating_sub(height);
        let offset = self.state.scroll_offset.min(max_offset);
        let end = total - offset;
        let start = end.saturating_sub(height);

        let visible: Vec<Line<'_>> = lines[start..end].to_vec();
        let paragraph = Paragraph::new(visible).block(Block::default().style(Theme::base()));
        let inner = Rect { x: area.x + 2, width: area.width.saturating_sub(4), ..area };
        frame.render_widget(paragraph, inner);
    }

    /// Build the full list of transcript lines at the given wrap width
    fn build_lines(&self, width: usize) -> Vec<Line<'_>> {
        let width = width.max(10);
        let mut lines = Vec::new();

        for entry in self.state.player.transcript() {
            let (label, color) = match entry.speaker {
                Speaker::User => ("Usuário:", Theme::speaker_color("user")),
                Speaker::Bot => ("Chatbot:", Theme::speaker_color("bot")),
            };

            lines.push(Line::from(vec![
                Span::styled(label, Style::default().fg(color).bold()),
                Span::raw(" "),
                Span::styled(entry.time_label(), Style::default().fg(Theme::MUTED)),
            ]));
            for wrapped in textwrap::wrap(&entry.text, width) {
                lines.push(Line::from(Span::styled(wrapped.to_string(), Theme::base())));
            }

            if let Some(url) = &entry.source_url {
                lines.push(Line::from(vec![
                    Span::styled("fonte ", Style::default().fg(Theme::MUTED).italic()),
                    Span::styled(url.as_str(), Style::default().fg(Theme::MUTED).underlined()),
                ]));
            }

            lines.push(Line::default());
        }

        if self.state.player.is_awaiting_reply() {
            lines.push(Line::from(Span::styled(
                "Chatbot:",
                Style::default().fg(Theme::speaker_color("bot")).bold(),
            )));
            lines.push(Line::from(Span::styled(
                "Digitando...",
                Style::default().fg(Theme::YELLOW).italic(),
            )));
            lines.push(Line::default());
        }

        if self.state.player.is_exhausted() {
            lines.push(Line::from(Span::styled(
                "Conversa Encerrada.",
                Style::default().fg(Theme::MUTED).italic(),
            )));
        }

        lines
    }
}
