use crate::{state::AppState, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// Header component: brand, active script, and turn progress
pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render header to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let left = Paragraph::new(Line::from(self.left_spans())).block(Block::default().bg(Theme::PANEL_BG));
        frame.render_widget(left, area);

        let right = Paragraph::new(Line::from(vec![Span::styled(
            format!("{} ", self.progress_label()),
            Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG),
        )]))
        .alignment(Alignment::Right);
        frame.render_widget(right, area);
    }

    fn left_spans(&self) -> Vec<Span<'_>> {
        let player = &self.state.player;
        vec![
            Span::styled(" GreenCheck ", Style::default().fg(Theme::GREEN).bg(Theme::PANEL_BG).bold()),
            Span::styled(
                format!(
                    "roteiro {}/{}: {}",
                    player.active_script_index() + 1,
                    player.library().len(),
                    player.active_script().title
                ),
                Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG),
            ),
        ]
    }

    fn progress_label(&self) -> String {
        let player = &self.state.player;
        if player.is_exhausted() {
            "encerrada".to_string()
        } else {
            format!("turno {}/{}", player.turn_cursor() + 1, player.active_script().len())
        }
    }
}
