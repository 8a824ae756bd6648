use crate::{state::AppState, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use unicode_width::UnicodeWidthChar;

/// Footer component displaying the input composer and key hints
///
/// - Separator line
/// - Input card with a green accent bar, cursor, and placeholder
/// - Key hints row
pub struct Footer<'a> {
    state: &'a AppState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render footer to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.height < 3 {
            return;
        }

        let separator = Rect { height: 1, ..area };
        let input = Rect { y: area.y + 1, height: area.height.saturating_sub(2).min(3), ..area };
        let hints = Rect { y: area.y + area.height - 1, height: 1, ..area };

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(Theme::BORDER),
            ))),
            separator,
        );

        self.render_input_card(frame, input);
        self.render_hints(frame, hints);
    }

    /// Render the input card with accent bar and cursor
    fn render_input_card(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.width < 10 || area.height < 1 {
            return;
        }

        let panel_block = Block::default().style(Style::default().bg(Theme::PANEL_BG));
        frame.render_widget(panel_block, area);

        let accent_width = 2;
        let accent_color = if self.state.can_edit() { Theme::GREEN } else { Theme::MUTED };
        let accent_area = Rect { width: accent_width, ..area };
        frame.render_widget(Block::default().style(Style::default().bg(accent_color)), accent_area);

        let input_area = Rect {
            x: area.x + accent_width + 1,
            y: area.y + area.height / 2,
            width: area.width.saturating_sub(accent_width + 2),
            height: 1,
        };

        let spans = self.input_spans(input_area.width as usize);
        frame.render_widget(Paragraph::new(Line::from(spans)), input_area);

        let cursor_text = format!("1:{} ", self.state.input.cursor + 1);
        let cursor_paragraph =
            Paragraph::new(Span::styled(cursor_text, Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG)))
                .alignment(Alignment::Right);
        frame.render_widget(cursor_paragraph, input_area);
    }

    /// Build the input line spans, keeping the cursor visible
    fn input_spans(&self, avail: usize) -> Vec<Span<'_>> {
        let input = &self.state.input;
        let panel = Style::default().bg(Theme::PANEL_BG);

        if input.buffer.is_empty() {
            let placeholder = if self.state.can_edit() { "Digite sua mensagem..." } else { "" };
            return vec![
                Span::styled(placeholder, panel.fg(Theme::MUTED)),
                Span::styled("█", Style::default().bg(Theme::FG).fg(Theme::FG)),
            ];
        }

        let at = input.byte_index();
        let before = truncate_to_tail(&input.buffer[..at], avail.saturating_sub(8));
        let after = &input.buffer[at..];

        let mut spans = Vec::new();
        if !before.is_empty() {
            spans.push(Span::styled(before.to_string(), panel.fg(Theme::FG)));
        }
        spans.push(Span::styled("█", Style::default().bg(Theme::FG).fg(Theme::FG)));
        if !after.is_empty() {
            spans.push(Span::styled(after.to_string(), panel.fg(Theme::FG)));
        }
        spans
    }

    /// Render the key hints row
    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let hints = self.hints();
        let mut spans = Vec::new();

        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(key, Style::default().fg(Theme::GREEN)));
            spans.push(Span::styled(format!(" {}", action), Style::default().fg(Theme::MUTED)));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().style(Style::default().bg(Theme::BG)))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = Vec::new();

        if self.state.can_send() {
            hints.push(("[Enter]", "enviar"));
        }
        hints.push(("[Ctrl+N]", "nova conversa"));
        if self.state.latest_source_url().is_some() {
            hints.push(("[Ctrl+O]", "fonte"));
        }
        hints.push(("[Esc]", "sair"));
        hints
    }
}

/// Keep the trailing portion of `s` that fits in `max_width` columns
fn truncate_to_tail(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();

    for (i, c) in s.char_indices().rev() {
        width += c.width().unwrap_or(0);
        if width > max_width {
            break;
        }
        start = i;
    }

    &s[start..]
}
