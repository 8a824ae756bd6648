use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculated layout for the TUI
///
/// A single vertical split: one header line, the transcript filling the
/// middle, and a five-line footer (separator, input card, hints).
#[derive(Debug, Clone)]
pub struct TuiLayout {
    /// Header area (1 line)
    pub header: Rect,
    /// Main transcript area
    pub transcript: Rect,
    /// Footer area (separator + input card + hints)
    pub footer: Rect,
}

impl TuiLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(5)])
            .split(area);

        Self { header: chunks[0], transcript: chunks[1], footer: chunks[2] }
    }
}
