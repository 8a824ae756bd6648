use ratatui::style::{Color, Style};

/// Color theme for the GreenCheck TUI
///
/// Dark palette with a green primary accent, matching the fact-check
/// branding. Color pairs are chosen for readable contrast on dark terminals.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background: near-black green tint (fills terminal)
    pub const BG: Color = Color::Rgb(18, 24, 20);

    /// Foreground: light gray-green (primary text)
    pub const FG: Color = Color::Rgb(204, 212, 206);

    /// Secondary background: panels, cards, input
    pub const PANEL_BG: Color = Color::Rgb(28, 36, 31);

    /// Primary accent: green (brand, user cards)
    pub const GREEN: Color = Color::Rgb(120, 190, 140);

    /// Secondary accent: blue (bot cards)
    pub const BLUE: Color = Color::Rgb(130, 160, 200);

    /// Warning accent: yellow (typing indicator)
    pub const YELLOW: Color = Color::Rgb(222, 180, 120);

    /// Muted text: dimmed foreground (hints, citations)
    pub const MUTED: Color = Color::Rgb(110, 122, 114);

    /// Border color
    pub const BORDER: Color = Color::Rgb(58, 72, 62);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Primary accent style
    pub fn primary() -> Style {
        Style::default().fg(Self::GREEN).bg(Self::BG)
    }

    /// Muted style (for secondary text)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    /// Panel style
    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    /// Border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Speaker label color
    pub fn speaker_color(speaker: &str) -> Color {
        match speaker {
            "user" => Self::GREEN,
            "bot" => Self::BLUE,
            _ => Self::MUTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_values() {
        assert!(matches!(Theme::BG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::FG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::PANEL_BG, Color::Rgb(_, _, _)));
    }

    #[test]
    fn test_speaker_colors() {
        assert_eq!(Theme::speaker_color("user"), Theme::GREEN);
        assert_eq!(Theme::speaker_color("bot"), Theme::BLUE);
        assert_eq!(Theme::speaker_color("other"), Theme::MUTED);
    }

    #[test]
    fn test_styles() {
        let base = Theme::base();
        assert_eq!(base.fg, Some(Theme::FG));
        assert_eq!(base.bg, Some(Theme::BG));

        let panel = Theme::panel();
        assert_eq!(panel.bg, Some(Theme::PANEL_BG));
    }
}
