//! Light/dark theming
//!
//! A single flag, persisted in the preference store under a fixed key.
//! Startup falls back to the terminal's advertised color scheme
//! (`COLORFGBG`) when no preference has been saved yet.

use crate::config::Preferences;
use crate::error::Result;
use crate::lang::Category;
use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

/// Preference store key for the theme flag
pub const THEME_PREF_KEY: &str = "cnack.theme";

/// Active color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Load the persisted theme, falling back to the terminal scheme
    pub fn load(prefs: &Preferences) -> Self {
        match prefs.get(THEME_PREF_KEY) {
            Some("light") => Theme::Light,
            Some("dark") => Theme::Dark,
            _ => Self::from_terminal_env(),
        }
    }

    /// Persist this theme under the fixed preference key
    pub fn persist(self, prefs: &mut Preferences) -> Result<()> {
        prefs.set(THEME_PREF_KEY, self.pref_value());
        prefs.save()?;
        debug!(theme = self.pref_value(), "theme preference saved");
        Ok(())
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn pref_value(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Best-effort scheme detection from `COLORFGBG` ("fg;bg"; bg 7 or
    /// 15 means a light background). Defaults to dark.
    fn from_terminal_env() -> Self {
        match std::env::var("COLORFGBG") {
            Ok(value) => Self::from_colorfgbg(&value),
            Err(_) => Theme::Dark,
        }
    }

    fn from_colorfgbg(value: &str) -> Self {
        match value.rsplit(';').next() {
            Some("7") | Some("15") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// Style for a tokenizer category
    pub fn category_style(self, category: Category) -> Style {
        let fg = match (self, category) {
            (Theme::Dark, Category::Comment) => Color::Rgb(92, 99, 112),
            (Theme::Dark, Category::Str) => Color::Rgb(152, 195, 121),
            (Theme::Dark, Category::Keyword) => Color::Rgb(197, 134, 192),
            (Theme::Dark, Category::Number) => Color::Rgb(209, 154, 102),
            (Theme::Dark, Category::Punctuation) => Color::Rgb(171, 178, 191),
            (Theme::Dark, Category::Operator) => Color::Rgb(86, 182, 194),
            (Theme::Dark, Category::Plain) => Color::Rgb(220, 223, 228),

            (Theme::Light, Category::Comment) => Color::Rgb(160, 161, 167),
            (Theme::Light, Category::Str) => Color::Rgb(80, 161, 79),
            (Theme::Light, Category::Keyword) => Color::Rgb(166, 38, 164),
            (Theme::Light, Category::Number) => Color::Rgb(193, 132, 1),
            (Theme::Light, Category::Punctuation) => Color::Rgb(56, 58, 66),
            (Theme::Light, Category::Operator) => Color::Rgb(1, 132, 188),
            (Theme::Light, Category::Plain) => Color::Rgb(15, 70, 135),
        };
        Style::default().fg(fg)
    }

    /// Line-number gutter style
    pub fn gutter_style(self, cursor_line: bool) -> Style {
        if cursor_line {
            Style::default()
                .fg(self.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    /// Status bar style
    pub fn status_style(self) -> Style {
        match self {
            Theme::Dark => Style::default().fg(Color::White).bg(Color::DarkGray),
            Theme::Light => Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(Color::Rgb(15, 69, 135)),
        }
    }

    /// Error box style
    pub fn error_style(self) -> Style {
        Style::default().fg(Color::Rgb(211, 47, 47))
    }

    /// Panel accent (titles, cursor-line numbers, table header)
    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Yellow,
            Theme::Light => Color::Rgb(74, 137, 198),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_roundtrip() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_load_reads_fixed_key() {
        let mut prefs = Preferences::default();
        prefs.set(THEME_PREF_KEY, "light");
        assert_eq!(Theme::load(&prefs), Theme::Light);

        prefs.set(THEME_PREF_KEY, "dark");
        assert_eq!(Theme::load(&prefs), Theme::Dark);
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(Theme::from_colorfgbg("0;15"), Theme::Light);
        assert_eq!(Theme::from_colorfgbg("15;0"), Theme::Dark);
        assert_eq!(Theme::from_colorfgbg("garbage"), Theme::Dark);
    }

    #[test]
    fn test_persist_writes_key() {
        let mut prefs = Preferences::default();
        // save() may hit the real config dir; only the in-memory part is
        // asserted here, the store roundtrip is covered in config tests
        prefs.set(THEME_PREF_KEY, Theme::Light.pref_value());
        assert_eq!(prefs.get(THEME_PREF_KEY), Some("light"));
    }
}
