use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::session::status::QuestionStatus;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct BundledThemes;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colour strings as written in theme files: `#rrggbb`, a named terminal
/// colour such as `darkgray`, or `reset`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_dim: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub not_visited: String,
    pub answered: String,
    pub marked: String,
    pub timer: String,
    pub error: String,
    pub success: String,
}

impl Theme {
    /// A user theme in `<config_dir>/quizdeck/themes/<name>.toml` shadows a
    /// bundled theme of the same name.
    pub fn load(name: &str) -> Option<Self> {
        user_theme(name).or_else(|| bundled_theme(name))
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = BundledThemes::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

fn user_theme_path(name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quizdeck").join("themes").join(format!("{name}.toml")))
}

fn user_theme(name: &str) -> Option<Theme> {
    let path = user_theme_path(name)?;
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(theme) => Some(theme),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed theme");
            None
        }
    }
}

fn bundled_theme(name: &str) -> Option<Theme> {
    let file = BundledThemes::get(&format!("{name}.toml"))?;
    let content = std::str::from_utf8(&file.data).ok()?;
    toml::from_str(content).ok()
}

impl Default for Theme {
    fn default() -> Self {
        bundled_theme("terminal-default").unwrap_or_else(|| Self {
            name: "fallback".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        let named = |s: &str| s.to_string();
        Self {
            bg: named("reset"),
            fg: named("reset"),
            text_dim: named("darkgray"),
            accent: named("cyan"),
            border: named("gray"),
            border_focused: named("cyan"),
            header_bg: named("reset"),
            header_fg: named("white"),
            not_visited: named("darkgray"),
            answered: named("green"),
            marked: named("magenta"),
            timer: named("yellow"),
            error: named("red"),
            success: named("green"),
        }
    }
}

/// Unparseable values fall back to the terminal default.
pub fn parse_color(value: &str) -> Color {
    value.trim().parse().unwrap_or(Color::Reset)
}

macro_rules! color_accessors {
    ($($field:ident),* $(,)?) => {
        impl ThemeColors {
            $(
                pub fn $field(&self) -> Color {
                    parse_color(&self.$field)
                }
            )*
        }
    };
}

color_accessors!(
    bg,
    fg,
    text_dim,
    accent,
    border,
    border_focused,
    header_bg,
    header_fg,
    timer,
    error,
    success,
);

impl ThemeColors {
    /// Panel colour for a question. Both marked states share a colour; the
    /// panel adds a tick to answered ones.
    pub fn status(&self, status: QuestionStatus) -> Color {
        let value = match status {
            QuestionStatus::NotVisited => &self.not_visited,
            QuestionStatus::Answered => &self.answered,
            QuestionStatus::Marked | QuestionStatus::MarkedAnswered => &self.marked,
        };
        parse_color(value)
    }
}
