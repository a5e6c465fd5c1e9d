//! Named styles for the terminal client.
//!
//! Templates only ever refer to the semantic names in [`names`]; what each
//! name looks like is decided here.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const INDEX: &str = "index";
    pub const NAME: &str = "name";
    pub const FAVORITE: &str = "favorite";
    pub const IMPORTANT: &str = "important";
    pub const COUNT: &str = "count";
    pub const TIME: &str = "time";
    pub const PROMPT: &str = "prompt";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// Prepended to text whose style name is not in the theme.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A registry of named styles.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Styles `text` by name. Without color the text passes through, but an
    /// unknown name is still flagged so template typos stay visible.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

fn dim_gray() -> Style {
    Style::new().color256(246)
}

pub static MSGSTORE_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::TITLE, Style::new().bold().green())
        .add(names::MUTED, dim_gray())
        .add(names::INDEX, Style::new().yellow())
        .add(names::NAME, Style::new())
        .add(names::FAVORITE, Style::new().yellow().bold())
        .add(names::IMPORTANT, Style::new().red().bold())
        .add(names::COUNT, Style::new().cyan())
        .add(names::TIME, dim_gray().italic())
        .add(names::PROMPT, Style::new().green().bold())
        .add(names::INFO, dim_gray())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});
