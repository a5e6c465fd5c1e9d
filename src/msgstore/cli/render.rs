//! # Rendering
//!
//! Turns screen state into terminal text with minijinja templates and the
//! `style` filter backed by [`MSGSTORE_THEME`].
//!
//! Layout math (widths, truncation, padding) stays in Rust because it needs
//! Unicode-aware measuring. Templates only pick styles and join the pieces.
//! Every public function has an `_internal` twin taking `use_color` so tests
//! can force plain output.

use super::styles::{names, Theme, MSGSTORE_THEME};
use super::templates::{
    DIRECTORY_LIST_TEMPLATE, MESSAGE_LIST_TEMPLATE, NOTES_TEMPLATE, NOTICES_TEMPLATE,
    PROMPT_TEMPLATE,
};
use chrono::{DateTime, Utc};
use console::Term;
use minijinja::{Environment, Value};
use msgstore::api::{Notice, NoticeLevel};
use msgstore::index::index_items;
use msgstore::model::DirectorySummary;
use msgstore::screens::{DirectoryScreen, MessageScreen};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 80;
pub const TIME_WIDTH: usize = 14;
pub const COUNT_WIDTH: usize = 10;
pub const FAVORITE_MARKER: &str = "★";

#[derive(Serialize)]
struct DirectoryRow {
    index: String,
    marker: String,
    name: String,
    padding: String,
    count: String,
    time_ago: String,
}

#[derive(Serialize)]
struct DirectoryListData {
    title: String,
    filter_label: String,
    rows: Vec<DirectoryRow>,
    empty: bool,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageRow {
    index: String,
    important: bool,
    text: String,
    padding: String,
    date: String,
}

#[derive(Serialize)]
struct MessageListData {
    title: String,
    rows: Vec<MessageRow>,
    empty: bool,
    empty_message: String,
}

#[derive(Serialize)]
struct NoteLine {
    index: String,
    text: String,
}

#[derive(Serialize)]
struct NotesData {
    title: String,
    notes: Vec<NoteLine>,
    empty: bool,
    empty_message: String,
}

#[derive(Serialize)]
struct NoticeData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct NoticesData {
    notices: Vec<NoticeData>,
}

#[derive(Serialize)]
struct PromptData<'a> {
    label: &'a str,
}

/// An environment whose `style` filter applies the theme. `None` asks the
/// terminal whether it supports color.
fn environment(use_color: Option<bool>) -> Environment<'static> {
    let use_color = use_color.unwrap_or_else(|| Term::stdout().features().colors_supported());
    let theme: &'static Theme = &MSGSTORE_THEME;

    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
    env
}

fn render_template<T: Serialize>(
    template: &'static str,
    data: &T,
    use_color: Option<bool>,
) -> Result<String, minijinja::Error> {
    let mut env = environment(use_color);
    env.add_template("_inline", template)?;
    env.get_template("_inline")?.render(data)
}

fn render_styled<T: Serialize>(template: &'static str, data: &T, use_color: Option<bool>) -> String {
    render_template(template, data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_directory_screen(screen: &DirectoryScreen, use_color: Option<bool>) -> String {
    render_directory_screen_internal(screen, Utc::now(), use_color)
}

fn render_directory_screen_internal(
    screen: &DirectoryScreen,
    now: DateTime<Utc>,
    use_color: Option<bool>,
) -> String {
    let visible = screen.visible();
    let rows = index_items(visible.iter().copied())
        .into_iter()
        .map(|row| {
            let index = format!("{}. ", row.index);
            let marker = if row.item.is_favorite {
                FAVORITE_MARKER.to_string()
            } else {
                " ".to_string()
            };
            let fixed = 2 + index.width() + marker.width() + 1 + COUNT_WIDTH + 2 + TIME_WIDTH;
            let available = LINE_WIDTH.saturating_sub(fixed);
            let name = truncate_to_width(&row.item.name, available);
            let padding = " ".repeat(available.saturating_sub(name.width()));

            DirectoryRow {
                index,
                marker,
                name,
                padding,
                count: format!("{:>width$}", note_count(row.item.message_count), width = COUNT_WIDTH),
                time_ago: format_time_ago(row.item.created_at, now),
            }
        })
        .collect::<Vec<_>>();

    let mut labels = Vec::new();
    if let Some(query) = screen.query() {
        labels.push(format!("filter: \"{}\"", query));
    }
    if screen.favorites_only() {
        labels.push("favorites only".to_string());
    }

    let empty_message = if screen.all().is_empty() {
        "No directories yet. Create one with `new`."
    } else {
        "No directories match."
    };

    let data = DirectoryListData {
        title: "Directories".to_string(),
        filter_label: labels.join(", "),
        empty: rows.is_empty(),
        rows,
        empty_message: empty_message.to_string(),
    };
    render_styled(DIRECTORY_LIST_TEMPLATE, &data, use_color)
}

pub fn render_message_screen(
    screen: &MessageScreen,
    date_format: &str,
    use_color: Option<bool>,
) -> String {
    let rows = index_items(screen.visible())
        .into_iter()
        .map(|row| {
            let index = format!("{}. ", row.index);
            let date = row.item.created_at.format(date_format).to_string();
            let fixed = 2 + index.width() + 2 + 2 + date.width();
            let available = LINE_WIDTH.saturating_sub(fixed);
            let text = truncate_to_width(&single_line(&row.item.text), available);
            let padding = " ".repeat(available.saturating_sub(text.width()) + 2);

            MessageRow {
                index,
                important: row.item.important,
                text,
                padding,
                date,
            }
        })
        .collect::<Vec<_>>();

    let data = MessageListData {
        title: screen.directory_name().to_string(),
        empty: rows.is_empty(),
        rows,
        empty_message: "No messages yet. Add one with `new`.".to_string(),
    };
    render_styled(MESSAGE_LIST_TEMPLATE, &data, use_color)
}

/// Renders a directory's inline notes, numbered from 1.
pub fn render_notes(directory: &DirectorySummary, use_color: Option<bool>) -> String {
    let notes = index_items(directory.messages.iter())
        .into_iter()
        .map(|note| NoteLine {
            index: format!("{}. ", note.index),
            text: single_line(note.item),
        })
        .collect::<Vec<_>>();

    let data = NotesData {
        title: format!("Notes in {}", directory.name),
        empty: notes.is_empty(),
        notes,
        empty_message: "No notes.".to_string(),
    };
    render_styled(NOTES_TEMPLATE, &data, use_color)
}

pub fn render_notices(notices: &[Notice], use_color: Option<bool>) -> String {
    if notices.is_empty() {
        return String::new();
    }

    let data = NoticesData {
        notices: notices
            .iter()
            .map(|notice| NoticeData {
                content: notice.content.clone(),
                style: notice_style(notice.level).to_string(),
            })
            .collect(),
    };

    render_template(NOTICES_TEMPLATE, &data, use_color)
        .unwrap_or_else(|_| notices.iter().map(|n| format!("{}\n", n.content)).collect())
}

pub fn render_prompt(label: &str, use_color: Option<bool>) -> String {
    render_styled(PROMPT_TEMPLATE, &PromptData { label }, use_color)
}

fn notice_style(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => names::INFO,
        NoticeLevel::Success => names::SUCCESS,
        NoticeLevel::Warning => names::WARNING,
        NoticeLevel::Error => names::ERROR,
    }
}

fn note_count(count: usize) -> String {
    match count {
        1 => "1 note".to_string(),
        n => format!("{} notes", n),
    }
}

fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
