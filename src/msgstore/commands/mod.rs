//! # Command Layer
//!
//! Business operations over the store traits. Each function takes the stores
//! it needs as arguments and returns a [`CmdResult`]: the records touched or
//! listed plus human-readable [`Notice`]s describing what happened.
//!
//! Commands never print. Turning notices into terminal output is the CLI's job.

use crate::model::{DirectorySummary, Message};

pub mod create;
pub mod delete;
pub mod favorite;
pub mod helpers;
pub mod list;
pub mod messages;
pub mod notes;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub content: String,
}

impl Notice {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub directories: Vec<DirectorySummary>,
    pub messages: Vec<Message>,
    pub notices: Vec<Notice>,
}

impl CmdResult {
    pub fn add_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn with_directories(mut self, directories: Vec<DirectorySummary>) -> Self {
        self.directories = directories;
        self
    }

    pub fn with_directory(mut self, directory: DirectorySummary) -> Self {
        self.directories.push(directory);
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}
