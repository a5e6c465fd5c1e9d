use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh random id. Unique even for creates issued in the same instant.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a directory.
    DirectoryId
);
string_id!(
    /// Stable identifier of a message, unique within its directory.
    MessageId
);

/// A folder of notes as the directory store keeps it.
///
/// `messages` is the inline note list. It is independent of the message
/// store's records and is only changed through `add_message`/`remove_message`
/// or a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub id: DirectoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub messages: Vec<String>,
}

impl Directory {
    pub fn new(name: String) -> Self {
        Self {
            id: DirectoryId::generate(),
            name,
            created_at: Utc::now(),
            is_favorite: false,
            messages: Vec::new(),
        }
    }

    /// Builds a directory with a known id, for seeding and fixtures.
    pub fn with_id(id: impl Into<DirectoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: Utc::now(),
            is_favorite: false,
            messages: Vec::new(),
        }
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages = notes.into_iter().map(Into::into).collect();
        self
    }

    pub fn summary(&self) -> DirectorySummary {
        DirectorySummary::from(self)
    }
}

/// What every directory store response carries: an owned copy of the record
/// plus the derived `message_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    pub id: DirectoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub messages: Vec<String>,
    pub message_count: usize,
}

impl From<&Directory> for DirectorySummary {
    fn from(dir: &Directory) -> Self {
        Self {
            id: dir.id.clone(),
            name: dir.name.clone(),
            created_at: dir.created_at,
            is_favorite: dir.is_favorite,
            messages: dir.messages.clone(),
            message_count: dir.messages.len(),
        }
    }
}

impl From<Directory> for DirectorySummary {
    fn from(dir: Directory) -> Self {
        let message_count = dir.messages.len();
        Self {
            id: dir.id,
            name: dir.name,
            created_at: dir.created_at,
            is_favorite: dir.is_favorite,
            messages: dir.messages,
            message_count,
        }
    }
}

/// Partial update for a directory. Fields left as `None` are untouched.
///
/// `id` and `created_at` are immutable and have no counterpart here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPatch {
    pub name: Option<String>,
    pub is_favorite: Option<bool>,
    pub messages: Option<Vec<String>>,
}

impl DirectoryPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_favorite.is_none() && self.messages.is_none()
    }

    pub(crate) fn apply(self, dir: &mut Directory) {
        if let Some(name) = self.name {
            dir.name = name;
        }
        if let Some(is_favorite) = self.is_favorite {
            dir.is_favorite = is_favorite;
        }
        if let Some(messages) = self.messages {
            dir.messages = messages;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    // Display-only; nothing in the stores sets it.
    #[serde(default)]
    pub important: bool,
}

impl Message {
    pub fn new(text: String) -> Self {
        Self {
            id: MessageId::generate(),
            text,
            created_at: Utc::now(),
            important: false,
        }
    }

    pub fn with_id(id: impl Into<MessageId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            created_at: Utc::now(),
            important: false,
        }
    }
}
