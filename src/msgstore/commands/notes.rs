//! Inline notes: the plain-text list each directory record carries.
//!
//! These are separate from the message records in the message store and are
//! never reconciled with them. A directory's `message_count` counts these.

use crate::commands::helpers::preview;
use crate::commands::{CmdResult, Notice};
use crate::error::{MsgStoreError, Result};
use crate::model::DirectoryId;
use crate::store::DirectoryStore;

pub fn add<S: DirectoryStore>(store: &mut S, id: &DirectoryId, text: String) -> Result<CmdResult> {
    let shown = preview(&text, 40);
    let updated = store.add_message(id, text)?;
    let notice = Notice::success(format!("Note added to {}: {}", updated.name, shown));
    Ok(CmdResult::default()
        .with_directory(updated)
        .with_notice(notice))
}

/// Removes the note at a zero-based `index`.
///
/// The index is signed so that negative input is reported as out of range
/// rather than failing to parse. A missing directory is reported first.
pub fn remove<S: DirectoryStore>(store: &mut S, id: &DirectoryId, index: i64) -> Result<CmdResult> {
    let position = match usize::try_from(index) {
        Ok(position) => position,
        Err(_) => {
            let current = store.get(id)?;
            return Err(MsgStoreError::IndexOutOfRange {
                index,
                len: current.message_count,
            });
        }
    };

    let removed_text = store
        .get(id)?
        .messages
        .get(position)
        .map(|text| preview(text, 40));
    let updated = store.remove_message(id, position)?;

    let mut result = CmdResult::default();
    if let Some(text) = removed_text {
        result.add_notice(Notice::success(format!(
            "Note removed from {}: {}",
            updated.name, text
        )));
    }
    Ok(result.with_directory(updated))
}
