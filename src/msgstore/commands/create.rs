use crate::commands::helpers::preview;
use crate::commands::{CmdResult, Notice};
use crate::error::Result;
use crate::model::DirectoryId;
use crate::store::{DirectoryStore, MessageStore};

pub fn directory<S: DirectoryStore>(store: &mut S, name: String) -> Result<CmdResult> {
    let created = store.create(name)?;
    let notice = Notice::success(format!("Directory created: {}", created.name));
    Ok(CmdResult::default()
        .with_directory(created)
        .with_notice(notice))
}

/// Adds a message record to an existing directory.
///
/// The message store would happily open a partition for any id, so the
/// directory's existence is checked here first.
pub fn message<D: DirectoryStore, M: MessageStore>(
    directories: &D,
    messages: &mut M,
    directory_id: &DirectoryId,
    text: String,
) -> Result<CmdResult> {
    let owner = directories.get(directory_id)?;
    let created = messages.create(directory_id, text)?;
    let notice = Notice::success(format!(
        "Message added to {}: {}",
        owner.name,
        preview(&created.text, 40)
    ));
    Ok(CmdResult::default()
        .with_message(created)
        .with_notice(notice))
}
