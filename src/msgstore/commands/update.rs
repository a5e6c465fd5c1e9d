use crate::commands::helpers::preview;
use crate::commands::{CmdResult, Notice};
use crate::error::Result;
use crate::model::{DirectoryId, DirectoryPatch, MessageId};
use crate::store::{DirectoryStore, MessageStore};

pub fn directory<S: DirectoryStore>(
    store: &mut S,
    id: &DirectoryId,
    patch: DirectoryPatch,
) -> Result<CmdResult> {
    if patch.is_empty() {
        let current = store.get(id)?;
        return Ok(CmdResult::default()
            .with_directory(current)
            .with_notice(Notice::info("Nothing to update")));
    }

    let updated = store.update(id, patch)?;
    let notice = Notice::success(format!("Directory updated: {}", updated.name));
    Ok(CmdResult::default()
        .with_directory(updated)
        .with_notice(notice))
}

pub fn message<S: MessageStore>(
    store: &mut S,
    directory_id: &DirectoryId,
    message_id: &MessageId,
    text: String,
) -> Result<CmdResult> {
    let updated = store.update(directory_id, message_id, text)?;
    let notice = Notice::success(format!("Message updated: {}", preview(&updated.text, 40)));
    Ok(CmdResult::default()
        .with_message(updated)
        .with_notice(notice))
}
