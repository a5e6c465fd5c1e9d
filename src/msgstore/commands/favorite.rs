use crate::commands::{CmdResult, Notice};
use crate::error::Result;
use crate::model::DirectoryId;
use crate::store::DirectoryStore;

pub fn toggle<S: DirectoryStore>(store: &mut S, id: &DirectoryId) -> Result<CmdResult> {
    let updated = store.toggle_favorite(id)?;
    let verb = if updated.is_favorite {
        "marked as favorite"
    } else {
        "removed from favorites"
    };
    let notice = Notice::success(format!("Directory {}: {}", verb, updated.name));
    Ok(CmdResult::default()
        .with_directory(updated)
        .with_notice(notice))
}
