use crate::commands::helpers::preview;
use crate::commands::{CmdResult, Notice};
use crate::error::Result;
use crate::model::{DirectoryId, MessageId};
use crate::store::{DirectoryStore, MessageStore};

/// Deletes a directory together with its message records.
pub fn directory<D: DirectoryStore, M: MessageStore>(
    directories: &mut D,
    messages: &mut M,
    id: &DirectoryId,
) -> Result<CmdResult> {
    let removed = directories.delete(id)?;
    let dropped = messages.remove_partition(id)?;

    let mut result = CmdResult::default();
    result.add_notice(Notice::success(format!(
        "Directory deleted: {}",
        removed.name
    )));
    if dropped > 0 {
        result.add_notice(Notice::info(format!(
            "{} message{} removed with it",
            dropped,
            if dropped == 1 { "" } else { "s" }
        )));
    }
    Ok(result.with_directory(removed))
}

pub fn message<S: MessageStore>(
    store: &mut S,
    directory_id: &DirectoryId,
    message_id: &MessageId,
) -> Result<CmdResult> {
    let removed = store.delete(directory_id, message_id)?;
    let notice = Notice::success(format!("Message deleted: {}", preview(&removed.text, 40)));
    Ok(CmdResult::default()
        .with_message(removed)
        .with_notice(notice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MsgStoreError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deleting_directory_drops_its_messages() {
        let mut fixture = StoreFixture::sample();
        let id = DirectoryId::from("1");
        let result = directory(&mut fixture.directories, &mut fixture.messages, &id).unwrap();

        assert_eq!(result.directories[0].name, "Work");
        assert_eq!(result.notices.len(), 2);
        assert_eq!(result.notices[1].content, "2 messages removed with it");
        assert!(fixture.messages.get_all(&id).unwrap().is_empty());
        assert!(fixture.directories.get(&id).is_err());
    }

    #[test]
    fn deleting_directory_without_messages_has_one_notice() {
        let mut fixture = StoreFixture::sample();
        let result =
            directory(&mut fixture.directories, &mut fixture.messages, &"4".into()).unwrap();
        assert_eq!(result.notices.len(), 1);
    }

    #[test]
    fn deleting_missing_directory_leaves_messages_alone() {
        let mut fixture = StoreFixture::new().with_message("orphan", "1", "kept");
        let id = DirectoryId::from("orphan");
        let err = directory(&mut fixture.directories, &mut fixture.messages, &id).unwrap_err();
        assert!(matches!(err, MsgStoreError::DirectoryNotFound(_)));
        assert_eq!(fixture.messages.get_all(&id).unwrap().len(), 1);
    }

    #[test]
    fn deletes_message() {
        let mut fixture = StoreFixture::sample();
        let dir = DirectoryId::from("1");
        let result = message(&mut fixture.messages, &dir, &"102".into()).unwrap();
        assert_eq!(result.messages[0].text, "Meeting at 3 PM");
        assert_eq!(fixture.messages.get_all(&dir).unwrap().len(), 1);
    }
}
