use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::DirectoryId;
use crate::store::MessageStore;

pub fn list<S: MessageStore>(store: &S, directory_id: &DirectoryId) -> Result<CmdResult> {
    Ok(CmdResult::default().with_messages(store.get_all(directory_id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryMessageStore;

    #[test]
    fn lists_partition_in_order() {
        let store = InMemoryMessageStore::with_sample_data();
        let result = list(&store, &"1".into()).unwrap();
        let texts: Vec<_> = result.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["Complete project", "Meeting at 3 PM"]);
    }

    #[test]
    fn unknown_directory_lists_nothing() {
        let store = InMemoryMessageStore::with_sample_data();
        assert!(list(&store, &"3".into()).unwrap().messages.is_empty());
    }
}
