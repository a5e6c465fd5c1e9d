use super::{absorb, validate, Dialog, DialogOutcome, Submission};
use crate::api::MsgStoreApi;
use crate::commands::Notice;
use crate::error::{MsgStoreError, Result};
use crate::index::{self, DisplayIndex};
use crate::model::{DirectoryId, DirectorySummary, Message, MessageId};
use crate::store::{DirectoryStore, MessageStore};
use tracing::debug;

const TEXT_FIELD: &str = "Message text";

/// Controller for the messages of one directory.
#[derive(Debug)]
pub struct MessageScreen {
    directory_id: DirectoryId,
    directory_name: String,
    messages: Vec<Message>,
    dialog: Dialog<MessageId>,
    notices: Vec<Notice>,
}

impl MessageScreen {
    /// A screen bound to `directory`. Nothing is fetched until [`mount`](Self::mount).
    pub fn for_directory(directory: &DirectorySummary) -> Self {
        Self {
            directory_id: directory.id.clone(),
            directory_name: directory.name.clone(),
            messages: Vec::new(),
            dialog: Dialog::Idle,
            notices: Vec::new(),
        }
    }

    pub fn directory_id(&self) -> &DirectoryId {
        &self.directory_id
    }

    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    pub fn mount<D: DirectoryStore, M: MessageStore>(&mut self, api: &MsgStoreApi<D, M>) {
        self.refresh(api);
    }

    pub fn refresh<D: DirectoryStore, M: MessageStore>(&mut self, api: &MsgStoreApi<D, M>) {
        match api.list_messages(&self.directory_id) {
            Ok(result) => {
                debug!(
                    directory = %self.directory_id,
                    count = result.messages.len(),
                    "message screen refreshed"
                );
                self.messages = result.messages;
            }
            Err(err) => self.notices.push(Notice::error(err.to_string())),
        }
    }

    pub fn visible(&self) -> &[Message] {
        &self.messages
    }

    pub fn resolve(&self, index: DisplayIndex) -> Result<MessageId> {
        index::select(&self.messages, index)
            .map(|msg| msg.id.clone())
            .ok_or_else(|| MsgStoreError::Api(format!("No message at row {}", index)))
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|msg| &msg.id == id)
    }

    // --- Dialogs ---

    pub fn dialog(&self) -> &Dialog<MessageId> {
        &self.dialog
    }

    pub fn open_create(&mut self) {
        debug!(directory = %self.directory_id, "create message dialog opened");
        self.dialog = Dialog::Creating {
            input: String::new(),
        };
    }

    /// Opens the edit dialog prefilled with the message text.
    pub fn open_edit(&mut self, id: &MessageId) -> bool {
        let Some(message) = self.get(id) else {
            self.notices
                .push(Notice::warning(format!("Message {} is not on screen", id)));
            return false;
        };
        self.dialog = Dialog::Editing {
            id: id.clone(),
            input: message.text.clone(),
        };
        true
    }

    pub fn open_delete(&mut self, id: &MessageId) -> bool {
        if self.get(id).is_none() {
            self.notices
                .push(Notice::warning(format!("Message {} is not on screen", id)));
            return false;
        }
        self.dialog = Dialog::ConfirmingDelete { id: id.clone() };
        true
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        self.dialog.set_input(text)
    }

    pub fn cancel(&mut self) {
        self.dialog.close();
    }

    pub fn confirm<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
    ) -> DialogOutcome {
        let submission = match validate(&self.dialog, TEXT_FIELD, &mut self.notices) {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };

        let dir = &self.directory_id;
        let result = match submission {
            Submission::Create(text) => api.create_message(dir, text),
            Submission::Edit(id, text) => api.update_message(dir, &id, text),
            Submission::Delete(id) => api.delete_message(dir, &id),
        };

        self.dialog.close();
        let outcome = absorb(result, &mut self.notices);
        self.refresh(api);
        outcome
    }

    // --- Notices ---

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryApi;
    use crate::commands::NoticeLevel;

    fn mounted(directory: &str) -> (InMemoryApi, MessageScreen) {
        let api = InMemoryApi::with_sample_data();
        let dir = api.get_directory(&directory.into()).unwrap().directories[0].clone();
        let mut screen = MessageScreen::for_directory(&dir);
        screen.mount(&api);
        (api, screen)
    }

    fn texts(screen: &MessageScreen) -> Vec<String> {
        screen.visible().iter().map(|m| m.text.clone()).collect()
    }

    fn row(n: usize) -> DisplayIndex {
        DisplayIndex::new(n).unwrap()
    }

    #[test]
    fn mount_lists_partition() {
        let (_, screen) = mounted("1");
        assert_eq!(screen.directory_name(), "Work");
        assert_eq!(texts(&screen), ["Complete project", "Meeting at 3 PM"]);
    }

    #[test]
    fn directory_without_messages_is_empty() {
        let (_, screen) = mounted("4");
        assert!(screen.visible().is_empty());
        assert!(screen.notices().is_empty());
    }

    #[test]
    fn create_appends_and_refetches() {
        let (mut api, mut screen) = mounted("4");
        screen.open_create();
        screen.set_input("buy milk");
        assert_eq!(screen.confirm(&mut api), DialogOutcome::Applied);
        assert_eq!(texts(&screen), ["buy milk"]);
        assert!(!screen.visible()[0].important);
    }

    #[test]
    fn blank_message_is_rejected() {
        let (mut api, mut screen) = mounted("1");
        screen.open_create();
        assert!(matches!(
            screen.confirm(&mut api),
            DialogOutcome::Rejected(_)
        ));
        assert!(screen.dialog().is_open());
        assert_eq!(screen.visible().len(), 2);
    }

    #[test]
    fn edit_keeps_identity() {
        let (mut api, mut screen) = mounted("1");
        let id = screen.resolve(row(2)).unwrap();
        let created_at = screen.get(&id).unwrap().created_at;

        assert!(screen.open_edit(&id));
        assert_eq!(screen.dialog().input(), Some("Meeting at 3 PM"));
        screen.set_input("Meeting at 4 PM");
        assert_eq!(screen.confirm(&mut api), DialogOutcome::Applied);

        let edited = screen.get(&id).unwrap();
        assert_eq!(edited.text, "Meeting at 4 PM");
        assert_eq!(edited.created_at, created_at);
        assert_eq!(screen.visible()[1].id, id);
    }

    #[test]
    fn delete_after_confirmation() {
        let (mut api, mut screen) = mounted("2");
        let id = screen.resolve(row(1)).unwrap();
        screen.open_delete(&id);
        assert_eq!(screen.confirm(&mut api), DialogOutcome::Applied);
        assert!(screen.visible().is_empty());
    }

    #[test]
    fn deleted_directory_turns_create_into_error() {
        let (mut api, mut screen) = mounted("3");
        api.delete_directory(&"3".into()).unwrap();

        screen.open_create();
        screen.set_input("orphan");
        assert_eq!(screen.confirm(&mut api), DialogOutcome::Failed);

        let notices = screen.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(screen.visible().is_empty());
    }

    #[test]
    fn row_out_of_range() {
        let (_, screen) = mounted("2");
        assert!(screen.resolve(row(2)).is_err());
    }
}
