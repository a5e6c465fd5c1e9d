use super::{absorb, validate, Dialog, DialogOutcome, Submission};
use crate::api::{DirectoryFilter, MsgStoreApi};
use crate::commands::Notice;
use crate::error::{MsgStoreError, Result};
use crate::index::{self, DisplayIndex};
use crate::model::{DirectoryId, DirectorySummary};
use crate::store::{DirectoryStore, MessageStore};
use tracing::debug;

const NAME_FIELD: &str = "Directory name";

/// Controller for the directory list.
///
/// Holds the full collection as last fetched. The name filter and the
/// favorites toggle are applied on read by [`visible`](Self::visible) and
/// never reach the store.
#[derive(Debug, Default)]
pub struct DirectoryScreen {
    directories: Vec<DirectorySummary>,
    filter: DirectoryFilter,
    dialog: Dialog<DirectoryId>,
    notices: Vec<Notice>,
}

impl DirectoryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the collection for the first time.
    pub fn mount<D: DirectoryStore, M: MessageStore>(&mut self, api: &MsgStoreApi<D, M>) {
        self.refresh(api);
    }

    /// Re-fetches the whole collection. The filter stays in place.
    pub fn refresh<D: DirectoryStore, M: MessageStore>(&mut self, api: &MsgStoreApi<D, M>) {
        match api.list_directories(&DirectoryFilter::default()) {
            Ok(result) => {
                debug!(count = result.directories.len(), "directory screen refreshed");
                self.directories = result.directories;
            }
            Err(err) => self.notices.push(Notice::error(err.to_string())),
        }
    }

    /// Every directory as last fetched, ignoring the filter.
    pub fn all(&self) -> &[DirectorySummary] {
        &self.directories
    }

    /// Directories that pass the current filter, in store order.
    pub fn visible(&self) -> Vec<&DirectorySummary> {
        self.directories
            .iter()
            .filter(|dir| self.filter.matches(&dir.name, dir.is_favorite))
            .collect()
    }

    /// The id behind a row number of the visible list.
    pub fn resolve(&self, index: DisplayIndex) -> Result<DirectoryId> {
        index::select(&self.visible(), index)
            .map(|dir| dir.id.clone())
            .ok_or_else(|| MsgStoreError::Api(format!("No directory at row {}", index)))
    }

    pub fn get(&self, id: &DirectoryId) -> Option<&DirectorySummary> {
        self.directories.iter().find(|dir| &dir.id == id)
    }

    // --- Filtering ---

    pub fn query(&self) -> Option<&str> {
        self.filter.query.as_deref()
    }

    /// Sets the name filter. An empty query clears it.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.filter.query = if query.is_empty() { None } else { Some(query) };
    }

    pub fn clear_query(&mut self) {
        self.filter.query = None;
    }

    pub fn favorites_only(&self) -> bool {
        self.filter.favorites_only
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.filter.favorites_only = favorites_only;
    }

    // --- Dialogs ---

    pub fn dialog(&self) -> &Dialog<DirectoryId> {
        &self.dialog
    }

    pub fn open_create(&mut self) {
        debug!("create directory dialog opened");
        self.dialog = Dialog::Creating {
            input: String::new(),
        };
    }

    /// Opens the edit dialog prefilled with the directory's name.
    /// Returns false, with a warning notice, if the directory is not on screen.
    pub fn open_edit(&mut self, id: &DirectoryId) -> bool {
        let Some(dir) = self.get(id) else {
            self.notices
                .push(Notice::warning(format!("Directory {} is not on screen", id)));
            return false;
        };
        debug!(%id, "edit directory dialog opened");
        self.dialog = Dialog::Editing {
            id: id.clone(),
            input: dir.name.clone(),
        };
        true
    }

    /// Opens the delete confirmation. Returns false if the directory is not on screen.
    pub fn open_delete(&mut self, id: &DirectoryId) -> bool {
        if self.get(id).is_none() {
            self.notices
                .push(Notice::warning(format!("Directory {} is not on screen", id)));
            return false;
        }
        debug!(%id, "delete directory dialog opened");
        self.dialog = Dialog::ConfirmingDelete { id: id.clone() };
        true
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        self.dialog.set_input(text)
    }

    pub fn cancel(&mut self) {
        self.dialog.close();
    }

    /// Confirms the open dialog: validate, mutate, close, re-fetch.
    pub fn confirm<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
    ) -> DialogOutcome {
        let submission = match validate(&self.dialog, NAME_FIELD, &mut self.notices) {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };

        let result = match submission {
            Submission::Create(name) => api.create_directory(name),
            Submission::Edit(id, name) => api.rename_directory(&id, name),
            Submission::Delete(id) => api.delete_directory(&id),
        };

        self.dialog.close();
        let outcome = absorb(result, &mut self.notices);
        self.refresh(api);
        outcome
    }

    // --- Direct actions ---

    pub fn toggle_favorite<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
        id: &DirectoryId,
    ) -> DialogOutcome {
        let outcome = absorb(api.toggle_favorite(id), &mut self.notices);
        self.refresh(api);
        outcome
    }

    pub fn add_note<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
        id: &DirectoryId,
        text: String,
    ) -> DialogOutcome {
        let outcome = absorb(api.add_note(id, text), &mut self.notices);
        self.refresh(api);
        outcome
    }

    pub fn remove_note<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
        id: &DirectoryId,
        index: i64,
    ) -> DialogOutcome {
        let outcome = absorb(api.remove_note(id, index), &mut self.notices);
        self.refresh(api);
        outcome
    }

    // --- Notices ---

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands pending notices to the UI and clears them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
