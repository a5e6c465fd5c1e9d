//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** both stores, so a caller builds one value and passes it around
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O and no formatting.
//!
//! ## Generic Over Storage
//!
//! `MsgStoreApi<D: DirectoryStore, M: MessageStore>` is generic over both
//! backends. Every caller in this crate uses the in-memory pair; a real
//! persistence layer implementing the two traits slots in unchanged.

use crate::commands;
use crate::error::Result;
use crate::model::{DirectoryId, DirectoryPatch, MessageId};
use crate::store::memory::{InMemoryDirectoryStore, InMemoryMessageStore};
use crate::store::{DirectoryStore, MessageStore};

/// The main API facade.
pub struct MsgStoreApi<D: DirectoryStore, M: MessageStore> {
    directories: D,
    messages: M,
}

/// The API over process-lifetime storage.
pub type InMemoryApi = MsgStoreApi<InMemoryDirectoryStore, InMemoryMessageStore>;

impl InMemoryApi {
    /// Empty stores.
    pub fn in_memory() -> Self {
        Self::new(InMemoryDirectoryStore::new(), InMemoryMessageStore::new())
    }

    /// Stores pre-filled with the sample folders and messages.
    pub fn with_sample_data() -> Self {
        Self::new(
            InMemoryDirectoryStore::with_sample_data(),
            InMemoryMessageStore::with_sample_data(),
        )
    }
}

impl<D: DirectoryStore, M: MessageStore> MsgStoreApi<D, M> {
    pub fn new(directories: D, messages: M) -> Self {
        Self {
            directories,
            messages,
        }
    }

    // --- Directories ---

    pub fn list_directories(&self, filter: &DirectoryFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.directories, filter)
    }

    pub fn favorite_directories(&self) -> Result<commands::CmdResult> {
        commands::list::favorites(&self.directories)
    }

    pub fn get_directory(&self, id: &DirectoryId) -> Result<commands::CmdResult> {
        let dir = self.directories.get(id)?;
        Ok(commands::CmdResult::default().with_directory(dir))
    }

    pub fn create_directory(&mut self, name: String) -> Result<commands::CmdResult> {
        commands::create::directory(&mut self.directories, name)
    }

    pub fn update_directory(
        &mut self,
        id: &DirectoryId,
        patch: DirectoryPatch,
    ) -> Result<commands::CmdResult> {
        commands::update::directory(&mut self.directories, id, patch)
    }

    pub fn rename_directory(
        &mut self,
        id: &DirectoryId,
        name: String,
    ) -> Result<commands::CmdResult> {
        self.update_directory(id, DirectoryPatch::name(name))
    }

    pub fn delete_directory(&mut self, id: &DirectoryId) -> Result<commands::CmdResult> {
        commands::delete::directory(&mut self.directories, &mut self.messages, id)
    }

    pub fn toggle_favorite(&mut self, id: &DirectoryId) -> Result<commands::CmdResult> {
        commands::favorite::toggle(&mut self.directories, id)
    }

    // --- Inline notes ---

    pub fn add_note(&mut self, id: &DirectoryId, text: String) -> Result<commands::CmdResult> {
        commands::notes::add(&mut self.directories, id, text)
    }

    pub fn remove_note(&mut self, id: &DirectoryId, index: i64) -> Result<commands::CmdResult> {
        commands::notes::remove(&mut self.directories, id, index)
    }

    // --- Messages ---

    pub fn list_messages(&self, directory_id: &DirectoryId) -> Result<commands::CmdResult> {
        commands::messages::list(&self.messages, directory_id)
    }

    pub fn create_message(
        &mut self,
        directory_id: &DirectoryId,
        text: String,
    ) -> Result<commands::CmdResult> {
        commands::create::message(&self.directories, &mut self.messages, directory_id, text)
    }

    pub fn update_message(
        &mut self,
        directory_id: &DirectoryId,
        message_id: &MessageId,
        text: String,
    ) -> Result<commands::CmdResult> {
        commands::update::message(&mut self.messages, directory_id, message_id, text)
    }

    pub fn delete_message(
        &mut self,
        directory_id: &DirectoryId,
        message_id: &MessageId,
    ) -> Result<commands::CmdResult> {
        commands::delete::message(&mut self.messages, directory_id, message_id)
    }
}

pub use commands::list::DirectoryFilter;
pub use commands::{CmdResult, Notice, NoticeLevel};
