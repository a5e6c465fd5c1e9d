use super::{DirectoryStore, MessageStore};
use crate::error::{MsgStoreError, Result};
use crate::model::{Directory, DirectoryId, DirectoryPatch, DirectorySummary, Message, MessageId};
use std::collections::HashMap;
use tracing::{debug, trace};

/// In-memory directory storage. Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryStore {
    directories: Vec<Directory>,
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the given records, in order.
    pub fn with_directories(directories: Vec<Directory>) -> Self {
        Self { directories }
    }

    /// The four sample folders the application starts with.
    pub fn with_sample_data() -> Self {
        Self::with_directories(vec![
            Directory::with_id("1", "Work")
                .with_notes(["Meeting at 3 PM", "Project deadline extended"]),
            Directory::with_id("2", "Personal")
                .favorite(true)
                .with_notes(["Buy groceries", "Call mom"]),
            Directory::with_id("3", "Ideas").with_notes(["App idea: AI tutor"]),
            Directory::with_id("4", "Travel"),
        ])
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    fn position(&self, id: &DirectoryId) -> Result<usize> {
        self.directories
            .iter()
            .position(|dir| &dir.id == id)
            .ok_or_else(|| MsgStoreError::DirectoryNotFound(id.clone()))
    }

    fn find_mut(&mut self, id: &DirectoryId) -> Result<&mut Directory> {
        let index = self.position(id)?;
        Ok(&mut self.directories[index])
    }
}

impl DirectoryStore for InMemoryDirectoryStore {
    fn get_all(&self) -> Result<Vec<DirectorySummary>> {
        trace!(count = self.directories.len(), "listing directories");
        Ok(self.directories.iter().map(DirectorySummary::from).collect())
    }

    fn get(&self, id: &DirectoryId) -> Result<DirectorySummary> {
        let index = self.position(id)?;
        Ok(self.directories[index].summary())
    }

    fn create(&mut self, name: String) -> Result<DirectorySummary> {
        let dir = Directory::new(name);
        debug!(id = %dir.id, name = %dir.name, "directory created");
        let summary = dir.summary();
        self.directories.push(dir);
        Ok(summary)
    }

    fn update(&mut self, id: &DirectoryId, patch: DirectoryPatch) -> Result<DirectorySummary> {
        let dir = self.find_mut(id)?;
        patch.apply(dir);
        debug!(%id, "directory updated");
        Ok(dir.summary())
    }

    fn delete(&mut self, id: &DirectoryId) -> Result<DirectorySummary> {
        let index = self.position(id)?;
        let removed = self.directories.remove(index);
        debug!(%id, "directory deleted");
        Ok(removed.into())
    }

    fn toggle_favorite(&mut self, id: &DirectoryId) -> Result<DirectorySummary> {
        let dir = self.find_mut(id)?;
        dir.is_favorite = !dir.is_favorite;
        debug!(%id, is_favorite = dir.is_favorite, "favorite toggled");
        Ok(dir.summary())
    }

    fn get_favorites(&self) -> Result<Vec<DirectorySummary>> {
        Ok(self
            .directories
            .iter()
            .filter(|dir| dir.is_favorite)
            .map(DirectorySummary::from)
            .collect())
    }

    fn add_message(&mut self, id: &DirectoryId, text: String) -> Result<DirectorySummary> {
        let dir = self.find_mut(id)?;
        dir.messages.push(text);
        debug!(%id, count = dir.messages.len(), "inline note added");
        Ok(dir.summary())
    }

    fn remove_message(&mut self, id: &DirectoryId, index: usize) -> Result<DirectorySummary> {
        let dir = self.find_mut(id)?;
        let len = dir.messages.len();
        if index >= len {
            return Err(MsgStoreError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len,
            });
        }
        dir.messages.remove(index);
        debug!(%id, index, "inline note removed");
        Ok(dir.summary())
    }
}

/// In-memory message storage. Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    partitions: HashMap<DirectoryId, Vec<Message>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample messages matching [`InMemoryDirectoryStore::with_sample_data`].
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        store.insert_partition(
            "1".into(),
            vec![
                Message::with_id("101", "Complete project"),
                Message::with_id("102", "Meeting at 3 PM"),
            ],
        );
        store.insert_partition("2".into(), vec![Message::with_id("201", "Buy groceries")]);
        store
    }

    /// Replaces a whole partition. Used for seeding.
    pub fn insert_partition(&mut self, directory_id: DirectoryId, messages: Vec<Message>) {
        self.partitions.insert(directory_id, messages);
    }

    pub fn has_partition(&self, directory_id: &DirectoryId) -> bool {
        self.partitions.contains_key(directory_id)
    }

    fn partition_mut(&mut self, directory_id: &DirectoryId) -> Result<&mut Vec<Message>> {
        self.partitions
            .get_mut(directory_id)
            .ok_or_else(|| MsgStoreError::DirectoryNotFound(directory_id.clone()))
    }
}

fn message_position(messages: &[Message], message_id: &MessageId) -> Result<usize> {
    messages
        .iter()
        .position(|msg| &msg.id == message_id)
        .ok_or_else(|| MsgStoreError::MessageNotFound(message_id.clone()))
}

impl MessageStore for InMemoryMessageStore {
    fn get_all(&self, directory_id: &DirectoryId) -> Result<Vec<Message>> {
        Ok(self
            .partitions
            .get(directory_id)
            .cloned()
            .unwrap_or_default())
    }

    fn create(&mut self, directory_id: &DirectoryId, text: String) -> Result<Message> {
        let message = Message::new(text);
        debug!(directory = %directory_id, id = %message.id, "message created");
        self.partitions
            .entry(directory_id.clone())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    fn update(
        &mut self,
        directory_id: &DirectoryId,
        message_id: &MessageId,
        text: String,
    ) -> Result<Message> {
        let messages = self.partition_mut(directory_id)?;
        let index = message_position(messages, message_id)?;
        messages[index].text = text;
        debug!(directory = %directory_id, id = %message_id, "message updated");
        Ok(messages[index].clone())
    }

    fn delete(&mut self, directory_id: &DirectoryId, message_id: &MessageId) -> Result<Message> {
        let messages = self.partition_mut(directory_id)?;
        let index = message_position(messages, message_id)?;
        debug!(directory = %directory_id, id = %message_id, "message deleted");
        Ok(messages.remove(index))
    }

    fn remove_partition(&mut self, directory_id: &DirectoryId) -> Result<usize> {
        let removed = self
            .partitions
            .remove(directory_id)
            .map(|messages| messages.len())
            .unwrap_or(0);
        debug!(directory = %directory_id, removed, "message partition dropped");
        Ok(removed)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Builds a pair of stores with whatever a test needs.
    pub struct StoreFixture {
        pub directories: InMemoryDirectoryStore,
        pub messages: InMemoryMessageStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                directories: InMemoryDirectoryStore::new(),
                messages: InMemoryMessageStore::new(),
            }
        }

        pub fn sample() -> Self {
            Self {
                directories: InMemoryDirectoryStore::with_sample_data(),
                messages: InMemoryMessageStore::with_sample_data(),
            }
        }

        pub fn with_directory(mut self, id: &str, name: &str) -> Self {
            self.directories
                .directories
                .push(Directory::with_id(id, name));
            self
        }

        pub fn with_favorite(mut self, id: &str, name: &str) -> Self {
            self.directories
                .directories
                .push(Directory::with_id(id, name).favorite(true));
            self
        }

        pub fn with_notes(mut self, id: &str, name: &str, notes: &[&str]) -> Self {
            self.directories
                .directories
                .push(Directory::with_id(id, name).with_notes(notes.iter().copied()));
            self
        }

        pub fn with_message(mut self, directory_id: &str, message_id: &str, text: &str) -> Self {
            self.messages
                .partitions
                .entry(directory_id.into())
                .or_default()
                .push(Message::with_id(message_id, text));
            self
        }
    }
}
