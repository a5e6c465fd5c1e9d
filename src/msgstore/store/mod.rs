//! # Storage Layer
//!
//! Two store contracts back the application:
//!
//! - [`DirectoryStore`]: the ordered collection of directories, their favorite
//!   flag and their inline note lists.
//! - [`MessageStore`]: message records partitioned by owning directory.
//!
//! Any replacement persistence layer (a database, a remote service) is a
//! drop-in substitute as long as it honors these method contracts: same
//! operation, same return shape, same failure kind.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryDirectoryStore`] and [`memory::InMemoryMessageStore`]:
//!   process-lifetime storage. Nothing is persisted; data is lost on exit.
//!
//! ## Snapshot Semantics
//!
//! Reads return owned values. A caller that mutates a returned
//! `DirectorySummary` (including its `messages` vector) never affects the
//! store. Mutators take `&mut self`, which serializes writes per store.

use crate::error::Result;
use crate::model::{DirectoryId, DirectoryPatch, DirectorySummary, Message, MessageId};

pub mod memory;

/// Abstract interface for directory storage.
pub trait DirectoryStore {
    /// All directories in insertion order, each with its `message_count`.
    fn get_all(&self) -> Result<Vec<DirectorySummary>>;

    /// A single directory.
    fn get(&self, id: &DirectoryId) -> Result<DirectorySummary>;

    /// Appends a new, non-favorite directory with no inline notes.
    /// The name is stored as given.
    fn create(&mut self, name: String) -> Result<DirectorySummary>;

    /// Merges the present patch fields into the record, in place.
    fn update(&mut self, id: &DirectoryId, patch: DirectoryPatch) -> Result<DirectorySummary>;

    /// Removes the directory and returns what was removed.
    fn delete(&mut self, id: &DirectoryId) -> Result<DirectorySummary>;

    /// Flips `is_favorite`.
    fn toggle_favorite(&mut self, id: &DirectoryId) -> Result<DirectorySummary>;

    /// Favorite directories, in insertion order.
    fn get_favorites(&self) -> Result<Vec<DirectorySummary>>;

    /// Appends a note to the directory's inline list.
    fn add_message(&mut self, id: &DirectoryId, text: String) -> Result<DirectorySummary>;

    /// Removes the inline note at `index`; later notes shift left.
    ///
    /// Fails with `DirectoryNotFound` before considering the index.
    fn remove_message(&mut self, id: &DirectoryId, index: usize) -> Result<DirectorySummary>;
}

/// Abstract interface for message storage, partitioned by directory.
pub trait MessageStore {
    /// The partition's messages in insertion order; empty when the
    /// partition does not exist yet.
    fn get_all(&self, directory_id: &DirectoryId) -> Result<Vec<Message>>;

    /// Appends a message, creating the partition on first use.
    fn create(&mut self, directory_id: &DirectoryId, text: String) -> Result<Message>;

    /// Replaces the text of a message, keeping its id and creation time.
    fn update(
        &mut self,
        directory_id: &DirectoryId,
        message_id: &MessageId,
        text: String,
    ) -> Result<Message>;

    /// Removes a message and returns it.
    fn delete(&mut self, directory_id: &DirectoryId, message_id: &MessageId) -> Result<Message>;

    /// Drops a whole partition, returning how many messages it held.
    fn remove_partition(&mut self, directory_id: &DirectoryId) -> Result<usize>;
}
