use crate::model::{DirectoryId, MessageId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsgStoreError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(DirectoryId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    #[error("Message index out of range: {index} (directory has {len} notes)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl MsgStoreError {
    /// True for the not-found family, regardless of which collection missed.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MsgStoreError::DirectoryNotFound(_) | MsgStoreError::MessageNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MsgStoreError>;
