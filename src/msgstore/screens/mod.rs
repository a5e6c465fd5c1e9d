//! # Screen Controllers
//!
//! A screen is a thin controller over the API: it caches the collection it
//! shows, owns the dialog the user is working in, and collects notices for
//! the UI to display. Screens never render anything themselves.
//!
//! Every screen follows the same cycle:
//!
//! ```text
//! mount ──► fetch ──► Idle ──open_*──► dialog open ──confirm──► mutate ──► fetch ──► Idle
//!                      ▲                    │
//!                      └──────cancel────────┘
//! ```
//!
//! Create and edit dialogs refuse to submit blank input and stay open. A
//! confirmed mutation always ends with a full re-fetch, whether the store
//! accepted it or not. Store errors become error notices.

use crate::commands::helpers::require_text;
use crate::commands::{CmdResult, Notice};
use crate::error::Result;
use tracing::debug;

pub mod directory;
pub mod message;

pub use directory::DirectoryScreen;
pub use message::MessageScreen;

/// The dialog a screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog<Id> {
    Idle,
    Creating {
        input: String,
    },
    Editing {
        id: Id,
        input: String,
    },
    ConfirmingDelete {
        id: Id,
    },
}

impl<Id> Default for Dialog<Id> {
    fn default() -> Self {
        Dialog::Idle
    }
}

/// What a confirmed dialog asks the screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<Id> {
    Create(String),
    Edit(Id, String),
    Delete(Id),
}

/// Result of confirming a dialog or running a direct action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The mutation went through and the view was re-fetched.
    Applied,
    /// Input was blank; the dialog is still open.
    Rejected(String),
    /// The store refused; an error notice was recorded.
    Failed,
    /// There was no dialog to confirm.
    NothingOpen,
}

impl<Id: Clone> Dialog<Id> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Idle)
    }

    /// The text field's current value, for dialogs that have one.
    pub fn input(&self) -> Option<&str> {
        match self {
            Dialog::Creating { input } | Dialog::Editing { input, .. } => Some(input.as_str()),
            _ => None,
        }
    }

    /// Replaces the text field. Returns false when the dialog has no field.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        match self {
            Dialog::Creating { input } | Dialog::Editing { input, .. } => {
                *input = text.into();
                true
            }
            _ => false,
        }
    }

    /// Validates the dialog and turns it into a submission, leaving the
    /// dialog untouched. `field` names the text field in rejection messages.
    pub fn submission(&self, field: &str) -> Option<Result<Submission<Id>>> {
        let submission = match self {
            Dialog::Idle => return None,
            Dialog::Creating { input } => {
                require_text(field, input).map(|_| Submission::Create(input.clone()))
            }
            Dialog::Editing { id, input } => {
                require_text(field, input).map(|_| Submission::Edit(id.clone(), input.clone()))
            }
            Dialog::ConfirmingDelete { id } => Ok(Submission::Delete(id.clone())),
        };
        Some(submission)
    }

    pub fn close(&mut self) {
        if self.is_open() {
            debug!("dialog closed");
        }
        *self = Dialog::Idle;
    }
}

/// Folds a command result into a screen's notices.
pub(crate) fn absorb(result: Result<CmdResult>, notices: &mut Vec<Notice>) -> DialogOutcome {
    match result {
        Ok(result) => {
            notices.extend(result.notices);
            DialogOutcome::Applied
        }
        Err(err) => {
            debug!(error = %err, "screen action failed");
            notices.push(Notice::error(err.to_string()));
            DialogOutcome::Failed
        }
    }
}

/// Validates an open dialog, recording a warning when it is rejected.
pub(crate) fn validate<Id: Clone>(
    dialog: &Dialog<Id>,
    field: &str,
    notices: &mut Vec<Notice>,
) -> std::result::Result<Submission<Id>, DialogOutcome> {
    match dialog.submission(field) {
        None => Err(DialogOutcome::NothingOpen),
        Some(Err(err)) => {
            let reason = format!("{} cannot be empty", field);
            debug!(error = %err, "dialog submission rejected");
            notices.push(Notice::warning(reason.clone()));
            Err(DialogOutcome::Rejected(reason))
        }
        Some(Ok(submission)) => Ok(submission),
    }
}
