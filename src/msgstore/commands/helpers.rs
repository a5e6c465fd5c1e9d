use crate::error::{MsgStoreError, Result};

/// Rejects input that is empty once trimmed. The input itself is stored
/// untrimmed; this only gates whether a create or edit may proceed.
pub fn require_text(field: &str, input: &str) -> Result<()> {
    if input.trim().is_empty() {
        return Err(MsgStoreError::Api(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Case-insensitive substring match used by the directory filter.
pub fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Shortens text for notices, keeping whole characters.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
