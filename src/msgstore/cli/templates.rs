//! # CLI Templates
//!
//! Template sources live next to this file and are included as string
//! constants. They are minijinja templates rendered by [`super::render`];
//! every `style(...)` name must exist in the theme.
//!
//! Line breaks are explicit: each template line that ends in output text
//! produces exactly one output line. Width and padding math happens in Rust,
//! the templates only pick styles and lay out the pieces.

pub const DIRECTORY_LIST_TEMPLATE: &str = include_str!("templates/directory_list.jinja");
pub const MESSAGE_LIST_TEMPLATE: &str = include_str!("templates/message_list.jinja");
pub const NOTES_TEMPLATE: &str = include_str!("templates/notes.jinja");
pub const NOTICES_TEMPLATE: &str = include_str!("templates/notices.jinja");

/// Single-line prompt, no trailing newline.
pub const PROMPT_TEMPLATE: &str = r#"{{ label | style("prompt") }} "#;
