use clap::{CommandFactory, Parser, Subcommand};
use msgstore::index::DisplayIndex;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "msgstore", bin_name = "msgstore", version)]
#[command(about = "Keep messages in directories from an interactive prompt", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of the default config.json
    #[arg(long, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Start without the sample directories and messages
    #[arg(long, help_heading = "Options")]
    pub empty: bool,

    /// Disable colored output
    #[arg(long, help_heading = "Options")]
    pub no_color: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, help_heading = "Options")]
    pub verbose: bool,

    /// Print the directories as JSON and exit
    #[arg(long, help_heading = "Options")]
    pub json: bool,
}

const SESSION_HELP_TEMPLATE: &str = "Commands:\n{subcommands}";

/// One line typed at the directory prompt.
#[derive(Parser, Debug)]
#[command(
    name = "directories",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = SESSION_HELP_TEMPLATE
)]
pub struct DirectoryLine {
    #[command(subcommand)]
    pub command: DirectoryCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum DirectoryCommand {
    /// Show the directory list
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Filter directories by name (no query clears the filter)
    #[command(display_order = 2)]
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Toggle the favorites-only view
    #[command(display_order = 3)]
    Favorites,

    /// Create a directory (asks for the name if not given)
    #[command(display_order = 4)]
    New {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },

    /// Rename a directory
    #[command(display_order = 5)]
    Edit { index: DisplayIndex },

    /// Delete a directory and its messages
    #[command(alias = "rm", display_order = 6)]
    Delete { index: DisplayIndex },

    /// Mark or unmark a directory as favorite
    #[command(display_order = 7)]
    Fav { index: DisplayIndex },

    /// Show the messages of a directory
    #[command(display_order = 8)]
    Open { index: DisplayIndex },

    /// Show the notes kept on a directory
    #[command(display_order = 9)]
    Notes { index: DisplayIndex },

    /// Append a note to a directory
    #[command(display_order = 10)]
    NoteAdd {
        index: DisplayIndex,
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        text: Vec<String>,
    },

    /// Remove a note from a directory by its number
    #[command(display_order = 11)]
    NoteRm {
        index: DisplayIndex,
        #[arg(allow_negative_numbers = true)]
        note: i64,
    },

    /// Show this help
    #[command(display_order = 20)]
    Help,

    /// Leave the session
    #[command(alias = "exit", display_order = 21)]
    Quit,
}

/// One line typed at the message prompt.
#[derive(Parser, Debug)]
#[command(
    name = "messages",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = SESSION_HELP_TEMPLATE
)]
pub struct MessageLine {
    #[command(subcommand)]
    pub command: MessageCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum MessageCommand {
    /// Show the messages
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Add a message (asks for the text if not given)
    #[command(display_order = 2)]
    New {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Change the text of a message
    #[command(display_order = 3)]
    Edit { index: DisplayIndex },

    /// Delete a message
    #[command(alias = "rm", display_order = 4)]
    Delete { index: DisplayIndex },

    /// Return to the directory list
    #[command(display_order = 5)]
    Back,

    /// Show this help
    #[command(display_order = 20)]
    Help,

    /// Leave the session
    #[command(alias = "exit", display_order = 21)]
    Quit,
}

/// Splits a typed line into words. Returns `None` for a blank line.
pub fn split_line(line: &str) -> Option<Vec<&str>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    (!words.is_empty()).then_some(words)
}

/// Joins trailing words back into a single value.
pub fn join_words(words: &[String]) -> Option<String> {
    (!words.is_empty()).then(|| words.join(" "))
}

/// The text of `line` after its first `skip` words, spacing kept as typed.
/// Only the run of whitespace separating it from those words is dropped.
pub fn text_after(line: &str, skip: usize) -> Option<&str> {
    let mut rest = line;
    for _ in 0..skip {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[end..];
    }
    let rest = rest.trim_start();
    (!rest.is_empty()).then_some(rest)
}

pub fn directory_help() -> String {
    DirectoryLine::command().render_help().to_string()
}

pub fn message_help() -> String {
    MessageLine::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(line: &str) -> Result<DirectoryCommand, clap::Error> {
        DirectoryLine::try_parse_from(line.split_whitespace()).map(|l| l.command)
    }

    fn message(line: &str) -> Result<MessageCommand, clap::Error> {
        MessageLine::try_parse_from(line.split_whitespace()).map(|l| l.command)
    }

    fn idx(n: usize) -> DisplayIndex {
        DisplayIndex::new(n).unwrap()
    }

    #[test]
    fn binary_flags_parse() {
        let cli = Cli::try_parse_from(["msgstore", "--empty", "--no-color", "-v"]).unwrap();
        assert!(cli.empty);
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert!(!cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(directory("ls").unwrap(), DirectoryCommand::List);
        assert_eq!(
            directory("rm 2").unwrap(),
            DirectoryCommand::Delete { index: idx(2) }
        );
        assert_eq!(directory("exit").unwrap(), DirectoryCommand::Quit);
        assert_eq!(message("ls").unwrap(), MessageCommand::List);
    }

    #[test]
    fn trailing_words_are_collected() {
        assert_eq!(
            directory("new Long Term Plans").unwrap(),
            DirectoryCommand::New {
                name: vec!["Long".into(), "Term".into(), "Plans".into()]
            }
        );
        assert_eq!(
            directory("note-add 1 call -the- bank").unwrap(),
            DirectoryCommand::NoteAdd {
                index: idx(1),
                text: vec!["call".into(), "-the-".into(), "bank".into()]
            }
        );
        assert_eq!(
            message("new").unwrap(),
            MessageCommand::New { text: vec![] }
        );
    }

    #[test]
    fn note_rm_accepts_any_integer() {
        assert_eq!(
            directory("note-rm 1 -3").unwrap(),
            DirectoryCommand::NoteRm {
                index: idx(1),
                note: -3
            }
        );
    }

    #[test]
    fn bad_index_is_rejected() {
        assert!(directory("edit 0").is_err());
        assert!(directory("open x").is_err());
        assert!(message("delete").is_err());
        assert!(directory("frobnicate").is_err());
    }

    #[test]
    fn help_lists_commands() {
        let help = directory_help();
        assert!(help.contains("note-add"));
        assert!(help.contains("favorites"));
        assert!(message_help().contains("back"));
    }

    #[test]
    fn line_helpers() {
        assert_eq!(split_line("   "), None);
        assert_eq!(split_line(" ls  "), Some(vec!["ls"]));
        assert_eq!(join_words(&[]), None);
        assert_eq!(join_words(&["a".into(), "b".into()]), Some("a b".into()));
    }

    #[test]
    fn text_after_keeps_spacing() {
        assert_eq!(text_after("new Long   Term ", 1), Some("Long   Term "));
        assert_eq!(
            text_after("  note-add  2   call  the bank", 2),
            Some("call  the bank")
        );
        assert_eq!(text_after("new   ", 1), None);
        assert_eq!(text_after("new", 1), None);
    }
}
