//! # Session
//!
//! Start-up and the interactive loop.
//!
//! `run()` parses the binary flags, installs logging, loads the config and
//! builds the API, then hands stdin/stdout to a [`Session`]. The session reads
//! one command per line, dispatches it to the active screen controller and
//! prints whatever the screen reports. Dialogs are answered on the following
//! line(s): a name or text for create/edit, `y`/`yes` for delete.
//!
//! The session is generic over its input and output so tests can script it.

use super::render::{
    render_directory_screen, render_message_screen, render_notes, render_notices, render_prompt,
};
use super::setup::{
    directory_help, join_words, message_help, split_line, text_after, Cli, DirectoryCommand,
    DirectoryLine, MessageCommand, MessageLine,
};
use clap::Parser;
use directories::ProjectDirs;
use msgstore::api::{DirectoryFilter, InMemoryApi, MsgStoreApi, Notice};
use msgstore::config::AppConfig;
use msgstore::error::Result;
use msgstore::index::DisplayIndex;
use msgstore::model::{DirectoryId, MessageId};
use msgstore::screens::{Dialog, DialogOutcome, DirectoryScreen, MessageScreen};
use msgstore::store::{DirectoryStore, MessageStore};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let options = SessionOptions {
        use_color: if cli.no_color { Some(false) } else { config.color },
        date_format: config.date_format.clone(),
    };

    let api = if cli.empty || !config.seed_sample_data {
        InMemoryApi::in_memory()
    } else {
        InMemoryApi::with_sample_data()
    };

    if cli.json {
        return print_json(&api);
    }

    info!("session started");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(api, options);
    session.run(&mut stdin.lock(), &mut stdout.lock())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), "loading config file");
        return AppConfig::load_file(path);
    }

    match ProjectDirs::from("com", "msgstore", "msgstore") {
        Some(dirs) => AppConfig::load(dirs.config_dir()),
        None => Ok(AppConfig::default()),
    }
}

fn print_json<D: DirectoryStore, M: MessageStore>(api: &MsgStoreApi<D, M>) -> Result<()> {
    let result = api.list_directories(&DirectoryFilter::default())?;
    println!("{}", serde_json::to_string_pretty(&result.directories)?);
    Ok(())
}

/// Rendering settings for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub use_color: Option<bool>,
    pub date_format: String,
}

enum View {
    Directories,
    Messages(MessageScreen),
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<D: DirectoryStore, M: MessageStore> {
    api: MsgStoreApi<D, M>,
    directories: DirectoryScreen,
    view: View,
    options: SessionOptions,
    stray: Vec<Notice>,
}

impl<D: DirectoryStore, M: MessageStore> Session<D, M> {
    pub fn new(api: MsgStoreApi<D, M>, options: SessionOptions) -> Self {
        let mut directories = DirectoryScreen::new();
        directories.mount(&api);
        Self {
            api,
            directories,
            view: View::Directories,
            options,
            stray: Vec::new(),
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        self.show_view(out)?;

        loop {
            self.write_prompt(out)?;
            let Some(line) = read_line(input)? else {
                writeln!(out)?;
                break;
            };
            if self.handle_line(&line, input, out)? == Flow::Quit {
                break;
            }
        }

        debug!("session ended");
        Ok(())
    }

    fn handle_line<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        let Some(words) = split_line(line) else {
            return Ok(Flow::Continue);
        };

        let parsed = if matches!(self.view, View::Messages(_)) {
            MessageLine::try_parse_from(words)
                .map(|parsed| self.message_command(parsed.command, line, input, out))
        } else {
            DirectoryLine::try_parse_from(words)
                .map(|parsed| self.directory_command(parsed.command, line, input, out))
        };

        let flow = match parsed {
            Ok(flow) => flow?,
            Err(err) => {
                write_usage_error(out, &err, self.options.use_color)?;
                Flow::Continue
            }
        };

        self.flush_notices(out)?;
        Ok(flow)
    }

    /// `line` is the raw input behind `command`; typed text is taken from it
    /// so inner spacing survives.
    fn directory_command<R: BufRead, W: Write>(
        &mut self,
        command: DirectoryCommand,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        debug!(?command, "directory command");
        match command {
            DirectoryCommand::List => self.show_view(out)?,
            DirectoryCommand::Search { query } => {
                match join_words(&query) {
                    Some(query) => self.directories.set_query(query),
                    None => self.directories.clear_query(),
                }
                self.show_view(out)?;
            }
            DirectoryCommand::Favorites => {
                let favorites_only = !self.directories.favorites_only();
                self.directories.set_favorites_only(favorites_only);
                self.show_view(out)?;
            }
            DirectoryCommand::New { .. } => {
                self.directories.open_create();
                let outcome = match text_after(line, 1) {
                    Some(name) => {
                        self.directories.set_input(name.to_string());
                        self.directories.confirm(&mut self.api)
                    }
                    None => self.directory_dialog(input, out)?,
                };
                self.show_if_applied(&outcome, out)?;
            }
            DirectoryCommand::Edit { index } => {
                if let Some(id) = self.resolve_directory(index) {
                    if self.directories.open_edit(&id) {
                        let outcome = self.directory_dialog(input, out)?;
                        self.show_if_applied(&outcome, out)?;
                    }
                }
            }
            DirectoryCommand::Delete { index } => {
                if let Some(id) = self.resolve_directory(index) {
                    if self.directories.open_delete(&id) {
                        let outcome = self.directory_dialog(input, out)?;
                        self.show_if_applied(&outcome, out)?;
                    }
                }
            }
            DirectoryCommand::Fav { index } => {
                if let Some(id) = self.resolve_directory(index) {
                    let outcome = self.directories.toggle_favorite(&mut self.api, &id);
                    self.show_if_applied(&outcome, out)?;
                }
            }
            DirectoryCommand::Open { index } => {
                if let Some(directory) = self
                    .resolve_directory(index)
                    .and_then(|id| self.directories.get(&id).cloned())
                {
                    let mut screen = MessageScreen::for_directory(&directory);
                    screen.mount(&self.api);
                    self.view = View::Messages(screen);
                    self.show_view(out)?;
                }
            }
            DirectoryCommand::Notes { index } => {
                if let Some(directory) = self
                    .resolve_directory(index)
                    .and_then(|id| self.directories.get(&id))
                {
                    write!(out, "{}", render_notes(directory, self.options.use_color))?;
                }
            }
            DirectoryCommand::NoteAdd { index, text } => {
                if let Some(id) = self.resolve_directory(index) {
                    let text = text_after(line, 2)
                        .map(str::to_string)
                        .unwrap_or_else(|| text.join(" "));
                    self.directories.add_note(&mut self.api, &id, text);
                }
            }
            DirectoryCommand::NoteRm { index, note } => {
                if let Some(id) = self.resolve_directory(index) {
                    let (name, count) = self
                        .directories
                        .get(&id)
                        .map(|dir| (dir.name.clone(), dir.message_count))
                        .unwrap_or_default();
                    // Notes are shown from 1; the store counts from 0.
                    match usize::try_from(note).ok().filter(|n| (1..=count).contains(n)) {
                        Some(n) => {
                            self.directories
                                .remove_note(&mut self.api, &id, n as i64 - 1);
                        }
                        None => self
                            .stray
                            .push(Notice::error(format!("No note {} in {}", note, name))),
                    }
                }
            }
            DirectoryCommand::Help => write!(out, "{}", directory_help())?,
            DirectoryCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn message_command<R: BufRead, W: Write>(
        &mut self,
        command: MessageCommand,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        debug!(?command, "message command");
        let View::Messages(screen) = &mut self.view else {
            return Ok(Flow::Continue);
        };
        let use_color = self.options.use_color;

        let outcome = match command {
            MessageCommand::List => Some(DialogOutcome::Applied),
            MessageCommand::New { .. } => {
                screen.open_create();
                Some(match text_after(line, 1) {
                    Some(text) => {
                        screen.set_input(text.to_string());
                        screen.confirm(&mut self.api)
                    }
                    None => drive_dialog(screen, &mut self.api, input, out, use_color)?,
                })
            }
            MessageCommand::Edit { index } => match screen.resolve(index) {
                Ok(id) => {
                    if screen.open_edit(&id) {
                        Some(drive_dialog(screen, &mut self.api, input, out, use_color)?)
                    } else {
                        None
                    }
                }
                Err(err) => {
                    self.stray.push(Notice::error(err.to_string()));
                    None
                }
            },
            MessageCommand::Delete { index } => match screen.resolve(index) {
                Ok(id) => {
                    if screen.open_delete(&id) {
                        Some(drive_dialog(screen, &mut self.api, input, out, use_color)?)
                    } else {
                        None
                    }
                }
                Err(err) => {
                    self.stray.push(Notice::error(err.to_string()));
                    None
                }
            },
            MessageCommand::Back => {
                let pending = screen.take_notices();
                self.view = View::Directories;
                self.directories.refresh(&self.api);
                write!(out, "{}", render_notices(&pending, use_color))?;
                self.show_view(out)?;
                return Ok(Flow::Continue);
            }
            MessageCommand::Help => {
                write!(out, "{}", message_help())?;
                None
            }
            MessageCommand::Quit => return Ok(Flow::Quit),
        };

        if let Some(outcome) = outcome {
            self.show_if_applied(&outcome, out)?;
        }
        Ok(Flow::Continue)
    }

    fn directory_dialog<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<DialogOutcome> {
        drive_dialog(
            &mut self.directories,
            &mut self.api,
            input,
            out,
            self.options.use_color,
        )
    }

    /// Row lookup failures are reported as error notices.
    fn resolve_directory(&mut self, index: DisplayIndex) -> Option<DirectoryId> {
        match self.directories.resolve(index) {
            Ok(id) => Some(id),
            Err(err) => {
                self.stray.push(Notice::error(err.to_string()));
                None
            }
        }
    }

    fn show_if_applied<W: Write>(&mut self, outcome: &DialogOutcome, out: &mut W) -> Result<()> {
        if *outcome == DialogOutcome::Applied {
            self.flush_notices(out)?;
            self.show_view(out)?;
        }
        Ok(())
    }

    fn show_view<W: Write>(&self, out: &mut W) -> Result<()> {
        let rendered = match &self.view {
            View::Directories => render_directory_screen(&self.directories, self.options.use_color),
            View::Messages(screen) => {
                render_message_screen(screen, &self.options.date_format, self.options.use_color)
            }
        };
        write!(out, "{}", rendered)?;
        Ok(())
    }

    fn flush_notices<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let mut notices = std::mem::take(&mut self.stray);
        notices.extend(self.directories.take_notices());
        if let View::Messages(screen) = &mut self.view {
            notices.extend(screen.take_notices());
        }
        write!(out, "{}", render_notices(&notices, self.options.use_color))?;
        Ok(())
    }

    fn write_prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        let label = match &self.view {
            View::Directories => "msgstore>".to_string(),
            View::Messages(screen) => format!("{}>", screen.directory_name()),
        };
        write!(out, "{}", render_prompt(&label, self.options.use_color))?;
        out.flush()?;
        Ok(())
    }
}

/// The dialog surface shared by both screens.
trait DialogScreen {
    type Id: Clone;

    fn dialog(&self) -> &Dialog<Self::Id>;
    fn field_label(&self) -> &'static str;
    /// How the record behind `id` is named in a delete prompt.
    fn describe(&self, id: &Self::Id) -> String;
    fn set_input(&mut self, text: String) -> bool;
    fn cancel(&mut self);
    fn confirm<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
    ) -> DialogOutcome;
}

impl DialogScreen for DirectoryScreen {
    type Id = DirectoryId;

    fn dialog(&self) -> &Dialog<DirectoryId> {
        DirectoryScreen::dialog(self)
    }

    fn field_label(&self) -> &'static str {
        "Directory name"
    }

    fn describe(&self, id: &DirectoryId) -> String {
        self.get(id)
            .map(|dir| format!("\"{}\" and its messages", dir.name))
            .unwrap_or_else(|| id.to_string())
    }

    fn set_input(&mut self, text: String) -> bool {
        DirectoryScreen::set_input(self, text)
    }

    fn cancel(&mut self) {
        DirectoryScreen::cancel(self)
    }

    fn confirm<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
    ) -> DialogOutcome {
        DirectoryScreen::confirm(self, api)
    }
}

impl DialogScreen for MessageScreen {
    type Id = MessageId;

    fn dialog(&self) -> &Dialog<MessageId> {
        MessageScreen::dialog(self)
    }

    fn field_label(&self) -> &'static str {
        "Message text"
    }

    fn describe(&self, id: &MessageId) -> String {
        self.get(id)
            .map(|msg| format!("\"{}\"", msg.text))
            .unwrap_or_else(|| id.to_string())
    }

    fn set_input(&mut self, text: String) -> bool {
        MessageScreen::set_input(self, text)
    }

    fn cancel(&mut self) {
        MessageScreen::cancel(self)
    }

    fn confirm<D: DirectoryStore, M: MessageStore>(
        &mut self,
        api: &mut MsgStoreApi<D, M>,
    ) -> DialogOutcome {
        MessageScreen::confirm(self, api)
    }
}

/// Answers an open dialog from the next input line(s).
///
/// Create and edit take the line as the new value; an empty line cancels.
/// Delete goes through only on `y` or `yes`.
fn drive_dialog<S, D, M, R, W>(
    screen: &mut S,
    api: &mut MsgStoreApi<D, M>,
    input: &mut R,
    out: &mut W,
    use_color: Option<bool>,
) -> Result<DialogOutcome>
where
    S: DialogScreen,
    D: DirectoryStore,
    M: MessageStore,
    R: BufRead,
    W: Write,
{
    loop {
        let prompt = match screen.dialog() {
            Dialog::Idle => return Ok(DialogOutcome::NothingOpen),
            Dialog::Creating { .. } => format!("{}:", screen.field_label()),
            Dialog::Editing { input: current, .. } => {
                writeln!(out, "Current: {}", current)?;
                format!("New {}:", screen.field_label().to_lowercase())
            }
            Dialog::ConfirmingDelete { id } => format!("Delete {}? [y/N]", screen.describe(id)),
        };
        let deleting = matches!(screen.dialog(), Dialog::ConfirmingDelete { .. });

        write!(out, "{}", render_prompt(&prompt, use_color))?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            screen.cancel();
            return Ok(DialogOutcome::NothingOpen);
        };
        let answer = line.trim();

        let proceed = if deleting {
            matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
        } else {
            !answer.is_empty() && screen.set_input(line)
        };
        if !proceed {
            screen.cancel();
            write!(out, "{}", render_notices(&[Notice::info("Cancelled.")], use_color))?;
            return Ok(DialogOutcome::NothingOpen);
        }

        match screen.confirm(api) {
            DialogOutcome::Rejected(_) => continue,
            outcome => return Ok(outcome),
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn write_usage_error<W: Write>(
    out: &mut W,
    err: &clap::Error,
    use_color: Option<bool>,
) -> Result<()> {
    let rendered = err.to_string();
    let reason = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ");
    let notice = Notice::warning(format!("{} (type `help` for commands)", reason));
    write!(out, "{}", render_notices(&[notice], use_color))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgstore::store::memory::{InMemoryDirectoryStore, InMemoryMessageStore};
    use std::io::Cursor;

    type TestSession = Session<InMemoryDirectoryStore, InMemoryMessageStore>;

    fn session() -> TestSession {
        Session::new(
            InMemoryApi::with_sample_data(),
            SessionOptions {
                use_color: Some(false),
                date_format: "%Y-%m-%d".into(),
            },
        )
    }

    fn drive(session: &mut TestSession, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn names(session: &TestSession) -> Vec<String> {
        session
            .directories
            .all()
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }

    #[test]
    fn shows_list_and_quits() {
        let mut s = session();
        let out = drive(&mut s, "quit\n");
        assert!(out.starts_with("Directories\n"));
        assert!(out.contains("Personal"));
        assert!(out.ends_with("msgstore> "));
    }

    #[test]
    fn end_of_input_ends_session() {
        let mut s = session();
        let out = drive(&mut s, "ls\n");
        assert_eq!(out.matches("Directories").count(), 2);
    }

    #[test]
    fn create_through_dialog() {
        let mut s = session();
        let out = drive(&mut s, "new\nErrands\nquit\n");
        assert!(out.contains("Directory name: "));
        assert!(out.contains("Directory created: Errands"));
        assert_eq!(names(&s).last().map(String::as_str), Some("Errands"));
    }

    #[test]
    fn create_with_inline_name() {
        let mut s = session();
        let out = drive(&mut s, "new Long Term Plans\n");
        assert!(!out.contains("Directory name: "));
        assert_eq!(names(&s).len(), 5);
        assert_eq!(names(&s)[4], "Long Term Plans");
    }

    #[test]
    fn empty_answer_cancels_create() {
        let mut s = session();
        let out = drive(&mut s, "new\n\nquit\n");
        assert!(out.contains("Cancelled."));
        assert_eq!(names(&s).len(), 4);
        assert!(!s.directories.dialog().is_open());
    }

    #[test]
    fn edit_shows_current_value() {
        let mut s = session();
        let out = drive(&mut s, "search wor\nedit 1\nWorkshop\n");
        assert!(out.contains("filter: \"wor\""));
        assert!(out.contains("Current: Work"));
        assert!(out.contains("Directory updated: Workshop"));
        assert_eq!(names(&s)[0], "Workshop");
    }

    #[test]
    fn delete_needs_yes() {
        let mut s = session();
        let out = drive(&mut s, "rm 1\nn\nrm 1\nYes\n");
        assert!(out.contains("Delete \"Work\" and its messages? [y/N] "));
        assert!(out.contains("Cancelled."));
        assert!(out.contains("Directory deleted: Work"));
        assert!(out.contains("2 messages removed with it"));
        assert_eq!(names(&s), ["Personal", "Ideas", "Travel"]);
    }

    #[test]
    fn favorites_view_toggles() {
        let mut s = session();
        let out = drive(&mut s, "fav 3\nfavorites\n");
        assert!(out.contains("Directory marked as favorite: Ideas"));
        assert!(out.contains("favorites only"));
        assert!(s.directories.favorites_only());
        assert_eq!(s.directories.visible().len(), 2);
    }

    #[test]
    fn messages_screen_round_trip() {
        let mut s = session();
        let out = drive(&mut s, "open 1\nnew Call the bank\nrm 1\ny\nback\n");
        assert!(out.contains("Complete project"));
        assert!(out.contains("Work> "));
        assert!(out.contains("Message added to Work: Call the bank"));
        assert!(out.contains("Message deleted: Complete project"));
        assert!(matches!(s.view, View::Directories));

        let left = s.api.list_messages(&"1".into()).unwrap().messages;
        let texts: Vec<_> = left.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["Meeting at 3 PM", "Call the bank"]);
    }

    #[test]
    fn message_edit_dialog() {
        let mut s = session();
        let out = drive(&mut s, "open 2\nedit 1\nBuy bread\n");
        assert!(out.contains("Current: Buy groceries"));
        assert!(out.contains("New message text: "));
        assert!(out.contains("Message updated: Buy bread"));
    }

    #[test]
    fn notes_are_one_based_at_the_prompt() {
        let mut s = session();
        let out = drive(&mut s, "note-add 4 pack bags\nnotes 4\nnote-rm 4 1\nnote-rm 4 1\n");
        assert!(out.contains("Note added to Travel: pack bags"));
        assert!(out.contains("1. pack bags"));
        assert!(out.contains("Note removed from Travel: pack bags"));
        assert!(out.contains("No note 1 in Travel"));
    }

    #[test]
    fn note_numbers_below_one_echo_what_was_typed() {
        let mut s = session();
        let out = drive(&mut s, "note-rm 1 0\nnote-rm 1 -1\nnote-rm 1 3\n");
        assert!(out.contains("No note 0 in Work"));
        assert!(out.contains("No note -1 in Work"));
        assert!(out.contains("No note 3 in Work"));
        assert!(!out.contains("out of range"));
        assert_eq!(s.directories.all()[0].message_count, 2);
    }

    #[test]
    fn dialog_answer_is_stored_as_typed() {
        let mut s = session();
        drive(&mut s, "new\n  Padded  \n");
        assert_eq!(names(&s).last().map(String::as_str), Some("  Padded  "));
    }

    #[test]
    fn inline_text_keeps_inner_spacing() {
        let mut s = session();
        let out = drive(&mut s, "new Long   Term\nnote-add 5 call  the   bank\nopen 5\nnew a  b\n");
        assert_eq!(names(&s)[4], "Long   Term");
        assert_eq!(s.directories.all()[4].messages, ["call  the   bank"]);
        assert!(out.contains("Message added to Long   Term: a  b"));
    }

    #[test]
    fn bad_rows_and_commands_are_reported() {
        let mut s = session();
        let out = drive(&mut s, "edit 9\nfrobnicate\nopen 2\nrm 5\n");
        assert!(out.contains("No directory at row 9"));
        assert!(out.contains("type `help` for commands"));
        assert!(out.contains("No message at row 5"));
        assert!(!s.directories.dialog().is_open());
    }

    #[test]
    fn help_per_screen() {
        let mut s = session();
        let out = drive(&mut s, "help\nopen 1\nhelp\n");
        assert!(out.contains("note-add"));
        assert!(out.contains("back"));
    }
}
