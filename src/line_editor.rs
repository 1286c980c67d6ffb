// ---------------------------------------------------------------------------
// line_editor — rustyline wrapper for the maitred REPL
// ---------------------------------------------------------------------------
//
// Readline-style editing for the conversation loop: arrow-key history,
// Emacs keybindings, Ctrl-C to re-prompt, Ctrl-D for EOF. History is
// persisted to ~/.maitred_history (max 500 entries).

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, EditMode};
use std::path::PathBuf;

/// Maximum number of history entries to retain.
const MAX_HISTORY: usize = 500;

/// History file name (stored in the user's home directory).
const HISTORY_FILE: &str = ".maitred_history";

/// Result of a single line read.
pub enum ReadResult {
    /// User entered a line of text.
    Line(String),
    /// User pressed Ctrl-C (interrupt).
    Interrupted,
    /// User pressed Ctrl-D or stdin closed (EOF).
    Eof,
}

/// Wrapper around rustyline's DefaultEditor with maitred-specific config.
pub struct LineEditor {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl LineEditor {
    /// Create a new line editor with Emacs-mode keybindings.
    ///
    /// Loads history from `~/.maitred_history` if it exists; a missing or
    /// corrupt history file just means starting with empty history.
    pub fn new() -> Self {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .max_history_size(MAX_HISTORY)
            .expect("valid history size")
            .auto_add_history(false) // we control when to add
            .build();

        let mut editor =
            DefaultEditor::with_config(config).expect("failed to create line editor");

        let history_path = home_dir().map(|home| home.join(HISTORY_FILE));
        if let Some(ref path) = history_path {
            let _ = editor.load_history(path);
        }

        LineEditor {
            editor,
            history_path,
        }
    }

    /// Read a line with the given prompt string (ANSI codes welcome).
    pub fn read_line(&mut self, prompt: &str) -> ReadResult {
        match self.editor.readline(prompt) {
            Ok(line) => ReadResult::Line(line),
            Err(ReadlineError::Interrupted) => ReadResult::Interrupted,
            Err(ReadlineError::Eof) => ReadResult::Eof,
            Err(_) => ReadResult::Eof, // treat other errors as EOF
        }
    }

    /// Add a line to the in-memory history and persist to disk.
    /// Silently ignores errors (e.g. unwritable history file).
    pub fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// The user's home directory ($HOME covers macOS + Linux).
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
