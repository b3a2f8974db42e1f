use tracing::debug;

use crate::error::{Error, Result};
use crate::export::row_to_csv_line;

/// Remembers the last row copied so it can be shown back to the user
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    last_copied: Option<String>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_copied(&self) -> Option<&str> {
        self.last_copied.as_deref()
    }

    /// Serialize a row as one CSV line, as copied to the system clipboard
    pub fn row_text(cells: &[String]) -> String {
        row_to_csv_line(cells)
    }

    /// Copy a row to the system clipboard
    pub fn copy_row(&mut self, cells: &[String]) -> Result<()> {
        let text = Self::row_text(cells);
        copy_to_system_clipboard(&text)?;
        debug!(bytes = text.len(), "row copied to clipboard");
        self.last_copied = Some(text);
        Ok(())
    }
}

fn clipboard_error(e: impl std::fmt::Display) -> Error {
    Error::Clipboard { message: e.to_string() }
}

/// Feed `text` to a clipboard tool's stdin; true when it exits successfully.
/// The child is always reaped.
#[cfg(target_os = "linux")]
fn pipe_to_tool(cmd: &str, args: &[&str], text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let Ok(mut child) = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()).is_ok(),
        None => false,
    };
    if !written {
        let _ = child.kill();
    }
    let exited_ok = child.wait().map(|s| s.success()).unwrap_or(false);
    written && exited_ok
}

/// Copy text to system clipboard using platform-appropriate method
pub fn copy_to_system_clipboard(text: &str) -> Result<()> {
    // Try command-line tools first on Linux (more reliable with terminal apps)
    #[cfg(target_os = "linux")]
    {
        let commands: [(&str, &[&str]); 3] = [
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ];

        for (cmd, args) in commands {
            if pipe_to_tool(cmd, args, text) {
                return Ok(());
            }
        }
    }

    let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
    clipboard.set_text(text).map_err(clipboard_error)
}
