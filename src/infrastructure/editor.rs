//! Editor integration for composing entry content

use crate::error::{BitacoraError, Result};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Session for editing text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    /// Create a new editor session with the given command
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Open `initial` in the editor and return the saved text
    pub fn compose(&self, initial: &str) -> Result<String> {
        let file = tempfile::Builder::new()
            .prefix("bitacora-")
            .suffix(".md")
            .tempfile()?;
        fs::write(file.path(), initial)?;

        self.wait_for(file.path())?;

        Ok(fs::read_to_string(file.path())?)
    }

    /// Run the editor on `file_path` and block until it exits
    fn wait_for(&self, file_path: &Path) -> Result<()> {
        let (program, mut args) = self.parse_command();
        args.push(file_path.to_string_lossy().to_string());

        // On Windows, use cmd /c to ensure .bat and .cmd files are found
        #[cfg(windows)]
        let status = Command::new("cmd").arg("/C").arg(&program).args(&args).status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&args).status();

        let status = status.map_err(|e| {
            BitacoraError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(BitacoraError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        match parts.split_first() {
            Some((program, args)) => (
                program.to_string(),
                args.iter().map(|s| s.to_string()).collect(),
            ),
            None if cfg!(windows) => ("notepad".to_string(), vec![]),
            None => ("nano".to_string(), vec![]),
        }
    }
}
