use std::{path::Path, process::Command};

use tracing::info;

use crate::errors::CliError;

/// Runs the configured editor on `path` and waits for it to exit.
///
/// The editor setting is split shell-style, so `code --wait` or a quoted
/// program path work; the ledger path is appended as the last argument.
pub fn open_in_editor(editor: &str, path: &Path) -> Result<(), CliError> {
    let mut words = shell_words::split(editor)
        .map_err(|err| CliError::Editor(format!("cannot parse editor `{editor}`: {err}")))?;
    if words.is_empty() {
        return Err(CliError::Editor("no editor configured".into()));
    }
    let program = words.remove(0);

    info!(%program, path = %path.display(), "launching editor");
    let status = Command::new(&program)
        .args(&words)
        .arg(path)
        .status()
        .map_err(|err| CliError::Editor(format!("failed to launch `{program}`: {err}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::Editor(format!("`{program}` exited with {status}")))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn editor_receives_the_ledger_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2026-42.txt");
        fs::write(&path, "2026-10-12 120 refill\n").unwrap();

        open_in_editor(r#"sh -c 'echo "2026-10-16 -1 pen" >> "$0"'"#, &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "2026-10-12 120 refill\n2026-10-16 -1 pen\n"
        );
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let dir = tempdir().unwrap();
        let err = open_in_editor("false", &dir.path().join("x.txt")).unwrap_err();
        assert!(matches!(err, CliError::Editor(_)));
    }

    #[test]
    fn missing_program_is_an_error() {
        let dir = tempdir().unwrap();
        let err = open_in_editor("definitely-not-an-editor-42", &dir.path().join("x.txt"));
        assert!(matches!(err, Err(CliError::Editor(_))));
    }

    #[test]
    fn blank_editor_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(open_in_editor("  ", &dir.path().join("x.txt")).is_err());
    }
}
