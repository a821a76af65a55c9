use std::path::Path;
use std::process::Command;

use changekit_operations::traits::EditorLauncher;

/// Opens files with `$EDITOR` (or a platform opener) without waiting for
/// the process. Launch failures are logged and otherwise ignored.
pub struct SystemEditorLauncher;

impl EditorLauncher for SystemEditorLauncher {
    fn open_detached(&self, path: &Path) {
        let (program, args) = launch_command(path);
        if let Err(e) = Command::new(program).args(args).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "could not open editor");
        }
    }
}

fn launch_command(path: &Path) -> (String, Vec<String>) {
    if let Ok(editor) = std::env::var("EDITOR") {
        return (editor, vec![path.display().to_string()]);
    }

    #[cfg(target_os = "macos")]
    return ("open".to_string(), vec![path.display().to_string()]);

    #[cfg(target_os = "windows")]
    return (
        "cmd".to_string(),
        vec!["/C".to_string(), "start".to_string(), path.display().to_string()],
    );

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    ("xdg-open".to_string(), vec![path.display().to_string()])
}
