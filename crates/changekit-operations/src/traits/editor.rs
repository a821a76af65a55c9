use std::path::Path;

/// Launches the platform editor on a file, detached from the session.
/// This is a best-effort side effect: implementations swallow failures
/// and the caller never awaits completion.
pub trait EditorLauncher: Send + Sync {
    fn open_detached(&self, path: &Path);
}
