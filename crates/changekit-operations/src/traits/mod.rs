mod editor;
mod git_provider;
mod interaction;
mod store;

pub use editor::EditorLauncher;
pub use git_provider::GitProvider;
pub use interaction::{InteractionProvider, OptionGroup};
pub use store::{ChangesetStore, WrittenChangeset};
