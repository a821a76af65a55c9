mod git;
mod store;

pub use git::Git2Provider;
pub use store::{CHANGESET_DIR, FileSystemChangesetStore};
