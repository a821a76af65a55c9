mod classify;
mod config;
mod types;

pub use classify::{BumpBuckets, classify_releases};
pub use config::{ChangesetConfig, CommitConfig};
pub use types::{BumpType, ChangeCategory, ChangeType, Changeset, PackageInfo, Release};
