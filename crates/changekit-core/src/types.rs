use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    /// Presentation order, most severe first.
    pub const DESCENDING: [Self; 4] = [Self::Major, Self::Minor, Self::Patch, Self::None];

    /// Classifies a textual bump type. Total: anything that is not exactly
    /// `minor`, `patch` or `none` lands on `Major`, so unrecognized input
    /// is never dropped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.to_ascii_lowercase().as_str() {
            "minor" => Self::Minor,
            "patch" => Self::Patch,
            "none" => Self::None,
            _ => Self::Major,
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

/// A package in the session's universe. Supplied externally, immutable
/// for the duration of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: Version,
}

impl PackageInfo {
    #[must_use]
    pub fn is_pre_major(&self) -> bool {
        self.version.major == 0
    }
}

/// A change category label offered to the user, supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCategory {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A categorized description attached to a release. The description may be
/// empty; empty descriptions are filtered at render time, not during
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeType {
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub bump_type: BumpType,
    #[serde(default)]
    pub change_types: Vec<ChangeType>,
}

impl Release {
    #[must_use]
    pub fn new(name: impl Into<String>, bump_type: BumpType) -> Self {
        Self {
            name: name.into(),
            bump_type,
            change_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_change_types(mut self, change_types: Vec<ChangeType>) -> Self {
        self.change_types = change_types;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub releases: Vec<Release>,
    pub summary: String,
    /// True once the user has explicitly accepted the changeset, or once a
    /// non-empty editor-provided summary implicitly accepted it.
    #[serde(default)]
    pub confirmed: bool,
}

impl Changeset {
    #[must_use]
    pub fn new(releases: Vec<Release>) -> Self {
        Self {
            releases,
            summary: String::new(),
            confirmed: false,
        }
    }

    /// The `--empty` shortcut: no releases, empty summary, pre-confirmed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            releases: Vec::new(),
            summary: String::new(),
            confirmed: true,
        }
    }

    #[must_use]
    pub fn has_major_release(&self) -> bool {
        self.releases
            .iter()
            .any(|r| r.bump_type == BumpType::Major)
    }
}
