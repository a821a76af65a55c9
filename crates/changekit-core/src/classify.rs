use crate::types::{BumpType, Release};

/// Releases partitioned by bump type. Relative input order is preserved
/// within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpBuckets {
    pub major: Vec<Release>,
    pub minor: Vec<Release>,
    pub patch: Vec<Release>,
    pub none: Vec<Release>,
}

impl BumpBuckets {
    /// Non-empty buckets in presentation order, most severe first.
    #[must_use]
    pub fn non_empty(&self) -> Vec<(BumpType, &[Release])> {
        BumpType::DESCENDING
            .iter()
            .map(|&bump| (bump, self.bucket(bump)))
            .filter(|(_, releases)| !releases.is_empty())
            .collect()
    }

    #[must_use]
    pub fn bucket(&self, bump: BumpType) -> &[Release] {
        match bump {
            BumpType::Major => &self.major,
            BumpType::Minor => &self.minor,
            BumpType::Patch => &self.patch,
            BumpType::None => &self.none,
        }
    }
}

/// Partitions releases by bump type. Pure, never fails; every input
/// release lands in exactly one bucket.
#[must_use]
pub fn classify_releases(releases: &[Release]) -> BumpBuckets {
    let mut buckets = BumpBuckets::default();

    for release in releases {
        let bucket = match release.bump_type {
            BumpType::Major => &mut buckets.major,
            BumpType::Minor => &mut buckets.minor,
            BumpType::Patch => &mut buckets.patch,
            BumpType::None => &mut buckets.none,
        };
        bucket.push(release.clone());
    }

    buckets
}
