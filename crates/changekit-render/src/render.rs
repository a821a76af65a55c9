use changekit_core::{ChangeType, Changeset, Release, classify_releases};
use indexmap::IndexSet;

pub const FRONT_MATTER_DELIMITER: &str = "---";

fn release_line(release: &Release) -> String {
    format!("\"{}\": {}", release.name, release.bump_type)
}

fn bullet_line(change_type: &ChangeType) -> String {
    format!("- [ {} ] {}", change_type.category, change_type.description)
}

/// Change types of a release group, deduplicated in first-seen order with
/// empty descriptions filtered out.
fn group_change_types(releases: &[Release]) -> Vec<&ChangeType> {
    let unique: IndexSet<&ChangeType> = releases.iter().flat_map(|r| &r.change_types).collect();
    unique
        .into_iter()
        .filter(|ct| !ct.description.is_empty())
        .collect()
}

fn render_section(releases: &[Release]) -> String {
    let mut lines: Vec<String> = releases.iter().map(release_line).collect();
    lines.extend(group_change_types(releases).into_iter().map(bullet_line));
    lines.join("\n")
}

/// Renders the categorized sections of a changeset body: release lines
/// followed by that group's change-type bullets, one section per bump-type
/// group when `split_by_bump_type` is set, a single combined section
/// otherwise. Pure. Returns `None` when no release carries change types;
/// the caller then falls back to the summary-only persistence format.
#[must_use]
pub fn render_contents(releases: &[Release], split_by_bump_type: bool) -> Option<String> {
    if releases.iter().all(|r| r.change_types.is_empty()) {
        return None;
    }

    if split_by_bump_type {
        let buckets = classify_releases(releases);
        let sections: Vec<String> = buckets
            .non_empty()
            .into_iter()
            .map(|(_, group)| render_section(group))
            .collect();
        Some(sections.join("\n"))
    } else {
        Some(render_section(releases))
    }
}

/// Renders the full persisted document: a front-matter block holding the
/// release lines (and change-type bullets when present), then a blank line
/// and the summary. An empty changeset renders an empty front-matter block
/// and no summary.
#[must_use]
pub fn render_document(changeset: &Changeset, split_by_bump_type: bool) -> String {
    let body = render_contents(&changeset.releases, split_by_bump_type).unwrap_or_else(|| {
        changeset
            .releases
            .iter()
            .map(release_line)
            .collect::<Vec<_>>()
            .join("\n")
    });

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    if !body.is_empty() {
        output.push_str(&body);
        output.push('\n');
    }
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');

    if !changeset.summary.is_empty() {
        output.push('\n');
        output.push_str(&changeset.summary);
        output.push('\n');
    }

    output
}
