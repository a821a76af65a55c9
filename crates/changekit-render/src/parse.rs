use changekit_core::{BumpType, ChangeType, Changeset, Release};
use thiserror::Error;

use crate::render::FRONT_MATTER_DELIMITER;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing opening delimiter '---'")]
    MissingOpeningDelimiter,

    #[error("missing closing delimiter '---'")]
    MissingClosingDelimiter,

    #[error("invalid release line: '{line}'")]
    InvalidReleaseLine { line: String },

    #[error("invalid change-type line: '{line}'")]
    InvalidBulletLine { line: String },
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn find_closing_delimiter(content: &str) -> Option<usize> {
    if content.starts_with(FRONT_MATTER_DELIMITER) {
        return Some(0);
    }
    if let Some(pos) = content.find("\r\n---") {
        return Some(pos + 2);
    }
    if let Some(pos) = content.find("\n---") {
        return Some(pos + 1);
    }
    None
}

fn extract_front_matter(content: &str) -> Result<(&str, &str), ParseError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with(FRONT_MATTER_DELIMITER) {
        return Err(ParseError::MissingOpeningDelimiter);
    }

    let after_opening = strip_line_ending(&trimmed[FRONT_MATTER_DELIMITER.len()..]);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(ParseError::MissingClosingDelimiter);
    };

    let front_matter = after_opening[..closing_pos].trim_end_matches('\r');
    let body = strip_line_ending(&after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..]);

    Ok((front_matter, body))
}

/// `"name": bump`. The bump token goes through [`BumpType::parse`], so an
/// unrecognized token classifies as major instead of rejecting the file.
fn parse_release_line(line: &str) -> Result<Release, ParseError> {
    let invalid = || ParseError::InvalidReleaseLine {
        line: line.to_string(),
    };

    let rest = line.strip_prefix('"').ok_or_else(invalid)?;
    let (name, bump_token) = rest.split_once("\": ").ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }

    Ok(Release::new(name, BumpType::parse(bump_token.trim())))
}

/// `- [ Title ] description`.
fn parse_bullet_line(line: &str) -> Result<ChangeType, ParseError> {
    let invalid = || ParseError::InvalidBulletLine {
        line: line.to_string(),
    };

    let rest = line.strip_prefix("- [ ").ok_or_else(invalid)?;
    let (category, description) = rest.split_once(" ] ").ok_or_else(invalid)?;

    Ok(ChangeType {
        category: category.to_string(),
        description: description.to_string(),
    })
}

/// Reads a persisted changeset document back into a [`Changeset`].
///
/// Inverse of [`crate::render_document`] for status-style consumers:
/// change-type bullets attach to every release of the section they follow,
/// and a bare front-matter block parses as an empty changeset. Parsed
/// changesets are marked confirmed, since persistence itself was the
/// acceptance.
///
/// # Errors
///
/// Returns [`ParseError`] when a delimiter is missing or a front-matter
/// line is neither a release line nor a change-type bullet.
pub fn parse_document(content: &str) -> Result<Changeset, ParseError> {
    let (front_matter, body) = extract_front_matter(content)?;

    let mut releases: Vec<Release> = Vec::new();
    let mut section_start = 0;
    let mut in_bullets = false;

    for line in front_matter.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with('-') {
            let change_type = parse_bullet_line(line)?;
            for release in &mut releases[section_start..] {
                release.change_types.push(change_type.clone());
            }
            in_bullets = true;
        } else {
            // A release line after a bullet run opens the next section.
            if in_bullets {
                section_start = releases.len();
                in_bullets = false;
            }
            releases.push(parse_release_line(line)?);
        }
    }

    let mut changeset = Changeset::new(releases);
    changeset.summary = body.trim().to_string();
    changeset.confirmed = true;
    Ok(changeset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_release_with_summary() {
        let content = "---\n\"pkg-a\": patch\n---\n\nfix bug\n";

        let changeset = parse_document(content).expect("should parse");

        assert_eq!(changeset.releases, vec![Release::new("pkg-a", BumpType::Patch)]);
        assert_eq!(changeset.summary, "fix bug");
        assert!(changeset.confirmed);
    }

    #[test]
    fn empty_document_parses_as_empty_changeset() {
        let changeset = parse_document("---\n---\n").expect("should parse");

        assert!(changeset.releases.is_empty());
        assert!(changeset.summary.is_empty());
    }

    #[test]
    fn bullets_attach_to_their_own_section() {
        let content = "---\n\
            \"pkg-a\": major\n\
            - [ Removed ] dropped the legacy API\n\
            \"pkg-b\": patch\n\
            \"pkg-c\": patch\n\
            - [ Changed ] reworked internals\n\
            ---\n\nthe summary\n";

        let changeset = parse_document(content).expect("should parse");

        assert_eq!(changeset.releases.len(), 3);
        assert_eq!(changeset.releases[0].change_types[0].category, "Removed");
        assert_eq!(changeset.releases[1].change_types[0].category, "Changed");
        assert_eq!(changeset.releases[2].change_types[0].category, "Changed");
    }

    #[test]
    fn unrecognized_bump_token_classifies_as_major() {
        let content = "---\n\"pkg-a\": gigantic\n---\n";

        let changeset = parse_document(content).expect("should parse");

        assert_eq!(changeset.releases[0].bump_type, BumpType::Major);
    }

    #[test]
    fn missing_opening_delimiter_is_an_error() {
        let result = parse_document("\"pkg-a\": patch\n---\n");

        assert!(matches!(result, Err(ParseError::MissingOpeningDelimiter)));
    }

    #[test]
    fn missing_closing_delimiter_is_an_error() {
        let result = parse_document("---\n\"pkg-a\": patch\n");

        assert!(matches!(result, Err(ParseError::MissingClosingDelimiter)));
    }

    #[test]
    fn malformed_release_line_is_an_error() {
        let result = parse_document("---\npkg-a = patch\n---\n");

        assert!(
            matches!(result, Err(ParseError::InvalidReleaseLine { line }) if line == "pkg-a = patch")
        );
    }

    #[test]
    fn rendered_document_reads_back() {
        let mut original = Changeset::new(vec![
            Release::new("pkg-a", BumpType::Minor).with_change_types(vec![ChangeType {
                category: "Added".to_string(),
                description: "new flag".to_string(),
            }]),
        ]);
        original.summary = "adds a flag".to_string();

        let parsed =
            parse_document(&crate::render_document(&original, false)).expect("should parse");

        assert_eq!(parsed.releases, original.releases);
        assert_eq!(parsed.summary, original.summary);
    }
}
