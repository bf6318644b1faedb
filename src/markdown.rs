//! Relationship codec for the text representation, plus the generic
//! heading locator / section slicer it is built on.
//!
//! The human-edited representation is a bullet list under a "Related"
//! heading:
//!
//! ```text
//! ## Related
//! - friend [[Jane Doe]]
//! - mother [[Maria]]
//! ```
//!
//! Headings are located by an explicit line-indexed scan rather than a
//! regex: a line of 1-6 `#` characters, whitespace, then the section name,
//! matched case-insensitively. A section runs from its heading to the next
//! heading of any level or the end of the document.

use crate::relationship::Relationship;

/// Name of the section holding the relationship list.
pub const RELATED_HEADING: &str = "Related";

/// A located heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Byte offset of the start of the heading line.
    pub start: usize,

    /// Byte offset just past the heading line (past its newline).
    pub line_end: usize,

    /// Heading depth, 1-6.
    pub level: usize,

    /// The matched heading line text, without the trailing newline.
    pub text: String,
}

/// Find the first heading line whose title matches `name`
/// case-insensitively, at any depth.
pub fn locate_heading(text: &str, name: &str) -> Option<Heading> {
    let target = name.trim().to_lowercase();
    let mut start = 0;

    while start < text.len() {
        let rest = &text[start..];
        let (line, next) = match rest.find('\n') {
            Some(i) => (&rest[..i], start + i + 1),
            None => (rest, text.len()),
        };

        if let Some((level, title)) = heading_line(line) {
            if title.to_lowercase() == target {
                return Some(Heading {
                    start,
                    line_end: next,
                    level,
                    text: line.trim_end().to_string(),
                });
            }
        }

        start = next;
    }

    None
}

/// Parse the relationship list from a contact document.
///
/// A missing "Related" heading yields an empty list, not an error. Every
/// parsed entry is a forward reference: `Namespace::Name` with an empty
/// identifier, pending resolution by the caller.
pub fn parse(text: &str) -> Vec<Relationship> {
    section_body(text, RELATED_HEADING)
        .map(|body| body.lines().filter_map(parse_item).collect())
        .unwrap_or_default()
}

/// Render a relationship list as a heading plus bullets, one per
/// relationship in input order.
///
/// An empty input yields an empty string; callers must omit the section
/// entirely rather than write a bare heading.
pub fn generate(relationships: &[Relationship]) -> String {
    if relationships.is_empty() {
        return String::new();
    }

    let mut block = format!("## {RELATED_HEADING}\n");
    for rel in relationships {
        block.push_str(&format!("- {} [[{}]]\n", rel.kind, rel.display_target()));
    }
    block
}

/// The body of a named section: everything between its heading line and
/// the next heading of any level (or end of text).
pub fn section_body<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let heading = locate_heading(text, name)?;
    let end = section_end(text, heading.line_end);
    Some(&text[heading.line_end..end])
}

/// Replace a named section's body with `block`'s, or append the whole
/// block after a blank-line separator when the heading is absent.
///
/// `block` carries its own heading line (as produced by [`generate`]).
/// When the section already exists, that heading line is dropped and the
/// document's own heading line is kept as written, whatever its depth or
/// casing; only the body between it and the next heading is replaced.
/// An empty block leaves the document untouched: no bare heading is ever
/// introduced, and an existing section is not cleared. Content outside
/// the section is never modified.
pub fn upsert_section(text: &str, name: &str, block: &str) -> String {
    let block = block.trim_end();
    if block.is_empty() {
        return text.to_string();
    }

    match locate_heading(text, name) {
        Some(heading) => {
            let body = match block.split_once('\n') {
                Some((first, rest)) if heading_line(first).is_some() => rest,
                None if heading_line(block).is_some() => "",
                _ => block,
            };
            let end = section_end(text, heading.line_end);
            let mut out = String::with_capacity(text.len() + body.len());
            out.push_str(&text[..heading.line_end]);
            out.push_str(body);
            if !body.is_empty() {
                out.push('\n');
            }
            if end < text.len() {
                out.push('\n');
            }
            out.push_str(&text[end..]);
            out
        }
        None => {
            let trimmed = text.trim_end();
            if trimmed.is_empty() {
                format!("{block}\n")
            } else {
                format!("{trimmed}\n\n{block}\n")
            }
        }
    }
}

/// Byte offset of the next heading line at or after `from`, or the end
/// of the text.
fn section_end(text: &str, from: usize) -> usize {
    let mut start = from;

    while start < text.len() {
        let rest = &text[start..];
        let (line, next) = match rest.find('\n') {
            Some(i) => (&rest[..i], start + i + 1),
            None => (rest, text.len()),
        };

        if heading_line(line).is_some() {
            return start;
        }

        start = next;
    }

    text.len()
}

/// Split a heading line into (depth, trimmed title). A heading is 1-6
/// `#` characters followed by at least one whitespace character.
fn heading_line(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &line[level..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }

    Some((level, rest.trim()))
}

/// Parse a single `- <type> [[<Name>]]` bullet.
fn parse_item(line: &str) -> Option<Relationship> {
    let rest = line.trim_start().strip_prefix("- ")?;

    let open = rest.find("[[")?;
    let inner = &rest[open + 2..];
    let close = inner.find("]]")?;

    let kind = rest[..open].trim();
    let name = inner[..close].trim();
    if kind.is_empty() || name.is_empty() {
        return None;
    }

    Relationship::display_name(kind, name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
# Jane Doe

Some notes.

## Related
- friend [[Alice]]
- Mother [[Maria]]

not a bullet

## Contact
- phone: 555-1234
";

    #[test]
    fn test_locate_heading_case_insensitive_any_depth() {
        let heading = locate_heading(DOC, "related").unwrap();
        assert_eq!(heading.level, 2);
        assert_eq!(heading.text, "## Related");
        assert_eq!(&DOC[heading.start..heading.line_end], "## Related\n");

        let heading = locate_heading("### RELATED\n", "Related").unwrap();
        assert_eq!(heading.level, 3);
    }

    #[test]
    fn test_locate_heading_requires_heading_shape() {
        assert!(locate_heading("Related\n", "Related").is_none());
        assert!(locate_heading("#Related\n", "Related").is_none());
        assert!(locate_heading("####### Related\n", "Related").is_none());
        assert!(locate_heading("text mentioning ## Related\n", "Related").is_none());
    }

    #[test]
    fn test_first_matching_heading_wins() {
        let text = "## Related\n- a [[X]]\n\n## Related\n- b [[Y]]\n";
        let heading = locate_heading(text, "Related").unwrap();
        assert_eq!(heading.start, 0);
    }

    #[test]
    fn test_parse_related_section() {
        let rels = parse(DOC);
        assert_eq!(rels.len(), 2);

        assert_eq!(rels[0].kind, "friend");
        assert_eq!(rels[0].target_name.as_deref(), Some("Alice"));
        assert_eq!(rels[0].target_uid, "");
        assert_eq!(rels[0].namespace, Namespace::Name);

        // Type is case-folded as written, not normalized here.
        assert_eq!(rels[1].kind, "mother");
        assert_eq!(rels[1].target_name.as_deref(), Some("Maria"));
    }

    #[test]
    fn test_parse_without_heading_is_empty() {
        assert!(parse("# Jane\n\nNo related section.\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_skips_malformed_bullets() {
        let text = "## Related\n- friend [[Alice]]\n- broken\n- [[NoType]]\n- friend [[]]\n";
        let rels = parse(text);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].target_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_generate_empty_is_empty_string() {
        assert_eq!(generate(&[]), "");
    }

    #[test]
    fn test_generate_block_shape() {
        let rels = vec![
            Relationship::display_name("friend", "Alice").unwrap(),
            Relationship::uid("colleague", "uid-bob"),
        ];
        assert_eq!(
            generate(&rels),
            "## Related\n- friend [[Alice]]\n- colleague [[uid-bob]]\n"
        );
    }

    #[test]
    fn test_upsert_replaces_only_the_section() {
        let block = "## Related\n- sibling [[Ann]]\n";
        let updated = upsert_section(DOC, "Related", block);

        assert!(updated.contains("- sibling [[Ann]]"));
        assert!(!updated.contains("[[Alice]]"));
        // Other sections are untouched.
        assert!(updated.contains("## Contact\n- phone: 555-1234"));
        assert!(updated.contains("Some notes."));
    }

    #[test]
    fn test_upsert_keeps_existing_heading_line_as_written() {
        // A lower-cased level-3 heading stays exactly as the user wrote
        // it; only the bullets underneath are replaced.
        let text = "### related\n- friend [[Old]]\n\n## Notes\nkeep\n";
        let updated = upsert_section(text, "Related", "## Related\n- friend [[New]]\n");
        assert_eq!(updated, "### related\n- friend [[New]]\n\n## Notes\nkeep\n");
    }

    #[test]
    fn test_upsert_appends_when_heading_absent() {
        let updated = upsert_section("# Jane\n\nNotes.\n", "Related", "## Related\n- a [[X]]\n");
        assert_eq!(updated, "# Jane\n\nNotes.\n\n## Related\n- a [[X]]\n");
    }

    #[test]
    fn test_upsert_empty_block_never_adds_heading() {
        assert_eq!(upsert_section("# Jane\n", "Related", ""), "# Jane\n");
        assert_eq!(upsert_section("", "Related", ""), "");
        // An existing section is left alone rather than cleared.
        assert_eq!(upsert_section(DOC, "Related", ""), DOC);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let block = "## Related\n- mother [[Maria]]\n";
        let once = upsert_section(DOC, "Related", block);
        let twice = upsert_section(&once, "Related", block);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_upsert_other_sections() {
        let block = "## Contact\n- email: jane@example.com\n";
        let updated = upsert_section(DOC, "Contact", block);
        assert!(updated.contains("- email: jane@example.com"));
        assert!(!updated.contains("555-1234"));
        assert!(updated.contains("- friend [[Alice]]"));
    }
}
