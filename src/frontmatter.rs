//! Relationship codec for the structured-field representation.
//!
//! Relationships live in the contact's field map under dotted keys:
//! `RELATED.<TYPE>` for the sole relationship of a type, or
//! `RELATED.<TYPE>.<index>` (zero-based, contiguous) when several
//! relationships share a type. The dotted key is purely a serialization
//! concern of this codec; everything else works on `Relationship` records.

use indexmap::IndexMap;

use crate::contact::RELATED_PREFIX;
use crate::namespace::{format_reference, parse_reference};
use crate::relationship::Relationship;

/// Parse relationships out of a contact's structured fields.
///
/// Keys not matching the `RELATED.<type>[.<index>]` shape are ignored.
/// Output order follows the field map's iteration order.
pub fn parse(fields: &IndexMap<String, String>) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for (key, value) in fields {
        let Some((kind, _index)) = parse_key(key) else {
            continue;
        };
        let reference = parse_reference(value);
        relationships.push(Relationship {
            kind,
            target_uid: reference.value.to_string(),
            target_name: None,
            namespace: reference.namespace,
        });
    }

    relationships
}

/// Project a relationship list into structured-field form.
///
/// Relationships are grouped by upper-cased type; a group of one emits a
/// bare `RELATED.<TYPE>` key, larger groups emit contiguous zero-based
/// indices in input order. This is a pure projection; callers wanting
/// replacement semantics must [`strip`] existing keys first.
pub fn generate(relationships: &[Relationship]) -> IndexMap<String, String> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    for rel in relationships {
        groups
            .entry(rel.kind.to_uppercase())
            .or_default()
            .push(format_reference(rel));
    }

    let mut fields = IndexMap::new();
    for (kind, references) in groups {
        if references.len() == 1 {
            let reference = references.into_iter().next().unwrap_or_default();
            fields.insert(format!("{RELATED_PREFIX}.{kind}"), reference);
        } else {
            for (index, reference) in references.into_iter().enumerate() {
                fields.insert(format!("{RELATED_PREFIX}.{kind}.{index}"), reference);
            }
        }
    }

    fields
}

/// Remove every relationship key from a field map.
pub fn strip(fields: &mut IndexMap<String, String>) {
    fields.retain(|key, _| parse_key(key).is_none());
}

/// Whether any relationship key is present.
pub fn has_related(fields: &IndexMap<String, String>) -> bool {
    fields.keys().any(|key| parse_key(key).is_some())
}

/// Split a field key into its lowercase relationship type and optional
/// index. Returns `None` for keys outside the relationship key space.
fn parse_key(key: &str) -> Option<(String, Option<usize>)> {
    let rest = key.strip_prefix(RELATED_PREFIX)?.strip_prefix('.')?;
    if rest.is_empty() {
        return None;
    }

    if let Some((kind, tail)) = rest.rsplit_once('.') {
        if let Ok(index) = tail.parse::<usize>() {
            if kind.is_empty() {
                return None;
            }
            return Some((kind.to_lowercase(), Some(index)));
        }
    }

    Some((rest.to_lowercase(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;
    use pretty_assertions::assert_eq;

    fn fields_of(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_bare_and_indexed_keys() {
        let fields = fields_of(&[
            ("UID", "urn:uuid:me"),
            ("RELATED.FRIEND.0", "uid:a"),
            ("RELATED.FRIEND.1", "name:Jane Doe"),
            ("RELATED.PARENT", "urn:uuid:1234"),
            ("N.GIVEN", "Jane"),
        ]);

        let rels = parse(&fields);
        assert_eq!(rels.len(), 3);

        assert_eq!(rels[0].kind, "friend");
        assert_eq!(rels[0].target_uid, "a");
        assert_eq!(rels[0].namespace, Namespace::Uid);

        assert_eq!(rels[1].kind, "friend");
        assert_eq!(rels[1].target_uid, "Jane Doe");
        assert_eq!(rels[1].namespace, Namespace::Name);

        assert_eq!(rels[2].kind, "parent");
        assert_eq!(rels[2].target_uid, "1234");
        assert_eq!(rels[2].namespace, Namespace::UrnUuid);
    }

    #[test]
    fn test_parse_ignores_non_matching_keys() {
        let fields = fields_of(&[("RELATED", "uid:x"), ("RELATED.", "uid:y"), ("OTHER", "z")]);
        assert!(parse(&fields).is_empty());
        assert!(!has_related(&fields));
    }

    #[test]
    fn test_generate_singleton_emits_bare_key() {
        let rels = vec![Relationship::uid("friend", "a")];
        let fields = generate(&rels);
        assert_eq!(fields.get("RELATED.FRIEND").map(String::as_str), Some("uid:a"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_generate_multi_valued_scenario() {
        let rels = vec![
            Relationship::uid("friend", "a"),
            Relationship::uid("friend", "b"),
        ];
        let fields = generate(&rels);

        let expected = fields_of(&[("RELATED.FRIEND.0", "uid:a"), ("RELATED.FRIEND.1", "uid:b")]);
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_generate_mixed_types_keep_input_order() {
        let rels = vec![
            Relationship::uid("friend", "a"),
            Relationship::urn_uuid("parent", "p"),
            Relationship::uid("friend", "b"),
        ];
        let fields = generate(&rels);

        let keys: Vec<_> = fields.keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["RELATED.FRIEND.0", "RELATED.FRIEND.1", "RELATED.PARENT"]
        );
        assert_eq!(fields["RELATED.FRIEND.0"], "uid:a");
        assert_eq!(fields["RELATED.FRIEND.1"], "uid:b");
        assert_eq!(fields["RELATED.PARENT"], "urn:uuid:p");
    }

    #[test]
    fn test_round_trip_preserves_triples() {
        let rels = vec![
            Relationship::uid("friend", "a"),
            Relationship::uid("friend", "b"),
            Relationship::urn_uuid("parent", "p"),
            Relationship::uid("colleague", "c"),
        ];

        let parsed = parse(&generate(&rels));

        let mut expected: Vec<_> = rels
            .iter()
            .map(|r| (r.kind.clone(), r.namespace, r.target_uid.clone()))
            .collect();
        let mut actual: Vec<_> = parsed
            .iter()
            .map(|r| (r.kind.clone(), r.namespace, r.target_uid.clone()))
            .collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_strip_removes_only_related_keys() {
        let mut fields = fields_of(&[
            ("UID", "urn:uuid:me"),
            ("RELATED.FRIEND.0", "uid:a"),
            ("RELATED.PARENT", "uid:b"),
            ("FN", "Jane"),
        ]);

        strip(&mut fields);

        let keys: Vec<_> = fields.keys().cloned().collect();
        assert_eq!(keys, vec!["UID", "FN"]);
    }
}
