//! Merging of top-level input documents
//!
//! Inputs are folded left to right. For each key of the incoming document:
//!
//! 1. A key absent (or null) in the accumulator is copied in.
//! 2. A null incoming value is ignored.
//! 3. Two mappings merge recursively.
//! 4. Two values of the same kind: the incoming value wins.
//! 5. Anything else is a [`Error::MergeTypeConflict`].

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::node::{NodeKind, render_key};

/// Fold a whole document into the accumulated one.
///
/// A null accumulator (nothing merged yet, or an empty first file) is
/// replaced outright; a null incoming document contributes nothing.
pub fn merge_documents(into: &mut Value, from: Value, source_label: &str) -> Result<()> {
    if into.is_null() {
        *into = from;
        return Ok(());
    }
    match (into, from) {
        (_, Value::Null) => Ok(()),
        (Value::Mapping(into_map), Value::Mapping(from_map)) => {
            merge_mapping(into_map, from_map, source_label, "")
        }
        (into, from) => replace_if_same_kind(into, from, source_label, ""),
    }
}

/// Merge `from` into `into` in place.
///
/// `path_prefix` is the slash-joined key path of `into` within its document,
/// ending in `/` unless empty.
pub fn merge_mapping(
    into: &mut Mapping,
    from: Mapping,
    source_label: &str,
    path_prefix: &str,
) -> Result<()> {
    for (key, from_value) in from {
        match into.get_mut(&key) {
            None | Some(Value::Null) => {
                into.insert(key, from_value);
            }
            Some(_) if from_value.is_null() => {}
            Some(into_value) => match (into_value, from_value) {
                (Value::Mapping(into_child), Value::Mapping(from_child)) => {
                    let prefix = format!("{}{}/", path_prefix, key_label(&key));
                    merge_mapping(into_child, from_child, source_label, &prefix)?;
                }
                (into_value, from_value) => {
                    let path = format!("{}{}", path_prefix, key_label(&key));
                    replace_if_same_kind(into_value, from_value, source_label, &path)?;
                }
            },
        }
    }
    Ok(())
}

fn replace_if_same_kind(
    into: &mut Value,
    from: Value,
    source_label: &str,
    path: &str,
) -> Result<()> {
    let into_kind = NodeKind::of(into);
    let from_kind = NodeKind::of(&from);
    if into_kind != from_kind {
        return Err(Error::MergeTypeConflict {
            source_label: source_label.to_string(),
            path: path.to_string(),
            from_kind,
            into_kind,
        });
    }
    *into = from;
    Ok(())
}

fn key_label(key: &Value) -> String {
    render_key(key).unwrap_or_else(|| format!("{:?}", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(source: &str) -> Value {
        serde_yaml::from_str(source).unwrap()
    }

    fn merged(into: &str, from: &str) -> Result<Value> {
        let mut into = yaml(into);
        merge_documents(&mut into, yaml(from), "b.yaml")?;
        Ok(into)
    }

    #[test]
    fn nested_mappings_merge() {
        let result = merged("k: {x: 1}", "k: {y: 2}").unwrap();
        assert_eq!(result, yaml("k: {x: 1, y: 2}"));
    }

    #[test]
    fn same_kind_scalars_are_replaced() {
        let result = merged("a: 1\nb: x", "a: 2.5\nb: y").unwrap();
        assert_eq!(result, yaml("a: 2.5\nb: y"));
    }

    #[test]
    fn sequences_are_replaced_not_concatenated() {
        let result = merged("tags: [a, b]", "tags: [c]").unwrap();
        assert_eq!(result, yaml("tags: [c]"));
    }

    #[test]
    fn null_incoming_value_is_ignored() {
        let result = merged("a: 1", "a: ~").unwrap();
        assert_eq!(result, yaml("a: 1"));
    }

    #[test]
    fn null_existing_value_is_filled() {
        let result = merged("a: ~", "a: [1]").unwrap();
        assert_eq!(result, yaml("a: [1]"));
    }

    #[test]
    fn new_keys_append_in_order() {
        let result = merged("b: 1\na: 2", "c: 3\na: 4").unwrap();
        let keys: Vec<_> = result
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn kind_mismatch_reports_label_path_and_kinds() {
        let err = merged("paths: {/login: {get: a}}", "paths: {/login: {get: 3}}").unwrap_err();
        match &err {
            Error::MergeTypeConflict {
                source_label,
                path,
                from_kind,
                into_kind,
            } => {
                assert_eq!(source_label, "b.yaml");
                assert_eq!(path, "paths//login/get");
                assert_eq!(*from_kind, NodeKind::Number);
                assert_eq!(*into_kind, NodeKind::String);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "Could not merge b.yaml#paths//login/get (number) into merged object (string)"
        );
    }

    #[test]
    fn mapping_over_scalar_conflicts() {
        assert!(matches!(
            merged("k: a", "k: {x: 1}"),
            Err(Error::MergeTypeConflict { .. })
        ));
    }

    #[test]
    fn null_accumulator_takes_first_document() {
        let mut into = Value::Null;
        merge_documents(&mut into, yaml("a: 1"), "a.yaml").unwrap();
        assert_eq!(into, yaml("a: 1"));
    }

    #[test]
    fn top_level_kind_mismatch_conflicts_at_root() {
        let err = merged("a: 1", "[1, 2]").unwrap_err();
        assert!(matches!(err, Error::MergeTypeConflict { ref path, .. } if path.is_empty()));
    }
}
