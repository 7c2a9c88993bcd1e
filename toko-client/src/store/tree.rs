//! Slash-path operations on a JSON tree
//!
//! Shared by the in-memory store and the REST store's local replica.
//! Semantics follow the remote database: intermediate objects are created
//! on demand, writing `null` deletes a node, and non-object nodes are
//! replaced when a write descends through them.

use serde_json::{Map, Value};

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just made an object"),
    }
}

/// Read the node at `path`. Empty path returns the root itself.
pub(crate) fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for seg in segments(path) {
        node = node.as_object()?.get(seg)?;
    }
    Some(node)
}

/// Overwrite the subtree at `path`. `Value::Null` deletes the node; the
/// root itself degrades to an empty object rather than disappearing.
pub(crate) fn set_at(root: &mut Value, path: &str, value: Value) {
    let segs: Vec<&str> = segments(path).collect();
    let Some((last, parents)) = segs.split_last() else {
        *root = if value.is_null() {
            Value::Object(Map::new())
        } else {
            value
        };
        return;
    };

    let mut node = root;
    for seg in parents {
        // descending through a deleted branch on a delete is a no-op
        if value.is_null() && get_child(node, seg).is_none() {
            return;
        }
        let map = ensure_object(node);
        node = map
            .entry(seg.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    let map = ensure_object(node);
    if value.is_null() {
        map.remove(*last);
    } else {
        map.insert((*last).to_string(), value);
    }
}

fn get_child<'a>(node: &'a Value, seg: &str) -> Option<&'a Value> {
    node.as_object().and_then(|map| map.get(seg))
}

/// Shallow merge of `fields` into the object at `path`. A `null` field
/// value deletes that field.
pub(crate) fn merge_at(root: &mut Value, path: &str, fields: &Map<String, Value>) {
    let segs: Vec<&str> = segments(path).collect();
    let mut node = root;
    for seg in &segs {
        let map = ensure_object(node);
        node = map
            .entry((*seg).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    let map = ensure_object(node);
    for (key, value) in fields {
        if value.is_null() {
            map.remove(key);
        } else {
            map.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_creates_intermediate_objects() {
        let mut root = json!({});
        set_at(&mut root, "transactions/A1", json!({"total": 21000}));
        assert_eq!(root, json!({"transactions": {"A1": {"total": 21000}}}));
    }

    #[test]
    fn set_null_deletes_node() {
        let mut root = json!({"transactions": {"A1": {}, "A2": {}}});
        set_at(&mut root, "transactions/A1", Value::Null);
        assert_eq!(root, json!({"transactions": {"A2": {}}}));
    }

    #[test]
    fn set_null_on_missing_branch_is_noop() {
        let mut root = json!({});
        set_at(&mut root, "transactions/A1", Value::Null);
        assert_eq!(root, json!({}));
    }

    #[test]
    fn root_set_replaces_everything() {
        let mut root = json!({"a": 1});
        set_at(&mut root, "", json!({"b": 2}));
        assert_eq!(root, json!({"b": 2}));
        set_at(&mut root, "/", Value::Null);
        assert_eq!(root, json!({}));
    }

    #[test]
    fn merge_keeps_siblings() {
        let mut root = json!({"transactions": {"A1": {"status": "pending", "total": 100}}});
        let fields = json!({"status": "paid", "proofUrl": "u"});
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        merge_at(&mut root, "transactions/A1", &fields);
        assert_eq!(
            root,
            json!({"transactions": {"A1": {"status": "paid", "total": 100, "proofUrl": "u"}}})
        );
    }

    #[test]
    fn merge_null_field_deletes_it() {
        let mut root = json!({"settings": {"storeName": "X", "whatsapp": "1"}});
        let fields = json!({"whatsapp": null});
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        merge_at(&mut root, "settings", &fields);
        assert_eq!(root, json!({"settings": {"storeName": "X"}}));
    }

    #[test]
    fn get_walks_slash_paths() {
        let root = json!({"history": {"A1": {"status": "confirmed"}}});
        assert_eq!(get(&root, "history/A1/status"), Some(&json!("confirmed")));
        assert_eq!(get(&root, "history/A2"), None);
        assert_eq!(get(&root, ""), Some(&root));
    }
}
