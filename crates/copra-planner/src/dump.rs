//! Human-readable rendering of a path subtree, for diagnostics only.
//!
//! The cloner's fatal path embeds this dump so an out-of-sync registry can
//! be diagnosed from the error alone. Child ids are elided and replaced by
//! the children themselves, so two structurally identical trees render
//! identically even though their arena ids differ.

use copra_core::arena::PathArena;
use copra_core::id::PathId;
use copra_core::path::{ChildSlots, PathNode};
use serde_json::{json, Value};

/// Diagnostics must stay usable even on a corrupted tree, so rendering is
/// bounded and never errors; broken edges become marker strings.
const DUMP_DEPTH_LIMIT: usize = 64;

/// Render the subtree rooted at `id` as pretty-printed JSON.
pub fn dump_path(arena: &PathArena, id: PathId) -> String {
    let value = path_value(arena, id, 0);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "<unprintable path-node>".to_string())
}

fn path_value(arena: &PathArena, id: PathId, depth: usize) -> Value {
    if depth > DUMP_DEPTH_LIMIT {
        return Value::String("<truncated>".to_string());
    }
    let node = match arena.node(id) {
        Ok(node) => node,
        Err(_) => return Value::String(format!("<dangling {id}>")),
    };

    let kind = match (node.kind(), node) {
        (Some(k), _) => format!("{k:?}"),
        (None, PathNode::Unregistered(p)) => format!("Unregistered({})", p.tag),
        (None, _) => "<unknown>".to_string(),
    };

    let mut payload = payload_value(node);
    if let Value::Object(obj) = &mut payload {
        strip_child_ids(obj);
    }

    let mut children = Vec::new();
    if let Ok(slots) = node.children() {
        match slots {
            ChildSlots::Leaf | ChildSlots::Single(None) => {}
            ChildSlots::Single(Some(child)) => {
                children.push(path_value(arena, child, depth + 1));
            }
            ChildSlots::Pair { outer, inner } => {
                children.push(path_value(arena, outer, depth + 1));
                children.push(path_value(arena, inner, depth + 1));
            }
            ChildSlots::Many(subpaths) => {
                for &subpath in subpaths {
                    children.push(path_value(arena, subpath, depth + 1));
                }
            }
        }
    }

    // Device-join inner sides live outside the generic child list; dump them
    // inline next to their join metadata.
    if let PathNode::DeviceJoin(p) = node {
        if let Some(Value::Array(slots)) = payload.get_mut("inners") {
            for (slot, inner) in slots.iter_mut().zip(&p.inners) {
                if let Value::Object(m) = slot {
                    m.insert(
                        "scan_path".to_string(),
                        path_value(arena, inner.scan_path, depth + 1),
                    );
                }
            }
        }
    }

    json!({
        "kind": kind,
        "node": payload,
        "children": children,
    })
}

/// Serialize the payload struct, unwrapping serde's enum tagging.
fn payload_value(node: &PathNode) -> Value {
    match serde_json::to_value(node) {
        Ok(Value::Object(tagged)) if tagged.len() == 1 => {
            tagged.into_iter().next().map(|(_, v)| v).unwrap_or(Value::Null)
        }
        Ok(other) => other,
        Err(_) => Value::String("<unserializable payload>".to_string()),
    }
}

/// Drop raw child-slot ids from a serialized payload; the rendered children
/// stand in for them.
fn strip_child_ids(obj: &mut serde_json::Map<String, Value>) {
    for key in [
        "subpath",
        "fdw_outer",
        "outer",
        "inner",
        "left",
        "right",
        "subpaths",
    ] {
        obj.remove(key);
    }
    if let Some(Value::Object(join)) = obj.get_mut("join") {
        join.remove("outer");
        join.remove("inner");
    }
    if let Some(Value::Object(cpath)) = obj.get_mut("cpath") {
        cpath.remove("subpaths");
    }
    if let Some(Value::Array(inners)) = obj.get_mut("inners") {
        for slot in inners {
            if let Value::Object(m) = slot {
                m.remove("scan_path");
            }
        }
    }
}
