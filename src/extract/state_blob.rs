//! Strategy C: deep search of the embedded state blob.
//!
//! Depth-first pre-order walk of the parsed JSON: objects are checked
//! before their values are descended into, arrays element by element.
//! An object matches when any handle-like key holds a string containing
//! the identifier. First match wins and the walk stops. No cycle
//! protection — serialized page state is a tree, not a graph.

use crate::config::HANDLE_KEYS;
use crate::page::LoadedPage;
use crate::report::{CandidateRecord, Identifier};
use serde_json::{Map, Value};

pub fn find(page: &LoadedPage, id: &Identifier) -> Option<CandidateRecord> {
    let state = page.state.as_ref()?;
    walk(state, id).map(|v| CandidateRecord::StateObject(v.clone()))
}

fn walk<'a>(value: &'a Value, id: &Identifier) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if object_matches(map, id) {
                return Some(value);
            }
            map.values().find_map(|v| walk(v, id))
        }
        Value::Array(items) => items.iter().find_map(|v| walk(v, id)),
        _ => None,
    }
}

fn object_matches(map: &Map<String, Value>, id: &Identifier) -> bool {
    HANDLE_KEYS.iter().any(|key| {
        map.get(*key)
            .and_then(Value::as_str)
            .is_some_and(|s| id.matches(s))
    })
}
