// File: src/pointer.rs
// Purpose: Pointer normalization and deep assignment into the validated tree

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Suffix the rule engine appends to address a value itself rather than a
/// nested property of it
pub const TIP_MARKER: &str = ".::tip::";

/// Largest segment treated as an array index; bigger numbers are keys
pub const MAX_ARRAY_INDEX: usize = u32::MAX as usize - 1;

/// Most `null` holes a single write may add to an array. Writes further
/// out turn the array into an object keyed by index.
pub const MAX_ARRAY_GAP: usize = 1024;

/// Strip the first [`TIP_MARKER`] from a pointer
pub fn normalize(pointer: &str) -> Cow<'_, str> {
    match pointer.find(TIP_MARKER) {
        Some(at) => {
            let mut normalized = String::with_capacity(pointer.len() - TIP_MARKER.len());
            normalized.push_str(&pointer[..at]);
            normalized.push_str(&pointer[at + TIP_MARKER.len()..]);
            Cow::Owned(normalized)
        }
        None => Cow::Borrowed(pointer),
    }
}

/// One step of a parsed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    fn classify(raw: &str) -> Self {
        let canonical = raw == "0" || (!raw.starts_with('0') && !raw.is_empty());
        if canonical && raw.bytes().all(|b| b.is_ascii_digit()) {
            match raw.parse::<usize>() {
                Ok(index) if index <= MAX_ARRAY_INDEX => return Segment::Index(index),
                _ => {}
            }
        }
        Segment::Key(raw.to_string())
    }
}

/// Split a path such as `user.addresses.0.city` or `items[0]["name"]`
///
/// Empty keys are skipped. An unterminated bracket keeps the rest of the
/// path as a single key.
pub fn segments(path: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => flush(&mut segments, &mut current),
            '[' => {
                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(c);
                }
                if closed {
                    flush(&mut segments, &mut current);
                    segments.push(Segment::classify(strip_quotes(&inner)));
                } else {
                    current.push('[');
                    current.push_str(&inner);
                }
            }
            _ => current.push(c),
        }
    }
    flush(&mut segments, &mut current);

    segments
}

fn flush(segments: &mut Vec<Segment>, current: &mut String) {
    if !current.is_empty() {
        segments.push(Segment::classify(current));
        current.clear();
    }
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

/// Assign `value` at `path` inside `root`, creating containers on the way
///
/// Index segments create arrays (padded with `null`), keys create objects.
/// Primitives in the way are replaced; an array addressed by a key, or by an
/// index more than [`MAX_ARRAY_GAP`] past its end, becomes an object keyed
/// by its indices.
pub fn deep_set(root: &mut Value, path: &str, value: Value) {
    let segments = segments(path);
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut node = root;
    for (i, segment) in parents.iter().enumerate() {
        let slot = slot_mut(node, segment);
        if !slot.is_object() && !slot.is_array() {
            *slot = empty_container(&segments[i + 1]);
        }
        node = slot;
    }

    *slot_mut(node, last) = value;
}

fn empty_container(segment: &Segment) -> Value {
    match segment {
        Segment::Index(_) => Value::Array(Vec::new()),
        Segment::Key(_) => Value::Object(Map::new()),
    }
}

fn slot_mut<'a>(node: &'a mut Value, segment: &Segment) -> &'a mut Value {
    let too_sparse = match (segment, &*node) {
        (Segment::Key(_), Value::Array(_)) => true,
        (Segment::Index(index), Value::Array(items)) => {
            index.saturating_sub(items.len()) > MAX_ARRAY_GAP
        }
        _ => false,
    };
    if too_sparse {
        *node = array_to_object(node.take());
    }

    match (segment, node) {
        (Segment::Index(index), Value::Array(items)) => {
            if items.len() <= *index {
                let len = index.checked_add(1).unwrap_or(usize::MAX);
                items.resize(len, Value::Null);
            }
            &mut items[*index]
        }
        (Segment::Index(index), Value::Object(map)) => {
            map.entry(index.to_string()).or_insert(Value::Null)
        }
        (Segment::Key(key), Value::Object(map)) => map.entry(key.clone()).or_insert(Value::Null),
        (segment, other) => {
            *other = empty_container(segment);
            slot_mut(other, segment)
        }
    }
}

fn array_to_object(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
        ),
        other => other,
    }
}
