//! Breakpoint diff compression.
//!
//! The widest breakpoint of a sequence keeps its complete bag. Every narrower
//! breakpoint keeps only the properties that changed relative to the nearest
//! wider one, and breakpoints that changed nothing are dropped.

use ns_model::{Breakpoints, ByBreakpoint};
use serde_json::{Map, Value};

/// Properties of `narrower` that differ from `wider`
pub fn diff_bag(wider: &Map<String, Value>, narrower: &Map<String, Value>) -> Map<String, Value> {
    narrower
        .iter()
        .filter(|(prop, value)| wider.get(*prop) != Some(*value))
        .map(|(prop, value)| (prop.clone(), value.clone()))
        .collect()
}

/// Compress bags given in cascade order (widest first)
pub fn compress(bags: &[(String, Map<String, Value>)]) -> ByBreakpoint {
    let mut compressed = ByBreakpoint::new();
    let mut previous: Option<&Map<String, Value>> = None;

    for (breakpoint, bag) in bags {
        match previous {
            None => {
                compressed.insert(breakpoint.clone(), Value::Object(bag.clone()));
            }
            Some(wider) => {
                let diff = diff_bag(wider, bag);
                if !diff.is_empty() {
                    compressed.insert(breakpoint.clone(), Value::Object(diff));
                }
            }
        }
        previous = Some(bag);
    }

    compressed
}

/// Rebuild the full bag at `breakpoint` from a compressed map by applying
/// every diff from the widest entry down to it.
pub fn expand_at(compressed: &ByBreakpoint, breakpoints: &Breakpoints, breakpoint: &str) -> Map<String, Value> {
    let mut bag = Map::new();
    let Some(target) = breakpoints.position(breakpoint) else {
        return bag;
    };

    for bp in breakpoints.iter().take(target + 1) {
        if let Some(Value::Object(entry)) = compressed.get(&bp.id) {
            for (prop, value) in entry {
                bag.insert(prop.clone(), value.clone());
            }
        }
    }
    bag
}

/// Whether a compressed map carries no declarations at all
pub fn is_blank(compressed: &ByBreakpoint) -> bool {
    compressed
        .values()
        .all(|entry| entry.as_object().map_or(true, Map::is_empty))
}
