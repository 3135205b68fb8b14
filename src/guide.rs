use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::index::EntityIndex;
use crate::record::{RecordValue, Scalar};

/// Reserved key naming the list-items child in the JSON view.
const LIST_ITEMS_KEY: &str = "[list items]";
/// Reserved key carrying the filter templates in the JSON view.
const FILTERS_KEY: &str = "__filters__";

/// One node of the search-guide tree: the merged shape of every indexed
/// record, used to suggest valid field paths and ready-to-use filters.
///
/// The tree is purely derived — rebuild it whenever the index changes; an
/// unchanged index always produces an equal tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GuideNode {
    /// Child nodes keyed by normalized field name.
    pub children: BTreeMap<String, GuideNode>,
    /// Ready-to-use filter strings discoverable at this node.
    pub filters: BTreeSet<String>,
    /// Present when the field held a list; describes the items' shape.
    pub items: Option<Box<GuideNode>>,
}

impl GuideNode {
    /// Serializes the tree into the reserved-key JSON shape consumed by
    /// browsing UIs: child names map to sub-trees, `"[list items]"` holds
    /// the item shape and `"__filters__"` lists the templates.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, child) in &self.children {
            object.insert(name.clone(), child.to_json());
        }
        if let Some(items) = &self.items {
            object.insert(LIST_ITEMS_KEY.to_string(), items.to_json());
        }
        if !self.filters.is_empty() {
            object.insert(
                FILTERS_KEY.to_string(),
                Value::Array(
                    self.filters
                        .iter()
                        .map(|template| Value::String(template.clone()))
                        .collect(),
                ),
            );
        }
        Value::Object(object)
    }
}

/// Merges the shapes of all records in `index` into a fresh guide tree.
/// The index itself is never mutated.
#[must_use]
pub fn build_guide(index: &EntityIndex) -> GuideNode {
    let mut root = GuideNode::default();
    let mut path = Vec::new();
    for (_, record) in index.iter() {
        merge(&mut root, record, &mut path);
    }
    root
}

fn merge(node: &mut GuideNode, value: &RecordValue, path: &mut Vec<String>) {
    match value {
        RecordValue::Map(entries) => {
            for (key, child) in entries {
                let norm_key = textnorm::normalize(key);
                path.push(norm_key.clone());
                let branch = node.children.entry(norm_key).or_default();
                merge(branch, child, path);
                path.pop();
            }
        }
        RecordValue::List(items) => {
            let list_node = node.items.get_or_insert_with(Default::default);
            let mut displays = BTreeSet::new();
            for item in items {
                if matches!(item, RecordValue::Map(_)) {
                    if let Some(display) = item_display(item) {
                        displays.insert(display);
                    }
                }
                // Items still merge generically so nested shapes stay
                // discoverable; the path is the list's own path.
                merge(list_node, item, path);
            }
            if !path.is_empty() {
                for display in displays {
                    list_node
                        .filters
                        .insert(format!("@{}({display})", path.join(".")));
                }
            }
        }
        RecordValue::Scalar(_) => match path.as_slice() {
            [] => {}
            [only] => {
                node.filters.insert(format!("@{only}"));
            }
            [front @ .., last] => {
                node.filters.insert(format!("@{}({last})", front.join(".")));
            }
        },
    }
}

// A human-readable label for a list item, looked up as `name`, else `key`,
// else `tag` (empty candidates fall through), with a `[unit]` or value
// suffix for readability when the item carries one.
fn item_display(item: &RecordValue) -> Option<String> {
    let candidate = ["name", "key", "tag"]
        .iter()
        .find_map(|field| item.get_normalized(field).filter(|value| !is_falsy(value)))?;
    let text = candidate.as_str()?;

    let mut display = text.trim().to_string();
    if display.is_empty() {
        display = textnorm::normalize(text);
    }

    let unit = ["unit", "units"]
        .iter()
        .find_map(|field| item.get_normalized(field).filter(|value| !is_falsy(value)))
        .and_then(RecordValue::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty());
    if let Some(unit) = unit {
        display = format!("{display} [{unit}]");
    } else if let Some(value) = item
        .get_normalized("value")
        .and_then(RecordValue::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        display = format!("{display} {value}");
    }

    Some(display)
}

fn is_falsy(value: &RecordValue) -> bool {
    match value {
        RecordValue::Scalar(Scalar::Str(text)) => text.is_empty(),
        RecordValue::Scalar(Scalar::Bool(flag)) => !flag,
        RecordValue::Scalar(Scalar::Null) => true,
        RecordValue::Scalar(Scalar::Num(num)) => num.as_f64() == Some(0.0),
        RecordValue::List(items) => items.is_empty(),
        RecordValue::Map(entries) => entries.is_empty(),
    }
}
