//! Terraform JSON (`.tf.json`) tagging on a parsed value
//!
//! Unlike the line engine this path re-serializes the whole document:
//! member order is kept, whitespace is normalised to two-space
//! indentation, and the file's line ending and trailing newline survive.

use crate::document::Document;
use crate::engine::{PatchStats, TextOutcome};
use crate::error::{Error, Result};
use crate::rules::{RequiredTag, ResourceRules};
use serde_json::{Map, Value};
use tracing::debug;

/// Add missing tags to every allow-listed `resource.<type>.<name>` entry.
pub fn patch_terraform_json(source: &str, rules: &ResourceRules, tags: &[RequiredTag]) -> Result<TextOutcome> {
    let mut root: Value = serde_json::from_str(source)?;
    if !root.is_object() {
        return Err(Error::parse("Terraform JSON", "top-level value is not an object"));
    }

    let mut stats = PatchStats::default();
    if let Some(Value::Object(by_type)) = root.get_mut("resource") {
        for (resource_type, instances) in by_type.iter_mut() {
            let Value::Object(instances) = instances else {
                continue;
            };
            let eligible = rules.classify(Some(resource_type)).is_eligible();
            for (name, body) in instances.iter_mut() {
                stats.resources += 1;
                if !eligible {
                    continue;
                }
                stats.eligible += 1;
                let Value::Object(body) = body else {
                    debug!(%resource_type, %name, "resource body is not an object");
                    continue;
                };
                let added = ensure_tag_map(body, tags);
                if added > 0 {
                    stats.patched += 1;
                    stats.entries_added += added;
                }
            }
        }
    }

    if !stats.changed() {
        return Ok(TextOutcome { text: None, stats });
    }

    let original = Document::parse(source);
    let pretty = serde_json::to_string_pretty(&root)?;
    let lines = pretty.split('\n').map(String::from).collect();
    Ok(TextOutcome {
        text: Some(original.with_lines(lines).render()),
        stats,
    })
}

fn ensure_tag_map(body: &mut Map<String, Value>, tags: &[RequiredTag]) -> usize {
    let existing = body.entry("tags").or_insert(Value::Null);
    if existing.is_null() {
        *existing = Value::Object(Map::new());
    }
    let Value::Object(existing) = existing else {
        debug!("tags is not an object, leaving it alone");
        return 0;
    };

    let mut added = 0;
    for tag in tags {
        if !existing.contains_key(&tag.key) {
            existing.insert(tag.key.clone(), Value::String(tag.value.clone()));
            added += 1;
        }
    }
    added
}
