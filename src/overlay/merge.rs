//! Per-field combination policies applied when an overlay is in scope.
//!
//! Each document field has one fixed policy: replace, append, or merge-union.
//! Replacement needs no helper; the append and merge-union policies live
//! here so the assembler stays declarative.

use http::Method;
use std::collections::BTreeMap;

use super::types::ResponsesOverride;
use crate::schema::{
    default_status_for, ExampleSpec, OperationContext, ParameterSpec, ResponseKey, Responses,
};

/// Append policy for parameters: baseline first, override entries after.
/// Duplicates are kept, not deduplicated.
pub fn append_parameters(
    baseline: Vec<ParameterSpec>,
    extra: &[ParameterSpec],
) -> Vec<ParameterSpec> {
    let mut merged = baseline;
    merged.extend(extra.iter().cloned());
    merged
}

/// Append policy for examples, same ordering as parameters.
pub fn append_examples(baseline: Vec<ExampleSpec>, extra: &[ExampleSpec]) -> Vec<ExampleSpec> {
    let mut merged = baseline;
    merged.extend(extra.iter().cloned());
    merged
}

/// Filter policy: enabled substitutes the handler group's configured
/// backends for whatever discovery produced; disabled empties the list.
pub fn merged_filters(enabled: bool, cx: &OperationContext<'_>) -> Vec<String> {
    if enabled {
        cx.filter_backends().to_vec()
    } else {
        Vec::new()
    }
}

/// Merge-union policy for the response map.
///
/// A keyed override unions into a keyed baseline with override entries
/// winning on collision. A single-schema baseline is first wrapped under
/// the status code implied by the operation's method. Entries that resolve
/// to no value (`None` overrides, or nulls left in the union) are dropped
/// rather than emitted. A single-schema override replaces the baseline
/// wholesale.
pub fn merge_responses(
    baseline: Responses,
    overlay: &ResponsesOverride,
    method: &Method,
) -> Responses {
    match overlay {
        ResponsesOverride::Replace(schema) => Responses::Schema(schema.clone()),
        ResponsesOverride::ByStatus(entries) => {
            let mut merged = match baseline {
                Responses::Map(map) => map,
                Responses::Schema(schema) => {
                    let mut map = BTreeMap::new();
                    map.insert(ResponseKey::status(default_status_for(method)), schema);
                    map
                }
            };
            for (key, schema) in entries {
                match schema {
                    Some(schema) => {
                        merged.insert(key.clone(), schema.clone());
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
            merged.retain(|_, schema| !schema.is_null());
            Responses::Map(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn by_status(entries: &[(u16, Option<serde_json::Value>)]) -> ResponsesOverride {
        ResponsesOverride::ByStatus(
            entries
                .iter()
                .map(|(status, schema)| (ResponseKey::status(*status), schema.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_single_schema_baseline_is_wrapped_under_implied_status() {
        let baseline = Responses::Schema(json!({ "$ref": "#/components/schemas/Pet" }));
        let overlay = by_status(&[(404, Some(json!({ "type": "string" })))]);

        let merged = merge_responses(baseline, &overlay, &Method::POST);
        let Responses::Map(map) = merged else {
            panic!("expected keyed map");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(
            map[&ResponseKey::status(201)],
            json!({ "$ref": "#/components/schemas/Pet" })
        );
        assert_eq!(map[&ResponseKey::status(404)], json!({ "type": "string" }));
    }

    #[test]
    fn test_override_wins_on_key_collision() {
        let baseline = Responses::by_status([(200, json!({ "old": true }))]);
        let overlay = by_status(&[(200, Some(json!({ "new": true })))]);

        let merged = merge_responses(baseline, &overlay, &Method::GET);
        let Responses::Map(map) = merged else {
            panic!("expected keyed map");
        };
        assert_eq!(map[&ResponseKey::status(200)], json!({ "new": true }));
    }

    #[test]
    fn test_none_entries_delete_and_nulls_are_pruned() {
        let baseline = Responses::by_status([
            (200, json!({ "ok": true })),
            (204, json!(null)),
            (404, json!({ "gone": true })),
        ]);
        let overlay = by_status(&[(404, None)]);

        let merged = merge_responses(baseline, &overlay, &Method::GET);
        let Responses::Map(map) = merged else {
            panic!("expected keyed map");
        };
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&ResponseKey::status(200)));
    }

    #[test]
    fn test_single_schema_override_replaces_wholesale() {
        let baseline = Responses::by_status([(200, json!({ "ok": true }))]);
        let overlay = ResponsesOverride::Replace(json!({ "type": "string" }));

        let merged = merge_responses(baseline, &overlay, &Method::GET);
        assert_eq!(merged, Responses::Schema(json!({ "type": "string" })));
    }
}
