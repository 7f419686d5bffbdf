use http::Method;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use super::schema::{OperationContext, OperationSchema, SchemaResult};
use super::types::Responses;

/// Status code implied by an HTTP method when a single response schema has
/// to be keyed into a map.
static METHOD_DEFAULT_STATUS: Lazy<HashMap<Method, u16>> = Lazy::new(|| {
    HashMap::from([
        (Method::GET, 200),
        (Method::POST, 201),
        (Method::PUT, 200),
        (Method::PATCH, 200),
        (Method::DELETE, 204),
        (Method::HEAD, 200),
        (Method::OPTIONS, 200),
        (Method::TRACE, 200),
    ])
});

/// Default success status for `method`. Extension methods fall back to 200.
pub fn default_status_for(method: &Method) -> u16 {
    METHOD_DEFAULT_STATUS.get(method).copied().unwrap_or(200)
}

/// Assemble the operation object for `cx` by reading every document field
/// through `root`, the outermost layer of the resolution chain.
///
/// Empty collections and unset scalars are omitted. Null-valued entries
/// left over from merging are dropped rather than emitted. Request schemas
/// are wrapped under an `application/json` content map; a `Value::Null`
/// request (an explicit "no body" override) omits the request body
/// entirely.
pub fn assemble_operation(
    root: &dyn OperationSchema,
    cx: &OperationContext<'_>,
) -> SchemaResult<Value> {
    let mut doc = Map::new();
    doc.insert(
        "operationId".to_string(),
        Value::String(root.operation_id(cx)?),
    );

    if let Some(summary) = root.summary(cx)? {
        doc.insert("summary".to_string(), Value::String(summary));
    }
    if let Some(description) = root.description(cx)? {
        doc.insert("description".to_string(), Value::String(description));
    }
    if root.deprecated(cx)? {
        doc.insert("deprecated".to_string(), Value::Bool(true));
    }

    let tags = root.tags(cx)?;
    if !tags.is_empty() {
        doc.insert(
            "tags".to_string(),
            Value::Array(tags.into_iter().map(Value::String).collect()),
        );
    }

    let parameters = root.parameters(cx)?;
    if !parameters.is_empty() {
        let rendered: Vec<Value> = parameters
            .iter()
            .filter_map(|param| serde_json::to_value(param).ok())
            .collect();
        doc.insert("parameters".to_string(), Value::Array(rendered));
    }

    match root.request_body(cx)? {
        Some(Value::Null) | None => {}
        Some(schema) => {
            doc.insert(
                "requestBody".to_string(),
                json!({ "content": { "application/json": { "schema": schema } } }),
            );
        }
    }

    doc.insert(
        "responses".to_string(),
        render_responses(&root.responses(cx)?, cx.method()),
    );

    let auth = root.auth(cx)?;
    if !auth.is_empty() {
        let requirements: Vec<Value> = auth
            .iter()
            .map(|scheme| {
                let mut requirement = Map::new();
                requirement.insert(scheme.clone(), Value::Array(Vec::new()));
                Value::Object(requirement)
            })
            .collect();
        doc.insert("security".to_string(), Value::Array(requirements));
    }

    let examples = root.examples(cx)?;
    if !examples.is_empty() {
        let mut rendered = Map::new();
        for example in &examples {
            let mut entry = Map::new();
            if let Some(summary) = &example.summary {
                entry.insert("summary".to_string(), Value::String(summary.clone()));
            }
            entry.insert("value".to_string(), example.value.clone());
            rendered.insert(example.name.clone(), Value::Object(entry));
        }
        doc.insert("examples".to_string(), Value::Object(rendered));
    }

    for (key, value) in root.extensions(cx)? {
        doc.insert(key, value);
    }

    doc.retain(|_, value| !value.is_null());
    Ok(Value::Object(doc))
}

/// Render the response declarations as a status-keyed JSON object.
///
/// A single schema entity lands under the method's implied status. Entries
/// narrowed to a media type nest under a `content` map; an entry with no
/// media type is emitted as-is under its status key.
fn render_responses(responses: &Responses, method: &Method) -> Value {
    let mut rendered = Map::new();
    match responses {
        Responses::Schema(schema) => {
            rendered.insert(default_status_for(method).to_string(), schema.clone());
        }
        Responses::Map(map) => {
            for (key, schema) in map {
                let status = key.status.to_string();
                match &key.media_type {
                    None => {
                        rendered.insert(status, schema.clone());
                    }
                    Some(media) => {
                        let entry = rendered
                            .entry(status)
                            .or_insert_with(|| json!({ "content": {} }));
                        if entry.get("content").is_none() {
                            *entry = json!({ "content": {} });
                        }
                        if let Some(content) =
                            entry.get_mut("content").and_then(Value::as_object_mut)
                        {
                            content.insert(media.clone(), schema.clone());
                        }
                    }
                }
            }
        }
    }
    Value::Object(rendered)
}

/// Build a one-off named object schema from `(field, schema)` pairs.
///
/// Names without the `Schema` suffix get it appended, mirroring the naming
/// of generated component schemas.
pub fn named_object_schema(name: &str, fields: &[(&str, Value)]) -> Value {
    let title = if name.ends_with("Schema") {
        name.to_string()
    } else {
        format!("{name}Schema")
    };
    let mut properties = Map::new();
    for (field, schema) in fields {
        properties.insert((*field).to_string(), schema.clone());
    }
    json!({ "type": "object", "title": title, "properties": properties })
}
