#![allow(dead_code)]

use http::Method;
use serde_json::{json, Map};

use schema_overlay::{OperationContext, ParameterSpec, Responses, StaticSchema};

/// Baseline for a typical listing endpoint, as introspection would have
/// discovered it.
pub fn pet_baseline() -> StaticSchema {
    StaticSchema {
        operation_id: "list_pets".into(),
        parameters: vec![ParameterSpec::query("limit").with_schema(json!({ "type": "integer" }))],
        request_body: None,
        responses: Responses::by_status([(200, json!({ "$ref": "#/components/schemas/PetList" }))]),
        auth: vec!["api_key".into()],
        description: Some("List every pet in the store.".into()),
        summary: Some("List pets".into()),
        deprecated: false,
        tags: vec!["pets".into()],
        extensions: Map::new(),
        filters: vec!["ordering".into()],
        examples: vec![],
    }
}

/// Baseline whose responses are a single schema entity rather than a keyed
/// map, the common introspected case.
pub fn single_response_baseline() -> StaticSchema {
    StaticSchema {
        operation_id: "create_pet".into(),
        responses: Responses::single(json!({ "$ref": "#/components/schemas/Pet" })),
        tags: vec!["pets".into()],
        ..Default::default()
    }
}

pub fn get_cx() -> OperationContext<'static> {
    OperationContext::new(Method::GET, "/pets")
}

pub fn post_cx() -> OperationContext<'static> {
    OperationContext::new(Method::POST, "/pets")
}
