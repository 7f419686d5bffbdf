use http::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::scope::ScopeFilter;
use crate::schema::{ExampleSpec, ParameterSpec, ResponseKey};

/// Override declarations for the response map.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsesOverride {
    /// Replace the baseline wholesale with a single schema entity.
    Replace(Value),
    /// Merge-union into the baseline map, override entries winning on key
    /// collision. A `None` entry deletes its key from the result.
    ByStatus(BTreeMap<ResponseKey, Option<Value>>),
}

/// Declarative corrections for one or more operations.
///
/// Every slot is optional; an unset slot defers to the baseline generator.
/// Explicit empty values are honored and distinct from "unset":
/// `request(Value::Null)` removes the request body, `tags([])` clears the
/// tag list. Overlays are immutable once built and typically live as long
/// as the handler group they correct.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    pub(crate) operation_id: Option<String>,
    pub(crate) parameters: Option<Vec<ParameterSpec>>,
    pub(crate) request: Option<Value>,
    pub(crate) responses: Option<ResponsesOverride>,
    pub(crate) auth: Option<Vec<String>>,
    pub(crate) description: Option<String>,
    pub(crate) summary: Option<String>,
    pub(crate) deprecated: Option<bool>,
    pub(crate) tags: Option<Vec<String>>,
    pub(crate) filters: Option<bool>,
    pub(crate) exclude: bool,
    pub(crate) operation: Option<Value>,
    pub(crate) examples: Option<Vec<ExampleSpec>>,
    pub(crate) extensions: Option<Map<String, Value>>,
    pub(crate) scope: ScopeFilter,
}

impl Overlay {
    pub fn builder() -> OverlayBuilder {
        OverlayBuilder::new()
    }

    pub fn scope(&self) -> &ScopeFilter {
        &self.scope
    }

    /// True when the overlay carries a field that fixes operation identity
    /// (operation id or a raw operation document). Declaring these at group
    /// granularity stamps one operation's identity onto every method.
    pub(crate) fn sets_operation_identity(&self) -> bool {
        self.operation_id.is_some() || self.operation.is_some()
    }
}

/// Fluent constructor for [`Overlay`].
///
/// # Example
///
/// ```rust,ignore
/// use schema_overlay::Overlay;
/// use http::Method;
/// use serde_json::json;
///
/// let overlay = Overlay::builder()
///     .methods([Method::POST])
///     .response(201, json!({ "$ref": "#/components/schemas/Created" }))
///     .tags(["pets"])
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct OverlayBuilder {
    overlay: Overlay,
}

impl OverlayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the auto-generated operation id. Collisions are the caller's
    /// responsibility.
    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.overlay.operation_id = Some(operation_id.into());
        self
    }

    /// Add one parameter after the auto-discovered ones.
    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.overlay
            .parameters
            .get_or_insert_with(Vec::new)
            .push(parameter);
        self
    }

    pub fn parameters<I: IntoIterator<Item = ParameterSpec>>(mut self, parameters: I) -> Self {
        self.overlay
            .parameters
            .get_or_insert_with(Vec::new)
            .extend(parameters);
        self
    }

    /// Replace the discovered request body schema wholesale. Pass
    /// `Value::Null` to declare that the operation has no request body.
    pub fn request(mut self, schema: Value) -> Self {
        self.overlay.request = Some(schema);
        self
    }

    /// Declare the response schema for one status code. Repeated calls
    /// accumulate into a keyed override map.
    pub fn response(self, status: u16, schema: Value) -> Self {
        self.response_entry(ResponseKey::status(status), Some(schema))
    }

    /// Like [`response`](Self::response), narrowed to one media type.
    pub fn response_media(
        self,
        status: u16,
        media_type: impl Into<String>,
        schema: Value,
    ) -> Self {
        self.response_entry(ResponseKey::media(status, media_type), Some(schema))
    }

    /// Remove the baseline's entry for one status code.
    pub fn remove_response(self, status: u16) -> Self {
        self.response_entry(ResponseKey::status(status), None)
    }

    fn response_entry(mut self, key: ResponseKey, schema: Option<Value>) -> Self {
        match &mut self.overlay.responses {
            Some(ResponsesOverride::ByStatus(entries)) => {
                entries.insert(key, schema);
            }
            _ => {
                let mut entries = BTreeMap::new();
                entries.insert(key, schema);
                self.overlay.responses = Some(ResponsesOverride::ByStatus(entries));
            }
        }
        self
    }

    /// Replace the whole response declaration with a single schema entity,
    /// discarding the baseline map.
    pub fn responses_replace(mut self, schema: Value) -> Self {
        self.overlay.responses = Some(ResponsesOverride::Replace(schema));
        self
    }

    /// Replace discovered auth with an explicit list of auth methods.
    pub fn auth<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overlay.auth = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.overlay.description = Some(description.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.overlay.summary = Some(summary.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.overlay.deprecated = Some(deprecated);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overlay.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Ignore discovery and forcefully enable or disable filter backends.
    /// Enabled substitutes the handler group's configured backends;
    /// disabled empties the list.
    pub fn filters(mut self, enabled: bool) -> Self {
        self.overlay.filters = Some(enabled);
        self
    }

    /// Exclude the operation from the document entirely when in scope.
    /// Takes precedence over every other slot, the raw operation included.
    pub fn exclude(mut self) -> Self {
        self.overlay.exclude = true;
        self
    }

    /// Replace the entire assembled document for the operation with a raw
    /// operation object.
    pub fn operation(mut self, operation: Value) -> Self {
        self.overlay.operation = Some(operation);
        self
    }

    pub fn example(mut self, example: ExampleSpec) -> Self {
        self.overlay
            .examples
            .get_or_insert_with(Vec::new)
            .push(example);
        self
    }

    pub fn examples<I: IntoIterator<Item = ExampleSpec>>(mut self, examples: I) -> Self {
        self.overlay
            .examples
            .get_or_insert_with(Vec::new)
            .extend(examples);
        self
    }

    /// Set one specification extension, e.g. `x-badges`.
    pub fn extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overlay
            .extensions
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    pub fn extensions(mut self, extensions: Map<String, Value>) -> Self {
        self.overlay.extensions = Some(extensions);
        self
    }

    /// Scope the overlay to specific HTTP methods. Matches all by default.
    pub fn methods<I: IntoIterator<Item = Method>>(mut self, methods: I) -> Self {
        self.overlay.scope.methods = Some(methods.into_iter().collect());
        self
    }

    /// Scope the overlay to specific API versions. Matches all by default.
    pub fn versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overlay.scope.versions = Some(versions.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Overlay {
        self.overlay
    }
}
