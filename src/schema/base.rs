use serde_json::{Map, Value};

use super::build::assemble_operation;
use super::schema::{OperationContext, OperationSchema, SchemaResult};
use super::types::{ExampleSpec, ParameterSpec, Responses};

/// Baseline generator backed by explicit field values.
///
/// The introspection engine that discovers operations lives outside this
/// crate; `StaticSchema` is the bridge for callers that already hold the
/// discovered facts, and the workhorse for tests. Field reads ignore the
/// context. Document assembly goes through [`assemble_operation`] with the
/// chain root, so overlay layers stacked on top still apply to every field.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    pub operation_id: String,
    pub parameters: Vec<ParameterSpec>,
    pub request_body: Option<Value>,
    pub responses: Responses,
    pub auth: Vec<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub deprecated: bool,
    pub tags: Vec<String>,
    pub extensions: Map<String, Value>,
    pub filters: Vec<String>,
    pub examples: Vec<ExampleSpec>,
}

impl StaticSchema {
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: operation_id.into(),
            ..Default::default()
        }
    }
}

impl OperationSchema for StaticSchema {
    fn operation_id(&self, _cx: &OperationContext<'_>) -> SchemaResult<String> {
        Ok(self.operation_id.clone())
    }

    fn parameters(&self, _cx: &OperationContext<'_>) -> SchemaResult<Vec<ParameterSpec>> {
        Ok(self.parameters.clone())
    }

    fn request_body(&self, _cx: &OperationContext<'_>) -> SchemaResult<Option<Value>> {
        Ok(self.request_body.clone())
    }

    fn responses(&self, _cx: &OperationContext<'_>) -> SchemaResult<Responses> {
        Ok(self.responses.clone())
    }

    fn auth(&self, _cx: &OperationContext<'_>) -> SchemaResult<Vec<String>> {
        Ok(self.auth.clone())
    }

    fn description(&self, _cx: &OperationContext<'_>) -> SchemaResult<Option<String>> {
        Ok(self.description.clone())
    }

    fn summary(&self, _cx: &OperationContext<'_>) -> SchemaResult<Option<String>> {
        Ok(self.summary.clone())
    }

    fn deprecated(&self, _cx: &OperationContext<'_>) -> SchemaResult<bool> {
        Ok(self.deprecated)
    }

    fn tags(&self, _cx: &OperationContext<'_>) -> SchemaResult<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn extensions(&self, _cx: &OperationContext<'_>) -> SchemaResult<Map<String, Value>> {
        Ok(self.extensions.clone())
    }

    fn filters(&self, _cx: &OperationContext<'_>) -> SchemaResult<Vec<String>> {
        Ok(self.filters.clone())
    }

    fn examples(&self, _cx: &OperationContext<'_>) -> SchemaResult<Vec<ExampleSpec>> {
        Ok(self.examples.clone())
    }

    fn operation(
        &self,
        cx: &OperationContext<'_>,
        root: &dyn OperationSchema,
    ) -> SchemaResult<Option<Value>> {
        Ok(Some(assemble_operation(root, cx)?))
    }
}
