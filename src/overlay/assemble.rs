use serde_json::{Map, Value};
use std::sync::Arc;

use super::merge;
use super::types::Overlay;
use crate::schema::{
    ExampleSpec, OperationContext, OperationSchema, ParameterSpec, Responses, SchemaResult,
};

/// One layer of a resolution chain.
///
/// Wraps a baseline generator (or a previously attached layer) and applies
/// its [`Overlay`] field by field whenever the scope predicate admits the
/// operation being generated. The wrapped accessor always runs first, even
/// when its value is about to be replaced, so inner layers observe every
/// generation pass. Out-of-scope calls fall through to the wrapped layer
/// unchanged.
pub struct OverlaySchema {
    overlay: Arc<Overlay>,
    inner: Arc<dyn OperationSchema>,
}

impl OverlaySchema {
    pub fn new(overlay: Arc<Overlay>, inner: Arc<dyn OperationSchema>) -> Self {
        Self { overlay, inner }
    }

    /// Wrap `inner` in a fresh layer, erased to the schema trait.
    pub fn layer(overlay: Overlay, inner: Arc<dyn OperationSchema>) -> Arc<dyn OperationSchema> {
        Arc::new(Self::new(Arc::new(overlay), inner))
    }

    fn applies(&self, cx: &OperationContext<'_>) -> SchemaResult<bool> {
        self.overlay.scope.in_scope(cx)
    }
}

impl OperationSchema for OverlaySchema {
    fn operation_id(&self, cx: &OperationContext<'_>) -> SchemaResult<String> {
        let baseline = self.inner.operation_id(cx)?;
        if let Some(operation_id) = &self.overlay.operation_id {
            if self.applies(cx)? {
                return Ok(operation_id.clone());
            }
        }
        Ok(baseline)
    }

    fn parameters(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<ParameterSpec>> {
        let baseline = self.inner.parameters(cx)?;
        if let Some(extra) = &self.overlay.parameters {
            if self.applies(cx)? {
                return Ok(merge::append_parameters(baseline, extra));
            }
        }
        Ok(baseline)
    }

    fn request_body(&self, cx: &OperationContext<'_>) -> SchemaResult<Option<Value>> {
        let baseline = self.inner.request_body(cx)?;
        if let Some(request) = &self.overlay.request {
            if self.applies(cx)? {
                return Ok(Some(request.clone()));
            }
        }
        Ok(baseline)
    }

    fn responses(&self, cx: &OperationContext<'_>) -> SchemaResult<Responses> {
        let baseline = self.inner.responses(cx)?;
        if let Some(overlay) = &self.overlay.responses {
            if self.applies(cx)? {
                return Ok(merge::merge_responses(baseline, overlay, cx.method()));
            }
        }
        Ok(baseline)
    }

    fn auth(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<String>> {
        let baseline = self.inner.auth(cx)?;
        if let Some(auth) = &self.overlay.auth {
            if self.applies(cx)? {
                return Ok(auth.clone());
            }
        }
        Ok(baseline)
    }

    fn description(&self, cx: &OperationContext<'_>) -> SchemaResult<Option<String>> {
        let baseline = self.inner.description(cx)?;
        if let Some(description) = &self.overlay.description {
            if self.applies(cx)? {
                return Ok(Some(description.clone()));
            }
        }
        Ok(baseline)
    }

    fn summary(&self, cx: &OperationContext<'_>) -> SchemaResult<Option<String>> {
        let baseline = self.inner.summary(cx)?;
        if let Some(summary) = &self.overlay.summary {
            if self.applies(cx)? {
                return Ok(Some(summary.clone()));
            }
        }
        Ok(baseline)
    }

    fn deprecated(&self, cx: &OperationContext<'_>) -> SchemaResult<bool> {
        let baseline = self.inner.deprecated(cx)?;
        if let Some(deprecated) = self.overlay.deprecated {
            if self.applies(cx)? {
                return Ok(deprecated);
            }
        }
        Ok(baseline)
    }

    fn tags(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<String>> {
        let baseline = self.inner.tags(cx)?;
        if let Some(tags) = &self.overlay.tags {
            if self.applies(cx)? {
                return Ok(tags.clone());
            }
        }
        Ok(baseline)
    }

    fn extensions(&self, cx: &OperationContext<'_>) -> SchemaResult<Map<String, Value>> {
        let baseline = self.inner.extensions(cx)?;
        if let Some(extensions) = &self.overlay.extensions {
            if self.applies(cx)? {
                return Ok(extensions.clone());
            }
        }
        Ok(baseline)
    }

    fn filters(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<String>> {
        let baseline = self.inner.filters(cx)?;
        if let Some(enabled) = self.overlay.filters {
            if self.applies(cx)? {
                return Ok(merge::merged_filters(enabled, cx));
            }
        }
        Ok(baseline)
    }

    fn examples(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<ExampleSpec>> {
        let baseline = self.inner.examples(cx)?;
        if let Some(extra) = &self.overlay.examples {
            if self.applies(cx)? {
                return Ok(merge::append_examples(baseline, extra));
            }
        }
        Ok(baseline)
    }

    fn operation(
        &self,
        cx: &OperationContext<'_>,
        root: &dyn OperationSchema,
    ) -> SchemaResult<Option<Value>> {
        // Exclusion is checked before the raw override, and both before the
        // wrapped generator is consulted.
        if self.overlay.exclude && self.applies(cx)? {
            tracing::debug!(
                target: "schema_overlay::assemble",
                method = %cx.method(),
                path = %cx.path(),
                "operation excluded from document"
            );
            return Ok(None);
        }
        if let Some(raw) = &self.overlay.operation {
            if self.applies(cx)? {
                tracing::debug!(
                    target: "schema_overlay::assemble",
                    method = %cx.method(),
                    path = %cx.path(),
                    "raw operation override applied"
                );
                return Ok(Some(raw.clone()));
            }
        }
        self.inner.operation(cx, root)
    }
}
