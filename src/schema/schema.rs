use http::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::types::{ExampleSpec, ParameterSpec, Responses};
use crate::error::OverlayError;

pub type SchemaResult<T> = Result<T, OverlayError>;

/// Version negotiated for the current generation call, together with any
/// parameters the negotiation produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiatedVersion {
    pub version: String,
    pub params: BTreeMap<String, String>,
}

impl NegotiatedVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            params: BTreeMap::new(),
        }
    }
}

/// Version-negotiation capability of the handler that owns an operation.
///
/// Implementations consult whatever request state the hosting framework
/// keeps. Failure must be reported, not defaulted: a version-scoped overlay
/// that cannot resolve the version aborts the generation call.
pub trait VersionNegotiator {
    fn negotiate(&self) -> anyhow::Result<NegotiatedVersion>;
}

/// Negotiator that always yields one fixed version.
pub struct FixedVersion(pub String);

impl VersionNegotiator for FixedVersion {
    fn negotiate(&self) -> anyhow::Result<NegotiatedVersion> {
        Ok(NegotiatedVersion::new(self.0.clone()))
    }
}

/// Identity of the operation a schema call is generating: HTTP method, path
/// and the owning handler's negotiation and filter state.
///
/// One context exists per generated operation. A single schema instance
/// installed at group granularity serves every method of that group, so it
/// sees a fresh context on each call and must never cache identity.
pub struct OperationContext<'a> {
    method: Method,
    path: String,
    negotiator: Option<&'a dyn VersionNegotiator>,
    filter_backends: Vec<String>,
}

impl<'a> OperationContext<'a> {
    pub fn new(method: Method, path: impl Into<String>) -> OperationContext<'a> {
        OperationContext {
            method,
            path: path.into(),
            negotiator: None,
            filter_backends: Vec::new(),
        }
    }

    pub fn with_negotiator(mut self, negotiator: &'a dyn VersionNegotiator) -> Self {
        self.negotiator = Some(negotiator);
        self
    }

    pub fn with_filter_backends<I, S>(mut self, backends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_backends = backends.into_iter().map(Into::into).collect();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Filter backends configured on the owning handler group.
    pub fn filter_backends(&self) -> &[String] {
        &self.filter_backends
    }

    /// Resolve the API version for this call.
    ///
    /// Version-scoped overlays call this lazily. A missing negotiator is an
    /// error just like a failing one; there is no implicit match.
    pub fn negotiate_version(&self) -> SchemaResult<NegotiatedVersion> {
        let negotiator = self
            .negotiator
            .ok_or_else(|| OverlayError::ScopeResolution {
                detail: format!("no version negotiator for {} {}", self.method, self.path),
                source: None,
            })?;
        negotiator
            .negotiate()
            .map_err(|err| OverlayError::ScopeResolution {
                detail: format!(
                    "version negotiation failed for {} {}",
                    self.method, self.path
                ),
                source: Some(err),
            })
    }
}

/// Per-field accessor contract shared by baseline generators and overlay
/// layers.
///
/// The baseline side is produced by an external introspection engine; this
/// crate only wraps it. Each accessor is a pure function of the stored
/// state and the per-call [`OperationContext`].
///
/// `operation` threads `root`, the outermost layer of the resolution chain,
/// so that a baseline assembling the full document reads every field through
/// the whole chain rather than through itself.
pub trait OperationSchema: Send + Sync {
    fn operation_id(&self, cx: &OperationContext<'_>) -> SchemaResult<String>;

    fn parameters(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<ParameterSpec>>;

    /// Request body schema; `Some(Value::Null)` means "explicitly no body"
    /// as opposed to `None`, "nothing declared".
    fn request_body(&self, cx: &OperationContext<'_>) -> SchemaResult<Option<Value>>;

    fn responses(&self, cx: &OperationContext<'_>) -> SchemaResult<Responses>;

    /// Names of the auth methods securing the operation.
    fn auth(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<String>>;

    fn description(&self, cx: &OperationContext<'_>) -> SchemaResult<Option<String>>;

    fn summary(&self, cx: &OperationContext<'_>) -> SchemaResult<Option<String>>;

    fn deprecated(&self, cx: &OperationContext<'_>) -> SchemaResult<bool>;

    fn tags(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<String>>;

    /// Specification extensions (`x-*` keys) for the operation object.
    fn extensions(&self, cx: &OperationContext<'_>) -> SchemaResult<Map<String, Value>>;

    /// Filter backends discovered for the operation. These feed the external
    /// engine's parameter discovery and are not embedded in the assembled
    /// document.
    fn filters(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<String>>;

    fn examples(&self, cx: &OperationContext<'_>) -> SchemaResult<Vec<ExampleSpec>>;

    /// Full operation document, or `None` when the operation is excluded
    /// from the schema.
    fn operation(
        &self,
        cx: &OperationContext<'_>,
        root: &dyn OperationSchema,
    ) -> SchemaResult<Option<Value>>;
}
