use http::Method;

use crate::schema::{OperationContext, SchemaResult};

/// Method/version gate deciding whether an overlay applies to an operation.
///
/// Unset sides match everything. Method comparison is case-insensitive
/// (uppercase normalization). The version side resolves the request version
/// through the context's negotiator, and only when a version set is
/// actually present; negotiation failure propagates instead of defaulting
/// to "in scope".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeFilter {
    pub(crate) methods: Option<Vec<Method>>,
    pub(crate) versions: Option<Vec<String>>,
}

impl ScopeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn methods<I: IntoIterator<Item = Method>>(mut self, methods: I) -> Self {
        self.methods = Some(methods.into_iter().collect());
        self
    }

    pub fn versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.versions = Some(versions.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches_everything(&self) -> bool {
        self.methods.is_none() && self.versions.is_none()
    }

    /// Whether the operation identified by `cx` is in scope.
    pub fn in_scope(&self, cx: &OperationContext<'_>) -> SchemaResult<bool> {
        if let Some(methods) = &self.methods {
            let requested = cx.method().as_str();
            if !methods
                .iter()
                .any(|method| method.as_str().eq_ignore_ascii_case(requested))
            {
                return Ok(false);
            }
        }
        match &self.versions {
            None => Ok(true),
            Some(versions) => {
                let negotiated = cx.negotiate_version()?;
                Ok(versions.iter().any(|v| *v == negotiated.version))
            }
        }
    }
}
