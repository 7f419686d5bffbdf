use std::fmt;

/// Overlay engine error
///
/// Returned by scope evaluation during document generation and by
/// attachment at declaration time. Both variants are surfaced to the
/// caller, never swallowed; there are no transient failure modes and no
/// retries.
#[derive(Debug)]
pub enum OverlayError {
    /// Version negotiation failed while a scope predicate needed the
    /// request version
    ///
    /// Version-scoped overlays cannot silently default to "in scope", so a
    /// missing or failing negotiator aborts the generation call.
    ScopeResolution {
        /// What the predicate was resolving when negotiation failed
        detail: String,
        /// Underlying negotiation failure, when one exists
        source: Option<anyhow::Error>,
    },
    /// Attachment target is not one of the recognized artifact shapes
    ///
    /// Raised at declaration time, before any document generation runs.
    UnsupportedArtifact {
        /// Description of the rejected target
        detail: String,
    },
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::ScopeResolution { detail, .. } => {
                write!(f, "scope resolution failed: {}", detail)
            }
            OverlayError::UnsupportedArtifact { detail } => {
                write!(f, "unsupported attachment target: {}", detail)
            }
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::ScopeResolution {
                source: Some(err), ..
            } => {
                let err: &(dyn std::error::Error + 'static) = err.as_ref();
                Some(err)
            }
            _ => None,
        }
    }
}
