//! Attachment of overlay layers to handler artifacts.
//!
//! Handler artifacts (framework-owned groups, their exposed methods, bare
//! callables) live outside this crate, so nothing is stamped onto them.
//! The registry keys layer chains by artifact identity instead; callers
//! classify the artifact shape explicitly before attaching. Attachment is
//! a load-time, write-once operation; document generation only reads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::OverlayError;
use crate::overlay::{Overlay, OverlaySchema};
use crate::schema::{OperationContext, OperationSchema, SchemaResult};

/// Attachment target, classified by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// A handler group: the overlay becomes the default for every exposed
    /// method of the group.
    Group { name: String },
    /// One exposed method of a handler group.
    Method { group: String, name: String },
    /// A plain callable not yet bound into a group. Layers park under the
    /// callable's name until [`OverlayRegistry::bind_callable`] runs.
    Callable { name: String },
}

impl Artifact {
    pub fn group(name: impl Into<String>) -> Self {
        Artifact::Group { name: name.into() }
    }

    pub fn method(group: impl Into<String>, name: impl Into<String>) -> Self {
        Artifact::Method {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn callable(name: impl Into<String>) -> Self {
        Artifact::Callable { name: name.into() }
    }

    fn validate(&self) -> Result<(), OverlayError> {
        let valid = match self {
            Artifact::Group { name } => !name.is_empty(),
            Artifact::Method { group, name } => !group.is_empty() && !name.is_empty(),
            Artifact::Callable { name } => !name.is_empty(),
        };
        if valid {
            Ok(())
        } else {
            Err(OverlayError::UnsupportedArtifact {
                detail: format!("{} has an empty identifier", self),
            })
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Group { name } => write!(f, "group `{}`", name),
            Artifact::Method { group, name } => write!(f, "method `{}::{}`", group, name),
            Artifact::Callable { name } => write!(f, "callable `{}`", name),
        }
    }
}

#[derive(Debug, Clone)]
struct Layer {
    seq: u64,
    overlay: Arc<Overlay>,
}

/// Registry of overlay chains, keyed by artifact identity.
///
/// Chains are ordered by attachment sequence, most recent outermost, and
/// merge across granularities: a method's effective chain is its group's
/// layers plus its own, interleaved by attachment order. A group overlay
/// attached after a method overlay therefore takes priority over it, while
/// a method overlay attached later wins for that one method and leaves the
/// group default governing the rest.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    next_seq: u64,
    groups: HashMap<String, Vec<Layer>>,
    methods: HashMap<(String, String), Vec<Layer>>,
    parked: HashMap<String, Vec<Layer>>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `overlay` to `artifact`.
    ///
    /// Fails with [`OverlayError::UnsupportedArtifact`] when the artifact's
    /// identifiers are invalid. Declaring operation-identity fields at group
    /// granularity is advisory-only: a warning event is emitted and the
    /// attachment proceeds, applying the field to every method of the group.
    pub fn attach(&mut self, artifact: &Artifact, overlay: Overlay) -> Result<(), OverlayError> {
        self.attach_shared(artifact, Arc::new(overlay))
    }

    /// Arc-taking variant for overlays shared across several artifacts.
    ///
    /// Re-attaching the same `Arc` to the same artifact does not duplicate
    /// the layer; the earlier occurrence is replaced and the layer moves to
    /// the most-recent position in the chain.
    pub fn attach_shared(
        &mut self,
        artifact: &Artifact,
        overlay: Arc<Overlay>,
    ) -> Result<(), OverlayError> {
        artifact.validate()?;
        if matches!(artifact, Artifact::Group { .. }) && overlay.sets_operation_identity() {
            tracing::warn!(
                target: "schema_overlay::registry",
                artifact = %artifact,
                "operation identity override attached at group granularity; \
                 every method of the group will carry it"
            );
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let layers = match artifact {
            Artifact::Group { name } => self.groups.entry(name.clone()).or_default(),
            Artifact::Method { group, name } => self
                .methods
                .entry((group.clone(), name.clone()))
                .or_default(),
            Artifact::Callable { name } => self.parked.entry(name.clone()).or_default(),
        };
        layers.retain(|layer| !Arc::ptr_eq(&layer.overlay, &overlay));
        layers.push(Layer { seq, overlay });
        Ok(())
    }

    /// Move layers parked on a plain callable onto the method it was bound
    /// to, preserving their attachment order. Binding a callable with no
    /// parked layers is a no-op.
    pub fn bind_callable(
        &mut self,
        callable: &str,
        group: &str,
        method: &str,
    ) -> Result<(), OverlayError> {
        Artifact::callable(callable).validate()?;
        Artifact::method(group, method).validate()?;
        if let Some(parked) = self.parked.remove(callable) {
            self.methods
                .entry((group.to_string(), method.to_string()))
                .or_default()
                .extend(parked);
        }
        Ok(())
    }

    /// Ordered effective chain for one operation, innermost first.
    pub fn chain_for(&self, group: &str, method: &str) -> Vec<Arc<Overlay>> {
        let mut layers: Vec<&Layer> = Vec::new();
        if let Some(group_layers) = self.groups.get(group) {
            layers.extend(group_layers);
        }
        if let Some(method_layers) = self.methods.get(&(group.to_string(), method.to_string())) {
            layers.extend(method_layers);
        }
        layers.sort_by_key(|layer| layer.seq);
        layers
            .into_iter()
            .map(|layer| Arc::clone(&layer.overlay))
            .collect()
    }

    pub fn has_overlays(&self, group: &str, method: &str) -> bool {
        !self.chain_for(group, method).is_empty()
    }

    /// Compose the effective chain over `baseline`, most recent attachment
    /// outermost. With no attached layers the baseline is returned as-is.
    pub fn schema_for(
        &self,
        group: &str,
        method: &str,
        baseline: Arc<dyn OperationSchema>,
    ) -> Arc<dyn OperationSchema> {
        let mut schema = baseline;
        for overlay in self.chain_for(group, method) {
            schema = Arc::new(OverlaySchema::new(overlay, schema));
        }
        schema
    }
}

/// Produce the final document for one operation, `None` when the operation
/// is excluded. Entry point for document-generation passes: it hands the
/// outermost chain layer to itself as the field-resolution root.
pub fn operation_document(
    schema: &dyn OperationSchema,
    cx: &OperationContext<'_>,
) -> SchemaResult<Option<Value>> {
    schema.operation(cx, schema)
}
