//! # schema-overlay
//!
//! Declarative override/merge layers ("overlays") for auto-generated
//! [OpenAPI](https://spec.openapis.org/oas/v3.1.0)-style operation
//! documents.
//!
//! ## Overview
//!
//! Introspection-driven schema generators get real-world endpoints wrong:
//! polymorphic responses, versioned behavior, custom auth, deprecated
//! routes. `schema-overlay` lets a caller attach explicit corrections to a
//! single operation, or to every operation of a handler group, without
//! discarding the parts of the auto-generated document that are still
//! correct.
//!
//! ## Architecture
//!
//! The library is organized into a few key modules:
//!
//! - **[`schema`]** - the per-field accessor contract shared by baseline
//!   generators and overlay layers, the operation context (method, path,
//!   version negotiation), and document assembly
//! - **[`overlay`]** - the override record and its builder, the
//!   method/version scope predicate, the per-field combination policies,
//!   and the delegating layer that applies them
//! - **[`registry`]** - attachment of layers to handler artifacts (group,
//!   method, or plain callable) and composition of resolution chains
//! - **[`error`]** - the error taxonomy surfaced at declaration and
//!   generation time
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use http::Method;
//! use serde_json::json;
//! use schema_overlay::{
//!     operation_document, Artifact, OperationContext, Overlay, OverlayRegistry, Responses,
//!     StaticSchema,
//! };
//!
//! let mut registry = OverlayRegistry::new();
//! registry
//!     .attach(
//!         &Artifact::method("Pets", "create"),
//!         Overlay::builder()
//!             .methods([Method::POST])
//!             .response(201, json!({ "$ref": "#/components/schemas/Pet" }))
//!             .tags(["pets"])
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let baseline = StaticSchema {
//!     operation_id: "create_pet".into(),
//!     responses: Responses::single(json!({ "$ref": "#/components/schemas/Pet" })),
//!     ..Default::default()
//! };
//!
//! let schema = registry.schema_for("Pets", "create", Arc::new(baseline));
//! let cx = OperationContext::new(Method::POST, "/pets");
//! let doc = operation_document(schema.as_ref(), &cx).unwrap().unwrap();
//! assert_eq!(doc["tags"], json!(["pets"]));
//! ```
//!
//! Attachment happens once at process initialization, before any request
//! handling; generation is a pure, synchronous read that may run on every
//! schema-export request.

pub mod error;
pub mod overlay;
pub mod registry;
pub mod schema;

pub use error::OverlayError;
pub use overlay::{Overlay, OverlayBuilder, OverlaySchema, ResponsesOverride, ScopeFilter};
pub use registry::{operation_document, Artifact, OverlayRegistry};
pub use schema::{
    assemble_operation, default_status_for, named_object_schema, ExampleSpec, FixedVersion,
    NegotiatedVersion, OperationContext, OperationSchema, ParameterLocation, ParameterSpec,
    ResponseKey, Responses, SchemaResult, StaticSchema, VersionNegotiator,
};
