#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::io::Write;
use std::sync::{Arc, Mutex};

use http::Method;
use serde_json::{json, Value};
use tracing_subscriber::fmt::MakeWriter;

use common::{get_cx, pet_baseline};
use schema_overlay::{
    operation_document, Artifact, OperationContext, OperationSchema, Overlay, OverlayError,
    OverlayRegistry, StaticSchema,
};

fn document(schema: &dyn OperationSchema, cx: &OperationContext<'_>) -> Value {
    operation_document(schema, cx).unwrap().unwrap()
}

fn tags_overlay(tag: &str) -> Overlay {
    Overlay::builder().tags([tag]).build()
}

#[test]
fn test_invalid_artifact_fails_attachment() {
    let mut registry = OverlayRegistry::new();
    let err = registry
        .attach(&Artifact::group(""), tags_overlay("x"))
        .unwrap_err();
    assert!(matches!(err, OverlayError::UnsupportedArtifact { .. }));

    let err = registry
        .attach(&Artifact::method("Pets", ""), tags_overlay("x"))
        .unwrap_err();
    assert!(matches!(err, OverlayError::UnsupportedArtifact { .. }));
}

#[test]
fn test_last_method_attachment_wins() {
    let mut registry = OverlayRegistry::new();
    let target = Artifact::method("Pets", "list");
    registry.attach(&target, tags_overlay("a")).unwrap();
    registry.attach(&target, tags_overlay("b")).unwrap();

    let schema = registry.schema_for("Pets", "list", Arc::new(pet_baseline()));
    assert_eq!(document(schema.as_ref(), &get_cx())["tags"], json!(["b"]));
}

#[test]
fn test_out_of_scope_layer_falls_through_to_earlier_layer() {
    let mut registry = OverlayRegistry::new();
    let target = Artifact::method("Pets", "list");
    registry.attach(&target, tags_overlay("a")).unwrap();
    registry
        .attach(
            &target,
            Overlay::builder().methods([Method::POST]).tags(["b"]).build(),
        )
        .unwrap();

    // The outermost layer is POST-scoped; a GET document falls through to
    // the earlier layer instead of the baseline.
    let schema = registry.schema_for("Pets", "list", Arc::new(pet_baseline()));
    assert_eq!(document(schema.as_ref(), &get_cx())["tags"], json!(["a"]));
}

#[test]
fn test_group_default_with_method_specific_override() {
    let mut registry = OverlayRegistry::new();
    registry
        .attach(&Artifact::group("Pets"), tags_overlay("group"))
        .unwrap();
    registry
        .attach(&Artifact::method("Pets", "list"), tags_overlay("list"))
        .unwrap();

    let list = registry.schema_for("Pets", "list", Arc::new(pet_baseline()));
    let create = registry.schema_for("Pets", "create", Arc::new(pet_baseline()));

    // The later method attachment wins for its method; every other method
    // keeps the group default.
    assert_eq!(document(list.as_ref(), &get_cx())["tags"], json!(["list"]));
    assert_eq!(document(create.as_ref(), &get_cx())["tags"], json!(["group"]));
}

#[test]
fn test_group_attachment_after_method_takes_priority() {
    let mut registry = OverlayRegistry::new();
    registry
        .attach(&Artifact::method("Pets", "list"), tags_overlay("list"))
        .unwrap();
    registry
        .attach(&Artifact::group("Pets"), tags_overlay("group"))
        .unwrap();

    let list = registry.schema_for("Pets", "list", Arc::new(pet_baseline()));
    assert_eq!(document(list.as_ref(), &get_cx())["tags"], json!(["group"]));
}

#[test]
fn test_reattaching_same_overlay_does_not_duplicate_layers() {
    let mut registry = OverlayRegistry::new();
    let target = Artifact::method("Pets", "list");
    let shared = Arc::new(
        Overlay::builder()
            .parameter(schema_overlay::ParameterSpec::query("page"))
            .build(),
    );
    registry.attach_shared(&target, Arc::clone(&shared)).unwrap();
    registry.attach_shared(&target, Arc::clone(&shared)).unwrap();

    assert_eq!(registry.chain_for("Pets", "list").len(), 1);

    // A single append, not two.
    let schema = registry.schema_for("Pets", "list", Arc::new(pet_baseline()));
    assert_eq!(schema.parameters(&get_cx()).unwrap().len(), 2);
}

#[test]
fn test_reattachment_moves_layer_to_most_recent_position() {
    let mut registry = OverlayRegistry::new();
    let target = Artifact::method("Pets", "list");
    let first = Arc::new(tags_overlay("first"));
    registry.attach_shared(&target, Arc::clone(&first)).unwrap();
    registry.attach(&target, tags_overlay("second")).unwrap();
    registry.attach_shared(&target, Arc::clone(&first)).unwrap();

    let schema = registry.schema_for("Pets", "list", Arc::new(pet_baseline()));
    assert_eq!(document(schema.as_ref(), &get_cx())["tags"], json!(["first"]));
    assert_eq!(registry.chain_for("Pets", "list").len(), 2);
}

#[test]
fn test_callable_layers_park_until_bound() {
    let mut registry = OverlayRegistry::new();
    registry
        .attach(&Artifact::callable("list_pets"), tags_overlay("parked"))
        .unwrap();
    assert!(!registry.has_overlays("Pets", "list"));

    registry.bind_callable("list_pets", "Pets", "list").unwrap();
    assert!(registry.has_overlays("Pets", "list"));

    let schema = registry.schema_for("Pets", "list", Arc::new(pet_baseline()));
    assert_eq!(document(schema.as_ref(), &get_cx())["tags"], json!(["parked"]));
}

#[test]
fn test_empty_chain_returns_baseline_schema() {
    let registry = OverlayRegistry::new();
    let baseline: Arc<dyn OperationSchema> = Arc::new(pet_baseline());
    let schema = registry.schema_for("Pets", "list", Arc::clone(&baseline));

    let plain = document(baseline.as_ref(), &get_cx());
    assert_eq!(document(schema.as_ref(), &get_cx()), plain);
}

#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl CaptureWriter {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_group_level_identity_override_warns_but_proceeds() {
    let writer = CaptureWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .finish();

    let mut registry = OverlayRegistry::new();
    tracing::subscriber::with_default(subscriber, || {
        registry
            .attach(
                &Artifact::group("Pets"),
                Overlay::builder().operation_id("everything").build(),
            )
            .unwrap();
    });

    let logs = writer.contents();
    assert!(logs.contains("group granularity"), "missing warning: {logs}");

    // Advisory only: the overlay still governs every method of the group.
    let schema = registry.schema_for("Pets", "retrieve", Arc::new(StaticSchema::new("auto")));
    assert_eq!(
        document(schema.as_ref(), &get_cx())["operationId"],
        "everything"
    );
}
