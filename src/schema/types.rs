use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Where a parameter is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

/// One operation parameter as it appears in the generated document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: location == ParameterLocation::Path,
            description: None,
            schema: None,
        }
    }

    /// Query parameter, optional by default.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// Path parameter; path parameters are always required.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path)
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Key of one entry in a keyed response map: a status code, optionally
/// narrowed to a media type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResponseKey {
    pub status: u16,
    pub media_type: Option<String>,
}

impl ResponseKey {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            media_type: None,
        }
    }

    pub fn media(status: u16, media_type: impl Into<String>) -> Self {
        Self {
            status,
            media_type: Some(media_type.into()),
        }
    }
}

impl std::fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.media_type {
            Some(media) => write!(f, "{} ({})", self.status, media),
            None => write!(f, "{}", self.status),
        }
    }
}

/// Response declarations for one operation.
///
/// Baseline generators report either a single schema entity (the common
/// introspected case) or a map keyed by status / status-and-media-type.
/// `BTreeMap` keeps iteration order stable so repeated generation passes
/// emit byte-identical documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Responses {
    Schema(Value),
    Map(BTreeMap<ResponseKey, Value>),
}

impl Responses {
    pub fn empty() -> Self {
        Responses::Map(BTreeMap::new())
    }

    pub fn single(schema: Value) -> Self {
        Responses::Schema(schema)
    }

    pub fn by_status<I: IntoIterator<Item = (u16, Value)>>(entries: I) -> Self {
        Responses::Map(
            entries
                .into_iter()
                .map(|(status, schema)| (ResponseKey::status(status), schema))
                .collect(),
        )
    }
}

impl Default for Responses {
    fn default() -> Self {
        Responses::empty()
    }
}

/// A request or response example attached to an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub value: Value,
}

impl ExampleSpec {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            summary: None,
            value,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}
