use mongodb::bson::{Bson, Document};
use serde::{Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

/// Field every stored document is partitioned by.
pub const CATEGORY_FIELD: &str = "type";

/// Content categories exposed over HTTP. The store itself accepts any
/// category string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Joke,
    Pickup,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Joke, Category::Pickup];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Joke => "joke",
            Category::Pickup => "pickup",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored content document, passed through verbatim.
///
/// Serializes to JSON with object ids rendered as hex strings and every other
/// BSON type in relaxed extended JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Content(Document);

impl Content {
    pub fn new(document: Document) -> Self {
        Self(document)
    }

    pub fn category(&self) -> Option<&str> {
        self.0.get_str(CATEGORY_FIELD).ok()
    }

    pub fn document(&self) -> &Document {
        &self.0
    }

    pub fn to_json(&self) -> serde_json::Value {
        document_to_json(&self.0)
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn document_to_json(document: &Document) -> serde_json::Value {
    serde_json::Value::Object(
        document
            .iter()
            .map(|(key, value)| (key.clone(), bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: &Bson) -> serde_json::Value {
    match value {
        Bson::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => serde_json::Value::Array(items.iter().map(bson_to_json).collect()),
        other => other.clone().into_relaxed_extjson(),
    }
}

/// OpenAPI shape of a content document. Additional stored fields are returned
/// as-is.
#[derive(Serialize, ToSchema)]
#[allow(dead_code)]
pub struct ContentSchema {
    /// Store identifier, hex encoded.
    #[serde(rename = "_id")]
    #[schema(example = "64b7f0c2a1e4d3b2c1a09f8e")]
    pub id: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[schema(example = "I'm afraid for the calendar. Its days are numbered.")]
    pub text: String,
}
