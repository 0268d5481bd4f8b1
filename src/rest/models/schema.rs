use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema : Serialized schema document, treated as an opaque string
#[derive(Clone, Default, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(String);

impl Schema {
    pub fn new(schema: impl Into<String>) -> Schema {
        Schema(schema.into())
    }

    /// The absent schema.
    pub fn empty() -> Schema {
        Schema(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Schema {
    fn from(schema: String) -> Self {
        Schema(schema)
    }
}

impl From<&str> for Schema {
    fn from(schema: &str) -> Self {
        Schema(schema.to_string())
    }
}

/// SchemaPayload : Body of the register, lookup and compatibility endpoints,
/// also returned by `GET /schemas/ids/{id}`
#[derive(Clone, Default, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SchemaPayload {
    /// Schema definition string
    #[serde(rename = "schema", default)]
    pub schema: Schema,
}

impl SchemaPayload {
    pub fn new(schema: &Schema) -> SchemaPayload {
        SchemaPayload {
            schema: schema.clone(),
        }
    }
}
