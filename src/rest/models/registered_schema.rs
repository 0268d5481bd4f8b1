use crate::rest::models::{Schema, SchemaId, Subject};
use serde::{Deserialize, Serialize};

/// RegisteredSchema : A schema as registered under a subject and version
#[derive(Clone, Default, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct RegisteredSchema {
    /// Unique identifier of the schema
    #[serde(rename = "id", default)]
    pub id: SchemaId,
    /// Subject
    #[serde(rename = "subject", default)]
    pub subject: Subject,
    /// Version number
    #[serde(rename = "version", default)]
    pub version: u32,
    /// Schema definition string
    #[serde(rename = "schema", default)]
    pub schema: Schema,
}

impl RegisteredSchema {
    pub fn new(id: SchemaId, subject: &Subject, version: u32, schema: &Schema) -> RegisteredSchema {
        RegisteredSchema {
            id,
            subject: subject.clone(),
            version,
            schema: schema.clone(),
        }
    }
}

/// SchemaIdResponse : Answer to a registration
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SchemaIdResponse {
    #[serde(rename = "id", default)]
    pub id: SchemaId,
}

/// CompatibilityCheck : Answer of the compatibility endpoint
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityCheck {
    #[serde(rename = "is_compatible")]
    pub is_compatible: bool,
}
