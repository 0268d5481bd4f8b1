pub mod registered_schema;
pub use self::registered_schema::{CompatibilityCheck, RegisteredSchema, SchemaIdResponse};
pub mod schema;
pub use self::schema::{Schema, SchemaPayload};
pub mod server_config;
pub use self::server_config::{Compatibility, ServerConfig};
pub mod subject;
pub use self::subject::Subject;
pub mod version;
pub use self::version::Version;

/// Registry-wide schema identifier. Zero is never assigned.
pub type SchemaId = u32;
