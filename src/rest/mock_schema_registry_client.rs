use crate::rest::apis::error_message::ErrorMessage;
use crate::rest::apis::{Error, ResponseContent};
use crate::rest::models::{Compatibility, RegisteredSchema, Schema, SchemaId, Subject, Version};
use crate::rest::schema_registry_client::Client;
use reqwest::StatusCode;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// In-memory registry implementing [`Client`], for tests.
#[derive(Clone)]
pub struct MockSchemaRegistryClient {
    store: Arc<Mutex<SchemaStore>>,
}

impl MockSchemaRegistryClient {
    pub fn new() -> Self {
        MockSchemaRegistryClient {
            store: Arc::new(Mutex::new(SchemaStore::new())),
        }
    }

    pub fn set_default_compatibility(&self, compatibility: Compatibility) {
        self.store.lock().unwrap().default_compatibility = compatibility;
    }

    pub fn clear(&self) {
        self.store.lock().unwrap().clear();
    }
}

impl Default for MockSchemaRegistryClient {
    fn default() -> Self {
        MockSchemaRegistryClient::new()
    }
}

fn not_found(error_code: i32, message: &str) -> Error {
    let entity = ErrorMessage::new(error_code, message);
    Error::ResponseError(ResponseContent {
        status: StatusCode::NOT_FOUND,
        content: serde_json::to_string(&entity).unwrap_or_default(),
        entity: Some(entity),
    })
}

fn subject_not_found() -> Error {
    not_found(40401, "Subject not found.")
}

impl Client for MockSchemaRegistryClient {
    async fn register_schema(&self, subject: &Subject, schema: &Schema) -> Result<SchemaId, Error> {
        let mut store = self.store.lock().unwrap();
        if let Some(rs) = store.get_registered_by_schema(subject, schema) {
            return Ok(rs.id);
        }

        let id = store.id_for(schema);
        let version = store
            .get_latest_version(subject)
            .map_or(1, |rs| rs.version + 1);
        store.set_registered_schema(RegisteredSchema::new(id, subject, version, schema));
        Ok(id)
    }

    async fn get_schema(&self, id: SchemaId) -> Result<Schema, Error> {
        let store = self.store.lock().unwrap();
        store
            .get_schema_by_id(id)
            .ok_or_else(|| not_found(40403, "Schema not found"))
    }

    async fn get_version(
        &self,
        subject: &Subject,
        version: &Version,
    ) -> Result<(SchemaId, Schema), Error> {
        let store = self.store.lock().unwrap();
        if !store.schemas.contains_key(subject) {
            return Err(subject_not_found());
        }
        let rs = match version {
            Version::Latest => store.get_latest_version(subject),
            Version::Number(n) => store.get_registered_by_version(subject, *n),
        };
        rs.map(|rs| (rs.id, rs.schema.clone()))
            .ok_or_else(|| not_found(40402, "Version not found."))
    }

    async fn get_latest_schema(&self, subject: &Subject) -> Result<(SchemaId, Schema), Error> {
        self.get_version(subject, &Version::Latest).await
    }

    async fn has_schema(&self, subject: &Subject, schema: &Schema) -> Result<(u32, SchemaId), Error> {
        let store = self.store.lock().unwrap();
        if !store.schemas.contains_key(subject) {
            return Err(subject_not_found());
        }
        store
            .get_registered_by_schema(subject, schema)
            .map(|rs| (rs.version, rs.id))
            .ok_or_else(|| not_found(40403, "Schema not found"))
    }

    async fn is_compatible(
        &self,
        subject: &Subject,
        version: &Version,
        _schema: &Schema,
    ) -> Result<bool, Error> {
        self.get_version(subject, version).await.map(|_| true)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, Error> {
        let store = self.store.lock().unwrap();
        Ok(store.schemas.keys().cloned().collect())
    }

    async fn list_versions(&self, subject: &Subject) -> Result<Vec<u32>, Error> {
        let store = self.store.lock().unwrap();
        store
            .schemas
            .get(subject)
            .map(|schemas| schemas.iter().map(|rs| rs.version).collect())
            .ok_or_else(subject_not_found)
    }

    async fn get_default_compatibility(&self) -> Result<Compatibility, Error> {
        Ok(self.store.lock().unwrap().default_compatibility)
    }

    async fn get_subject_compatibility(&self, subject: &Subject) -> Result<Compatibility, Error> {
        let store = self.store.lock().unwrap();
        Ok(store.configs.get(subject).copied().unwrap_or_default())
    }

    async fn get_subject_derived_compatibility(
        &self,
        subject: &Subject,
    ) -> Result<Compatibility, Error> {
        let store = self.store.lock().unwrap();
        Ok(store
            .configs
            .get(subject)
            .copied()
            .unwrap_or(store.default_compatibility))
    }

    async fn set_subject_compatibility(
        &self,
        subject: &Subject,
        compatibility: Compatibility,
    ) -> Result<Compatibility, Error> {
        if compatibility.is_unset() {
            let entity = ErrorMessage::new(42203, "Invalid compatibility level");
            return Err(Error::ResponseError(ResponseContent {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                content: serde_json::to_string(&entity).unwrap_or_default(),
                entity: Some(entity),
            }));
        }
        let mut store = self.store.lock().unwrap();
        store.configs.insert(subject.clone(), compatibility);
        Ok(compatibility)
    }
}

struct SchemaStore {
    // Ordered so that subject listings are stable.
    schemas: BTreeMap<Subject, Vec<RegisteredSchema>>,
    schema_id_index: HashMap<SchemaId, Schema>,
    id_index: HashMap<Schema, SchemaId>,
    configs: HashMap<Subject, Compatibility>,
    default_compatibility: Compatibility,
    next_id: SchemaId,
}

impl SchemaStore {
    pub fn new() -> Self {
        SchemaStore {
            schemas: BTreeMap::new(),
            schema_id_index: HashMap::new(),
            id_index: HashMap::new(),
            configs: HashMap::new(),
            default_compatibility: Compatibility::Backward,
            next_id: 1,
        }
    }

    /// Ids are registry-wide: the same content gets the same id in every subject.
    pub fn id_for(&mut self, schema: &Schema) -> SchemaId {
        if let Some(id) = self.id_index.get(schema) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.id_index.insert(schema.clone(), id);
        self.schema_id_index.insert(id, schema.clone());
        id
    }

    pub fn set_registered_schema(&mut self, rs: RegisteredSchema) {
        self.schemas.entry(rs.subject.clone()).or_default().push(rs);
    }

    pub fn get_schema_by_id(&self, id: SchemaId) -> Option<Schema> {
        self.schema_id_index.get(&id).cloned()
    }

    pub fn get_registered_by_schema(
        &self,
        subject: &Subject,
        schema: &Schema,
    ) -> Option<&RegisteredSchema> {
        self.schemas
            .get(subject)
            .and_then(|schemas| schemas.iter().find(|rs| rs.schema == *schema))
    }

    pub fn get_registered_by_version(
        &self,
        subject: &Subject,
        version: u32,
    ) -> Option<&RegisteredSchema> {
        self.schemas
            .get(subject)
            .and_then(|schemas| schemas.iter().find(|rs| rs.version == version))
    }

    pub fn get_latest_version(&self, subject: &Subject) -> Option<&RegisteredSchema> {
        self.schemas
            .get(subject)
            .and_then(|schemas| schemas.iter().max_by_key(|rs| rs.version))
    }

    pub fn clear(&mut self) {
        self.schemas.clear();
        self.schema_id_index.clear();
        self.id_index.clear();
        self.configs.clear();
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_get_latest() {
        let client = MockSchemaRegistryClient::new();
        let subject = Subject::value("orders");
        let schema = Schema::from(r#"{"type":"string"}"#);

        assert!(client.get_latest_schema(&subject).await.is_err());

        let id = client.register_schema(&subject, &schema).await.unwrap();
        assert_ne!(id, 0);
        assert_eq!(
            client.get_latest_schema(&subject).await.unwrap(),
            (id, schema.clone())
        );
        assert_eq!(client.get_schema(id).await.unwrap(), schema);
    }

    #[tokio::test]
    async fn test_register_identical_content_is_idempotent() {
        let client = MockSchemaRegistryClient::new();
        let subject = Subject::from("foo-value");

        let id1 = client.register_schema(&subject, &"a".into()).await.unwrap();
        let id2 = client.register_schema(&subject, &"a".into()).await.unwrap();
        assert_eq!(id1, id2);
        assert_eq!(client.list_versions(&subject).await.unwrap(), vec![1]);

        let id3 = client.register_schema(&subject, &"b".into()).await.unwrap();
        assert_ne!(id1, id3);
        assert_eq!(client.list_versions(&subject).await.unwrap(), vec![1, 2]);
        assert_eq!(
            client.has_schema(&subject, &"b".into()).await.unwrap(),
            (2, id3)
        );
        assert_eq!(
            client
                .get_version(&subject, &Version::Number(1))
                .await
                .unwrap(),
            (id1, "a".into())
        );
    }

    #[tokio::test]
    async fn test_ids_are_registry_wide() {
        let client = MockSchemaRegistryClient::new();
        let id1 = client.register_schema(&"a".into(), &"s".into()).await.unwrap();
        let id2 = client.register_schema(&"b".into(), &"s".into()).await.unwrap();
        assert_eq!(id1, id2);
        assert_eq!(
            client.list_subjects().await.unwrap(),
            vec![Subject::from("a"), Subject::from("b")]
        );
    }

    #[tokio::test]
    async fn test_compatibility_resolution() {
        let client = MockSchemaRegistryClient::new();
        let subject = Subject::from("foo");

        assert_eq!(
            client.get_subject_compatibility(&subject).await.unwrap(),
            Compatibility::Unset
        );
        assert_eq!(
            client
                .get_subject_derived_compatibility(&subject)
                .await
                .unwrap(),
            Compatibility::Backward
        );

        client
            .set_subject_compatibility(&subject, Compatibility::None)
            .await
            .unwrap();
        assert_eq!(
            client
                .get_subject_derived_compatibility(&subject)
                .await
                .unwrap(),
            Compatibility::None
        );
        assert!(
            client
                .set_subject_compatibility(&subject, Compatibility::Unset)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let client = MockSchemaRegistryClient::new();
        let err = client.list_versions(&"nope".into()).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.error_code(), Some(40401));
    }
}
