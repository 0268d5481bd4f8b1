use crate::rest::apis::Error;
use crate::rest::models::{
    Compatibility, CompatibilityCheck, RegisteredSchema, Schema, SchemaId, SchemaIdResponse,
    SchemaPayload, ServerConfig, Subject, Version,
};
use crate::rest::rest_service::RestService;
use crate::rest::transport::Transport;
use crate::rest::{client_config, requests};
use log::debug;
use reqwest::StatusCode;

#[trait_variant::make(Send)]
pub trait Client {
    /// Registers `schema` under `subject` and returns its id. Registering
    /// identical content again returns the existing id.
    async fn register_schema(&self, subject: &Subject, schema: &Schema) -> Result<SchemaId, Error>;
    async fn get_schema(&self, id: SchemaId) -> Result<Schema, Error>;
    async fn get_version(
        &self,
        subject: &Subject,
        version: &Version,
    ) -> Result<(SchemaId, Schema), Error>;
    async fn get_latest_schema(&self, subject: &Subject) -> Result<(SchemaId, Schema), Error>;
    /// Version and id under which `schema` is registered for `subject`.
    async fn has_schema(&self, subject: &Subject, schema: &Schema) -> Result<(u32, SchemaId), Error>;
    async fn is_compatible(
        &self,
        subject: &Subject,
        version: &Version,
        schema: &Schema,
    ) -> Result<bool, Error>;
    async fn list_subjects(&self) -> Result<Vec<Subject>, Error>;
    async fn list_versions(&self, subject: &Subject) -> Result<Vec<u32>, Error>;
    async fn get_default_compatibility(&self) -> Result<Compatibility, Error>;
    /// The subject's own level, or [`Compatibility::Unset`] if it has none.
    async fn get_subject_compatibility(&self, subject: &Subject) -> Result<Compatibility, Error>;
    /// The subject's own level, falling back to the registry default.
    async fn get_subject_derived_compatibility(
        &self,
        subject: &Subject,
    ) -> Result<Compatibility, Error>;
    async fn set_subject_compatibility(
        &self,
        subject: &Subject,
        compatibility: Compatibility,
    ) -> Result<Compatibility, Error>;
}

/// Schema registry client over HTTP.
///
/// Holds only the immutable base address and the transport, so a shared
/// reference can be used from several tasks at once.
#[derive(Debug, Clone)]
pub struct SchemaRegistryClient<T = reqwest::Client> {
    rest_service: RestService<T>,
}

impl SchemaRegistryClient<reqwest::Client> {
    pub fn new(config: client_config::ClientConfig) -> Self {
        SchemaRegistryClient {
            rest_service: RestService::new(config.base_url, config.client),
        }
    }
}

impl<T: Transport> SchemaRegistryClient<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        SchemaRegistryClient {
            rest_service: RestService::new(base_url, transport),
        }
    }

    pub fn base_url(&self) -> &str {
        self.rest_service.base_url()
    }

    pub fn transport(&self) -> &T {
        self.rest_service.transport()
    }

    /// Status of `GET /config/{subject}` together with the level it names.
    /// A 404 means the subject has no override.
    async fn subject_config(&self, subject: &Subject) -> Result<(StatusCode, Compatibility), Error> {
        let request = requests::get_subject_config(self.base_url(), subject)?;
        let resp = self.rest_service.execute(request).await?;
        if resp.status == StatusCode::NOT_FOUND {
            return Ok((resp.status, Compatibility::Unset));
        }
        resp.error_for_status()?;
        let config: ServerConfig = resp.decode_required()?;
        Ok((resp.status, config.compatibility_level.unwrap_or_default()))
    }
}

impl<T: Transport + Sync> Client for SchemaRegistryClient<T> {
    async fn register_schema(&self, subject: &Subject, schema: &Schema) -> Result<SchemaId, Error> {
        let request = requests::register(self.base_url(), subject, &SchemaPayload::new(schema))?;
        let resp = self.rest_service.execute(request).await?;
        resp.error_for_status()?;
        let result: SchemaIdResponse = resp.decode_required()?;
        if result.id == 0 {
            return Err(resp.unexpected());
        }
        Ok(result.id)
    }

    async fn get_schema(&self, id: SchemaId) -> Result<Schema, Error> {
        let request = requests::get_schema(self.base_url(), id)?;
        let resp = self.rest_service.execute(request).await?;
        resp.error_for_status()?;
        let result: SchemaPayload = resp.decode_required()?;
        Ok(result.schema)
    }

    async fn get_version(
        &self,
        subject: &Subject,
        version: &Version,
    ) -> Result<(SchemaId, Schema), Error> {
        let request = requests::get_version(self.base_url(), subject, version)?;
        let resp = self.rest_service.execute(request).await?;
        resp.error_for_status()?;
        let rs: RegisteredSchema = resp.decode_required()?;
        if rs.schema.is_empty() {
            return Err(resp.unexpected());
        }
        Ok((rs.id, rs.schema))
    }

    async fn get_latest_schema(&self, subject: &Subject) -> Result<(SchemaId, Schema), Error> {
        self.get_version(subject, &Version::Latest).await
    }

    async fn has_schema(&self, subject: &Subject, schema: &Schema) -> Result<(u32, SchemaId), Error> {
        let request = requests::has_schema(self.base_url(), subject, &SchemaPayload::new(schema))?;
        let resp = self.rest_service.execute(request).await?;
        resp.error_for_status()?;
        let rs: RegisteredSchema = resp.decode_required()?;
        Ok((rs.version, rs.id))
    }

    async fn is_compatible(
        &self,
        subject: &Subject,
        version: &Version,
        schema: &Schema,
    ) -> Result<bool, Error> {
        let request = requests::check_compatibility(
            self.base_url(),
            subject,
            version,
            &SchemaPayload::new(schema),
        )?;
        let resp = self.rest_service.execute(request).await?;
        // The verdict only means something on a plain 200.
        resp.require_status(StatusCode::OK)?;
        let result: CompatibilityCheck = resp.decode_required()?;
        Ok(result.is_compatible)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, Error> {
        let request = requests::list_subjects(self.base_url())?;
        let resp = self.rest_service.execute(request).await?;
        resp.error_for_status()?;
        Ok(resp.decode()?.unwrap_or_default())
    }

    async fn list_versions(&self, subject: &Subject) -> Result<Vec<u32>, Error> {
        let request = requests::list_versions(self.base_url(), subject)?;
        let resp = self.rest_service.execute(request).await?;
        resp.error_for_status()?;
        Ok(resp.decode()?.unwrap_or_default())
    }

    async fn get_default_compatibility(&self) -> Result<Compatibility, Error> {
        let request = requests::get_config(self.base_url())?;
        let resp = self.rest_service.execute(request).await?;
        resp.error_for_status()?;
        let config: ServerConfig = resp.decode_required()?;
        Ok(config.compatibility_level.unwrap_or_default())
    }

    async fn get_subject_compatibility(&self, subject: &Subject) -> Result<Compatibility, Error> {
        let (_, compatibility) = self.subject_config(subject).await?;
        Ok(compatibility)
    }

    async fn get_subject_derived_compatibility(
        &self,
        subject: &Subject,
    ) -> Result<Compatibility, Error> {
        let (status, compatibility) = self.subject_config(subject).await?;
        if status == StatusCode::NOT_FOUND {
            debug!("no compatibility override for {}, using default", subject);
            return self.get_default_compatibility().await;
        }
        Ok(compatibility)
    }

    async fn set_subject_compatibility(
        &self,
        subject: &Subject,
        compatibility: Compatibility,
    ) -> Result<Compatibility, Error> {
        let request = requests::put_subject_config(
            self.base_url(),
            subject,
            &ServerConfig::update(compatibility),
        )?;
        let resp = self.rest_service.execute(request).await?;
        resp.require_status(StatusCode::OK)?;
        let config: ServerConfig = resp.decode_required()?;
        Ok(config.compatibility.unwrap_or_default())
    }
}
