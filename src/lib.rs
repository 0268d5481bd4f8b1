//!An asynchronous Rust client library and command line tool for the
//![Confluent Schema Registry](https://github.com/confluentinc/schema-registry).
//!
//!## The library
//!
//!`sr-client` speaks the registry's REST protocol: it builds the request for each endpoint,
//!decodes the registry's JSON envelopes, and resolves a subject's effective compatibility level.
//!Schemas are treated as opaque strings; nothing is cached and nothing is retried.
//!
//!### Features
//!
//!- Register schemas, look them up by id, by subject and version, or by content
//!- List subjects and versions
//!- Check compatibility of a schema against a registered version
//!- Read and update compatibility levels, with subject-then-default resolution
//!- Copy every subject of one registry into another, renaming subjects by prefix
//!
//!### Clients
//!
//!- [`SchemaRegistryClient`] - talks to a registry through a [`Transport`], by default a `reqwest::Client`
//!- [`MockSchemaRegistryClient`] - an in-memory registry for tests
//!
//!Both implement the [`Client`] trait, which is what [`copy::copy`] works against.
//!
//!```no_run
//!use sr_client::rest::client_config::ClientConfig;
//!use sr_client::rest::models::{Schema, Subject};
//!use sr_client::rest::schema_registry_client::{Client, SchemaRegistryClient};
//!
//!# async fn run() -> Result<(), sr_client::rest::apis::Error> {
//!let client = SchemaRegistryClient::new(ClientConfig::new("http://localhost:8081"));
//!let subject = Subject::value("orders");
//!let id = client.register_schema(&subject, &Schema::from(r#""string""#)).await?;
//!let level = client.get_subject_derived_compatibility(&subject).await?;
//!println!("registered {} with compatibility {}", id, level);
//!# Ok(())
//!# }
//!```
//!
//!## The `sr` command
//!
//!```bash
//!export SCHEMA_REGISTRY_URL=http://localhost:8081
//!sr add orders-value < orders.avsc
//!sr ls orders-value latest
//!sr config orders-value
//!```
//!
//![`SchemaRegistryClient`]: rest::schema_registry_client::SchemaRegistryClient
//![`MockSchemaRegistryClient`]: rest::mock_schema_registry_client::MockSchemaRegistryClient
//![`Client`]: rest::schema_registry_client::Client
//![`Transport`]: rest::transport::Transport

pub mod copy;
pub mod rest;
