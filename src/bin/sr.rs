//! `sr` - command line client for the schema registry.
//!
//! ```bash
//! sr --host http://localhost:8081 ls
//! sr add foo-value < schema.json
//! sr compatible foo-value 3 schema.json
//! sr config foo-value
//! sr copy http://other:8081 --from-prefix dev. --to-prefix prod.
//! ```

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use sr_client::copy::copy;
use sr_client::rest::client_config::ClientConfig;
use sr_client::rest::models::{Compatibility, Schema, SchemaId, SchemaPayload, Subject, Version};
use sr_client::rest::schema_registry_client::{Client, SchemaRegistryClient};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Schema registry command line client
#[derive(Parser, Debug)]
#[command(name = "sr")]
#[command(version)]
struct Args {
    /// URL of the schema registry
    #[arg(long, env = "SCHEMA_REGISTRY_URL", global = true)]
    host: Option<String>,

    /// Log requests and responses
    #[arg(long, global = true)]
    verbose: bool,

    /// Pretty print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a schema: sr add foo-value < schema.json
    Add {
        subject: String,
        /// Schema file, stdin if omitted
        file: Option<PathBuf>,
    },

    /// Print the version and id of an already registered schema
    Exists {
        subject: String,
        file: Option<PathBuf>,
    },

    /// Check a schema against a version (number or `latest`)
    Compatible {
        subject: String,
        #[arg(value_name = "VERSION")]
        schema_version: Version,
        file: Option<PathBuf>,
    },

    /// List subjects, the versions of a subject, or print one version
    Ls {
        subject: Option<String>,
        #[arg(value_name = "VERSION", requires = "subject")]
        schema_version: Option<Version>,
    },

    /// Print the schema with the given id
    Schema { id: SchemaId },

    /// Print the default compatibility, or the effective one of a subject
    Config { subject: Option<String> },

    /// Set the compatibility level of a subject
    SetConfig {
        subject: String,
        level: Compatibility,
    },

    /// Copy the latest schema of every subject to another registry
    Copy {
        /// URL of the destination registry
        to: String,
        #[arg(long, default_value = "")]
        from_prefix: String,
        #[arg(long, default_value = "")]
        to_prefix: String,
    },

    /// Wrap a raw schema into a registry request body
    Wrap { file: Option<PathBuf> },

    /// Extract the schema document from a registry request body
    Unwrap { file: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(args.verbose);

    match &args.command {
        Commands::Add { subject, file } => {
            let schema = read_schema(file.as_deref()).await?;
            let id = client(&args)?
                .register_schema(&Subject::from(subject.as_str()), &schema)
                .await?;
            println!("{}", id);
        }
        Commands::Exists { subject, file } => {
            let schema = read_schema(file.as_deref()).await?;
            let (version, id) = client(&args)?
                .has_schema(&Subject::from(subject.as_str()), &schema)
                .await?;
            println!("{} {}", version, id);
        }
        Commands::Compatible {
            subject,
            schema_version,
            file,
        } => {
            let schema = read_schema(file.as_deref()).await?;
            let is = client(&args)?
                .is_compatible(&Subject::from(subject.as_str()), schema_version, &schema)
                .await?;
            println!("{}", is);
        }
        Commands::Ls {
            subject,
            schema_version,
        } => {
            let client = client(&args)?;
            match (subject, schema_version) {
                (None, _) => {
                    for subject in client.list_subjects().await? {
                        println!("{}", subject);
                    }
                }
                (Some(subject), None) => {
                    for version in client.list_versions(&Subject::from(subject.as_str())).await? {
                        println!("{}", version);
                    }
                }
                (Some(subject), Some(version)) => {
                    let (_, schema) = client
                        .get_version(&Subject::from(subject.as_str()), version)
                        .await?;
                    println!("{}", schema);
                }
            }
        }
        Commands::Schema { id } => {
            println!("{}", client(&args)?.get_schema(*id).await?);
        }
        Commands::Config { subject } => {
            let client = client(&args)?;
            let level = match subject {
                None => client.get_default_compatibility().await?,
                Some(subject) => {
                    client
                        .get_subject_derived_compatibility(&Subject::from(subject.as_str()))
                        .await?
                }
            };
            println!("{}", level);
        }
        Commands::SetConfig { subject, level } => {
            let level = client(&args)?
                .set_subject_compatibility(&Subject::from(subject.as_str()), *level)
                .await?;
            println!("{}", level);
        }
        Commands::Copy {
            to,
            from_prefix,
            to_prefix,
        } => {
            let from = client(&args)?;
            let to = SchemaRegistryClient::new(client_config(to, args.timeout)?);
            let copied = copy(&from, &to, from_prefix, to_prefix).await?;
            println!("{}", copied);
        }
        Commands::Wrap { file } => {
            let schema = read_schema(file.as_deref()).await?;
            println!("{}", serde_json::to_string(&SchemaPayload::new(&schema))?);
        }
        Commands::Unwrap { file } => {
            let input = read_input(file.as_deref()).await?;
            let payload: SchemaPayload =
                serde_json::from_str(&input).context("input is not a schema request body")?;
            let document: serde_json::Value = serde_json::from_str(payload.schema.as_str())
                .context("embedded schema is not JSON")?;
            let output = if args.pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{}", output);
        }
    }

    Ok(())
}

fn setup_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn client_config(url: &str, timeout: Option<u64>) -> Result<ClientConfig> {
    match timeout {
        Some(secs) => Ok(ClientConfig::with_timeout(url, Duration::from_secs(secs))?),
        None => Ok(ClientConfig::new(url)),
    }
}

fn client(args: &Args) -> Result<SchemaRegistryClient> {
    let host = args
        .host
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| anyhow!("--host or SCHEMA_REGISTRY_URL must be provided"))?;
    Ok(SchemaRegistryClient::new(client_config(host, args.timeout)?))
}

async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("reading stdin")?;
            Ok(input)
        }
    }
}

async fn read_schema(file: Option<&Path>) -> Result<Schema> {
    Ok(Schema::from(read_input(file).await?))
}
