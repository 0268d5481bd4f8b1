//! Copying every subject of one registry into another.

use crate::rest::apis::Error;
use crate::rest::models::Subject;
use crate::rest::schema_registry_client::Client;
use log::info;

/// A copy that stopped part way. Subjects copied before the failure stay copied.
#[derive(thiserror::Error, Debug)]
#[error("copy stopped after {copied} subjects: {source}")]
pub struct CopyError {
    pub copied: usize,
    #[source]
    pub source: Error,
}

/// Renames `subject` by swapping a leading `from_prefix` for `to_prefix`.
/// Subjects that do not start with `from_prefix` keep their name.
pub fn rename_subject(subject: &Subject, from_prefix: &str, to_prefix: &str) -> Subject {
    match subject.as_str().strip_prefix(from_prefix) {
        Some(rest) => Subject::new(format!("{}{}", to_prefix, rest)),
        None => subject.clone(),
    }
}

/// Registers the latest schema of every subject in `from` under the renamed
/// subject in `to`, one subject at a time in listing order.
///
/// Returns the number of subjects copied. The first failure ends the copy.
pub async fn copy<F, D>(
    from: &F,
    to: &D,
    from_prefix: &str,
    to_prefix: &str,
) -> Result<usize, CopyError>
where
    F: Client + Sync,
    D: Client + Sync,
{
    let mut copied = 0;
    let stop = |copied, source| CopyError { copied, source };

    let subjects = from.list_subjects().await.map_err(|e| stop(copied, e))?;
    for subject in subjects {
        let (_, schema) = from
            .get_latest_schema(&subject)
            .await
            .map_err(|e| stop(copied, e))?;

        let to_subject = rename_subject(&subject, from_prefix, to_prefix);
        let id = to
            .register_schema(&to_subject, &schema)
            .await
            .map_err(|e| stop(copied, e))?;
        info!("copied {} to {} (id {})", subject, to_subject, id);

        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::mock_schema_registry_client::MockSchemaRegistryClient;
    use crate::rest::models::Schema;
    use crate::rest::schema_registry_client::SchemaRegistryClient;
    use crate::rest::stub_transport::StubTransport;

    #[test]
    fn test_rename_subject() {
        let rename = |s: &str, from, to| rename_subject(&s.into(), from, to).to_string();
        assert_eq!(rename("a-value", "a", "c"), "c-value");
        assert_eq!(rename("b-value", "a", "c"), "b-value");
        assert_eq!(rename("dev.orders-value", "dev.", "prod."), "prod.orders-value");
        assert_eq!(rename("x-dev-y", "dev", "prod"), "x-dev-y");
        assert_eq!(rename("devdev", "dev", "prod"), "proddev");
        assert_eq!(rename("orders-value", "", "dev."), "dev.orders-value");
    }

    #[tokio::test]
    async fn test_copy_between_registries() {
        let from = MockSchemaRegistryClient::new();
        let to = MockSchemaRegistryClient::new();
        from.register_schema(&"a-value".into(), &"A".into()).await.unwrap();
        from.register_schema(&"b-value".into(), &"B".into()).await.unwrap();

        let copied = copy(&from, &to, "a", "c").await.unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            to.list_subjects().await.unwrap(),
            vec![Subject::from("b-value"), Subject::from("c-value")]
        );
        assert_eq!(
            to.get_latest_schema(&"c-value".into()).await.unwrap().1,
            Schema::from("A")
        );
        assert_eq!(
            to.get_latest_schema(&"b-value".into()).await.unwrap().1,
            Schema::from("B")
        );
    }

    #[tokio::test]
    async fn test_copy_over_http() {
        let from = SchemaRegistryClient::with_transport(
            "http://source:8081",
            StubTransport::new()
                .route("GET", "http://source:8081/subjects", 200, r#"["a-value","b-value"]"#)
                .route(
                    "GET",
                    "http://source:8081/subjects/a-value/versions/latest",
                    200,
                    r#"{"version":1,"schema":"A","subject":"a-value","id":1}"#,
                )
                .route(
                    "GET",
                    "http://source:8081/subjects/b-value/versions/latest",
                    200,
                    r#"{"version":3,"schema":"B","subject":"b-value","id":2}"#,
                ),
        );
        let to = SchemaRegistryClient::with_transport(
            "http://dest:8081",
            StubTransport::new()
                .route("POST", "http://dest:8081/subjects/c-value/versions", 200, r#"{"id":10}"#)
                .route("POST", "http://dest:8081/subjects/b-value/versions", 200, r#"{"id":11}"#),
        );

        assert_eq!(copy(&from, &to, "a", "c").await.unwrap(), 2);

        let registered: Vec<(String, Option<String>)> = to
            .transport()
            .requests()
            .iter()
            .map(|r| (r.url.path().to_string(), r.body_str().map(String::from)))
            .collect();
        assert_eq!(
            registered,
            vec![
                (
                    "/subjects/c-value/versions".to_string(),
                    Some(r#"{"schema":"A"}"#.to_string())
                ),
                (
                    "/subjects/b-value/versions".to_string(),
                    Some(r#"{"schema":"B"}"#.to_string())
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_copy_stops_on_first_failure() {
        let from = SchemaRegistryClient::with_transport(
            "http://source:8081",
            StubTransport::new()
                .route("GET", "/subjects", 200, r#"["a","b","c"]"#)
                .route(
                    "GET",
                    "/subjects/a/versions/latest",
                    200,
                    r#"{"version":1,"schema":"A","subject":"a","id":1}"#,
                )
                .route(
                    "GET",
                    "/subjects/b/versions/latest",
                    500,
                    r#"{"error_code":50001,"message":"Error in the backend data store"}"#,
                )
                .route(
                    "GET",
                    "/subjects/c/versions/latest",
                    200,
                    r#"{"version":1,"schema":"C","subject":"c","id":3}"#,
                ),
        );
        let to = MockSchemaRegistryClient::new();

        let err = copy(&from, &to, "", "").await.unwrap_err();
        assert_eq!(err.copied, 1);
        assert_eq!(err.source.error_code(), Some(50001));
        assert_eq!(to.list_subjects().await.unwrap(), vec![Subject::from("a")]);

        let fetched: Vec<String> = from
            .transport()
            .requests()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert!(!fetched.contains(&"/subjects/c/versions/latest".to_string()));
    }

    #[tokio::test]
    async fn test_copy_listing_failure() {
        let from = SchemaRegistryClient::with_transport(
            "http://source:8081",
            StubTransport::new().fail_on("/subjects"),
        );
        let to = MockSchemaRegistryClient::new();

        let err = copy(&from, &to, "a", "b").await.unwrap_err();
        assert_eq!(err.copied, 0);
        assert!(matches!(err.source, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_copy_register_failure() {
        let from = MockSchemaRegistryClient::new();
        from.register_schema(&"a".into(), &"A".into()).await.unwrap();
        from.register_schema(&"b".into(), &"B".into()).await.unwrap();
        let to = SchemaRegistryClient::with_transport(
            "http://dest:8081",
            StubTransport::new()
                .route("POST", "/subjects/a/versions", 200, r#"{"id":1}"#)
                .route(
                    "POST",
                    "/subjects/b/versions",
                    409,
                    r#"{"error_code":409,"message":"Schema being registered is incompatible"}"#,
                ),
        );

        let err = copy(&from, &to, "", "").await.unwrap_err();
        assert_eq!(err.copied, 1);
        assert_eq!(err.source.status().map(|s| s.as_u16()), Some(409));
    }
}
