use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject : Registry bucket that schema versions are registered under.
///
/// A subject is not a topic. By the topic name convention a topic `foo` has
/// up to two subjects, `foo-key` for the key schema and `foo-value` for the
/// value schema.
#[derive(Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    pub fn new(subject: impl Into<String>) -> Subject {
        Subject(subject.into())
    }

    /// The "no subject" placeholder.
    pub fn empty() -> Subject {
        Subject(String::new())
    }

    /// Subject holding the key schema of `topic`.
    pub fn key(topic: &str) -> Subject {
        if topic.is_empty() {
            return Subject::empty();
        }
        Subject(format!("{}-key", topic))
    }

    /// Subject holding the value schema of `topic`.
    pub fn value(topic: &str) -> Subject {
        if topic.is_empty() {
            return Subject::empty();
        }
        Subject(format!("{}-value", topic))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Subject {
    fn from(subject: String) -> Self {
        Subject(subject)
    }
}

impl From<&str> for Subject {
    fn from(subject: &str) -> Self {
        Subject(subject.to_string())
    }
}
