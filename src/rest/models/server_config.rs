use crate::rest::apis::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Config : Body of the `/config` endpoints.
///
/// The registry answers `GET` with `compatibilityLevel` and expects
/// `compatibility` on `PUT` (and echoes it back).
#[derive(Clone, Default, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(rename = "compatibility", skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Compatibility>,
    #[serde(rename = "compatibilityLevel", skip_serializing_if = "Option::is_none")]
    pub compatibility_level: Option<Compatibility>,
}

impl ServerConfig {
    /// Body for `PUT /config/{subject}`
    pub fn update(compatibility: Compatibility) -> ServerConfig {
        ServerConfig {
            compatibility: Some(compatibility),
            compatibility_level: None,
        }
    }
}

/// Compatibility Level
///
/// `Unset` is never returned by the registry; it stands for "no level" when
/// a subject has no override of its own.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Default,
)]
pub enum Compatibility {
    #[serde(rename = "")]
    #[default]
    Unset,
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "FULL")]
    Full,
    #[serde(rename = "FORWARD")]
    Forward,
    #[serde(rename = "BACKWARD")]
    Backward,
    #[serde(rename = "BACKWARD_TRANSITIVE")]
    BackwardTransitive,
    #[serde(rename = "FORWARD_TRANSITIVE")]
    ForwardTransitive,
    #[serde(rename = "FULL_TRANSITIVE")]
    FullTransitive,
}

impl Compatibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compatibility::Unset => "",
            Compatibility::None => "NONE",
            Compatibility::Full => "FULL",
            Compatibility::Forward => "FORWARD",
            Compatibility::Backward => "BACKWARD",
            Compatibility::BackwardTransitive => "BACKWARD_TRANSITIVE",
            Compatibility::ForwardTransitive => "FORWARD_TRANSITIVE",
            Compatibility::FullTransitive => "FULL_TRANSITIVE",
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == Compatibility::Unset
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compatibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "" => Ok(Compatibility::Unset),
            "NONE" => Ok(Compatibility::None),
            "FULL" => Ok(Compatibility::Full),
            "FORWARD" => Ok(Compatibility::Forward),
            "BACKWARD" => Ok(Compatibility::Backward),
            "BACKWARD_TRANSITIVE" => Ok(Compatibility::BackwardTransitive),
            "FORWARD_TRANSITIVE" => Ok(Compatibility::ForwardTransitive),
            "FULL_TRANSITIVE" => Ok(Compatibility::FullTransitive),
            _ => Err(Error::InvalidCompatibility(s.to_string())),
        }
    }
}
