use crate::rest::apis::Error;
use std::fmt;
use std::str::FromStr;

/// Version selector for `/subjects/{subject}/versions/{version}`
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Version {
    /// Resolved by the registry to the highest version of the subject
    Latest,
    Number(u32),
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Latest => f.write_str("latest"),
            Version::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<u32> for Version {
    fn from(version: u32) -> Self {
        Version::Number(version)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "latest" {
            return Ok(Version::Latest);
        }
        match s.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Version::Number(n)),
            _ => Err(Error::InvalidVersion(s.to_string())),
        }
    }
}
