use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// File name used for the paste living at `/`.
pub const DEFAULT_FILE_NAME: &str = "__default";

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid paste name: {0:?}")]
pub struct InvalidName(String);

/// A paste name that has been checked to contain only ASCII alphanumerics and
/// underscores. The empty name is valid and refers to the default paste.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PasteName(String);

impl PasteName {
    /// Validate the path of a request URI, e.g. `/notes`.
    pub fn from_path(path: &str) -> Result<Self, InvalidName> {
        path.strip_prefix('/').unwrap_or(path).parse()
    }

    /// The URL path this paste is served at.
    pub fn path(&self) -> String {
        format!("/{}", self.0)
    }

    /// The name of the file backing this paste inside the storage directory.
    pub fn file_name(&self) -> &str {
        if self.0.is_empty() {
            DEFAULT_FILE_NAME
        } else {
            &self.0
        }
    }
}

impl FromStr for PasteName {
    type Err = InvalidName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(PasteName(s.to_owned()))
        } else {
            Err(InvalidName(s.to_owned()))
        }
    }
}

impl fmt::Display for PasteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
