//! Query modes understood by an index.

use crate::error::IndexError;
use std::fmt;
use std::str::FromStr;

/// How a query's data is matched against secondary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Exact secondary key.
    Key,
    /// Every secondary key starting with the given bytes.
    Prefix,
}

impl QueryMode {
    /// Wire name of [`QueryMode::Key`].
    pub const KEY: &'static str = "key";
    /// Wire name of [`QueryMode::Prefix`].
    pub const PREFIX: &'static str = "prefix";

    /// Returns the wire name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryMode::Key => Self::KEY,
            QueryMode::Prefix => Self::PREFIX,
        }
    }
}

impl FromStr for QueryMode {
    type Err = IndexError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            Self::KEY => Ok(QueryMode::Key),
            Self::PREFIX => Ok(QueryMode::Prefix),
            _ => Err(IndexError::QueryModeNotImplemented {
                mode: mode.to_string(),
            }),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
