use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a message type. Key of the bus handler map.
///
/// Suggested convention: `{namespace}.{message}.v{major}`
/// (e.g. `acme.billing.charge.v1`), but any non-empty string works.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageName(String);

impl MessageName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for MessageName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Lets the map be probed with a plain `&str` without allocating.
impl Borrow<str> for MessageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
