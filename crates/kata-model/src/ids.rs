#![deny(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use crate::ModelError;

/// Marker shown as the first option of a selector with several candidates.
pub const SENTINEL: &str = "-----";

/// Identifier of a technique value (a key of the catalog tables).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ValueId(String);

impl ValueId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyValueId);
        }
        if trimmed == SENTINEL {
            return Err(ModelError::SentinelValueId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ValueId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ValueId> for String {
    fn from(value: ValueId) -> Self {
        value.0
    }
}

impl Borrow<str> for ValueId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ValueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a selector currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Selection {
    Unselected,
    Value(ValueId),
}

impl Selection {
    /// Parse raw selector input, mapping the sentinel text to `Unselected`.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if raw.trim() == SENTINEL {
            return Ok(Self::Unselected);
        }
        ValueId::new(raw).map(Self::Value)
    }

    pub fn value(&self) -> Option<&ValueId> {
        match self {
            Self::Unselected => None,
            Self::Value(value) => Some(value),
        }
    }

    pub fn is_unselected(&self) -> bool {
        matches!(self, Self::Unselected)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unselected => SENTINEL,
            Self::Value(value) => value.as_str(),
        }
    }
}

impl From<ValueId> for Selection {
    fn from(value: ValueId) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
