//! Attribute values that may fail to read.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An attribute read from the document model.
///
/// Serialized untagged: a readable value is written as the bare value, an
/// unreadable one as `{"unreadable": "<reason>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attr<T> {
    /// The attribute was read successfully
    Value(T),
    /// The attribute could not be read
    Unreadable {
        /// Reason reported by the document model
        unreadable: String,
    },
}

impl<T> Attr<T> {
    /// Create an unreadable attribute.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Attr::Unreadable {
            unreadable: reason.into(),
        }
    }

    /// Get the value if it was readable.
    pub fn value(&self) -> Option<&T> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Unreadable { .. } => None,
        }
    }

    /// Check if the attribute was readable.
    pub fn is_readable(&self) -> bool {
        matches!(self, Attr::Value(_))
    }

    /// Read the value, naming the attribute in the error.
    pub fn read(&self, attribute: &str) -> Result<&T> {
        match self {
            Attr::Value(v) => Ok(v),
            Attr::Unreadable { unreadable } => Err(Error::element_read(attribute, unreadable)),
        }
    }

    /// Map a readable value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Value(v) => Attr::Value(f(v)),
            Attr::Unreadable { unreadable } => Attr::Unreadable { unreadable },
        }
    }
}

impl<T: Copy> Attr<T> {
    /// Copy the value out if it was readable.
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<T> From<T> for Attr<T> {
    fn from(value: T) -> Self {
        Attr::Value(value)
    }
}
