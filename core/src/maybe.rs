//! Tri-state optional values.
//!
//! # Design
//! The API distinguishes a field that is absent from one that is explicitly
//! `null`. `Option<T>` collapses the two, so models and query parameters use
//! `Maybe<T>` instead. In a struct, pair it with
//! `#[serde(default, skip_serializing_if = "Maybe::is_unset")]` so that an
//! absent key decodes to `Unset` and `Unset` is never written back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is absent, explicitly null, or present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    /// The key was not present.
    Unset,
    /// The key was present with a `null` value.
    Null,
    /// The key was present with a value.
    Set(T),
}

impl<T> Maybe<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Maybe::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Maybe::Null)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Maybe::Set(_))
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Unset => Maybe::Unset,
            Maybe::Null => Maybe::Null,
            Maybe::Set(value) => Maybe::Set(value),
        }
    }

    /// Borrow the value, treating `Unset` and `Null` alike.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Maybe::Set(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Set(value) => Some(value),
            _ => None,
        }
    }

    /// `None` maps to `Null`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Maybe::Null, Maybe::Set)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Maybe<U> {
        match self {
            Maybe::Unset => Maybe::Unset,
            Maybe::Null => Maybe::Null,
            Maybe::Set(value) => Maybe::Set(f(value)),
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Unset
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Self {
        Maybe::Set(value)
    }
}

impl From<&str> for Maybe<String> {
    fn from(value: &str) -> Self {
        Maybe::Set(value.to_string())
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Maybe::Set(value) => value.serialize(serializer),
            Maybe::Unset | Maybe::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Maybe::from_option)
    }
}
