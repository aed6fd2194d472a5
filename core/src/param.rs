//! Key/value pair used for both headers and query parameters.

/// A single key/value association.
///
/// No uniqueness constraint: the same key may appear several times in a
/// header or query list, and lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    /// Any strings are accepted, including empty ones.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
