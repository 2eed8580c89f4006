use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use beautycom_core::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::is_known_permission;

/// Errors raised when a grant is checked against the permission catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The grant names a key that is not part of the catalog.
    #[error("unknown permission key '{key}'")]
    UnknownPermissionKey {
        /// Offending key.
        key: String,
    },
}

impl From<PermissionError> for AppError {
    fn from(value: PermissionError) -> Self {
        AppError::Validation(value.to_string())
    }
}

/// Permission state of one staff member in one salon.
///
/// Absent keys are not granted. Keys are kept sorted so serialized grants are
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionGrant(BTreeMap<String, bool>);

impl PermissionGrant {
    /// Creates an empty grant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grant from `(key, granted)` pairs. Later pairs win.
    pub fn from_flags<K, I>(flags: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, bool)>,
    {
        Self(
            flags
                .into_iter()
                .map(|(key, granted)| (key.into(), granted))
                .collect(),
        )
    }

    /// Returns whether the key is explicitly granted.
    #[must_use]
    pub fn is_granted(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    /// Returns the stored flag for a key, `None` when the key is unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Sets the flag for a key.
    pub fn set(&mut self, key: impl Into<String>, granted: bool) {
        self.0.insert(key.into(), granted);
    }

    /// Returns every key whose flag is `true`, sorted.
    #[must_use]
    pub fn granted_keys(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter_map(|(key, granted)| granted.then_some(key.as_str()))
            .collect()
    }

    /// Number of stored keys, granted or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates stored flags in key order.
    pub fn iter(&self) -> Iter<'_, String, bool> {
        self.0.iter()
    }

    /// Rejects keys that are not part of the permission catalog.
    pub fn validate_known_keys(&self) -> Result<(), PermissionError> {
        match self.0.keys().find(|key| !is_known_permission(key)) {
            Some(key) => Err(PermissionError::UnknownPermissionKey { key: key.clone() }),
            None => Ok(()),
        }
    }
}

impl From<BTreeMap<String, bool>> for PermissionGrant {
    fn from(value: BTreeMap<String, bool>) -> Self {
        Self(value)
    }
}

impl From<PermissionGrant> for BTreeMap<String, bool> {
    fn from(value: PermissionGrant) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a PermissionGrant {
    type Item = (&'a String, &'a bool);
    type IntoIter = Iter<'a, String, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
