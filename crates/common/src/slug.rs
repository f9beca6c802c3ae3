//! Validated tenant slug value object.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum slug length in characters.
const MIN_LEN: usize = 3;
/// Maximum slug length in characters.
const MAX_LEN: usize = 63;

/// Error returned when a slug fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// Slug is shorter than the minimum or longer than the maximum.
    #[error("slug must be between {MIN_LEN} and {MAX_LEN} characters, got {0}")]
    InvalidLength(usize),

    /// Slug contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens: {0:?}")]
    InvalidCharacter(char),

    /// Slug starts or ends with a hyphen.
    #[error("slug must not start or end with a hyphen")]
    EdgeHyphen,
}

/// Human-readable tenant identifier, unique across the system.
///
/// Slugs are 3–63 lowercase ASCII alphanumeric characters or hyphens, with no
/// leading or trailing hyphen. A slug is immutable once assigned to a tenant;
/// uniqueness is enforced by the slug registry, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Parses and validates a slug.
    pub fn parse(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();

        if value.len() < MIN_LEN || value.len() > MAX_LEN {
            return Err(SlugError::InvalidLength(value.len()));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(bad));
        }
        if value.starts_with('-') || value.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(value))
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TenantSlug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TenantSlug> for String {
    fn from(slug: TenantSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for TenantSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
