//! Strongly-typed identifiers.
//!
//! Product and sale ids are assigned by the backend (e.g. `"PRD001"`), so they
//! are opaque non-empty strings. Draft ids are minted locally.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a catalog product, as assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Identifier of a recorded sale, as assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SaleId(String);

/// Identifier of one sales-entry form session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(Uuid);

macro_rules! impl_string_newtype {
    ($t:ident, $name:literal) => {
        impl $t {
            /// Wrap a backend identifier. Surrounding whitespace is trimmed; an
            /// empty result is rejected.
            pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                if trimmed.len() == raw.len() {
                    Ok(Self(raw))
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_newtype!(ProductId, "ProductId");
impl_string_newtype!(SaleId, "SaleId");

impl DraftId {
    /// Create a new identifier (UUIDv7, time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for DraftId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DraftId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("DraftId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_rejects_blank() {
        assert!(matches!(ProductId::new("   "), Err(DomainError::InvalidId(_))));
        assert!(ProductId::new("").is_err());
    }

    #[test]
    fn product_id_trims_whitespace() {
        let id = ProductId::new(" PRD001 ").unwrap();
        assert_eq!(id.as_str(), "PRD001");
    }

    #[test]
    fn sale_id_deserializes_from_plain_string() {
        let id: SaleId = serde_json::from_str("\"PJ0007\"").unwrap();
        assert_eq!(id.to_string(), "PJ0007");
        assert!(serde_json::from_str::<SaleId>("\"\"").is_err());
    }

    #[test]
    fn draft_ids_are_unique_and_parse_back() {
        let a = DraftId::new();
        let b = DraftId::new();
        assert_ne!(a, b);
        let parsed: DraftId = a.to_string().parse().unwrap();
        assert_eq!(parsed, a);
    }
}
