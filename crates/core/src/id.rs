//! Strongly-typed identifiers used across the domain.
//!
//! Warehouse identifiers are operator-facing codes (SKU codes, bin labels),
//! not generated UUIDs. They are case-sensitive and stored trimmed.

use core::borrow::Borrow;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stock-keeping unit (the SKU code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuId(String);

/// Identifier of a storage bin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinId(String);

/// Identifier of a palette record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteId(String);

macro_rules! impl_code_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap an already-normalized code.
            ///
            /// Callers holding raw operator input should go through `parse`.
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Trim and validate a raw code.
            pub fn parse(raw: &str) -> Result<Self, DomainError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty code", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

impl_code_newtype!(SkuId, "SkuId");
impl_code_newtype!(BinId, "BinId");
impl_code_newtype!(PaletteId, "PaletteId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_keeps_case() {
        let id = SkuId::parse("  sku-01 ").unwrap();
        assert_eq!(id.as_str(), "sku-01");
        assert_ne!(id, SkuId::new("SKU-01"));
    }

    #[test]
    fn parse_rejects_blank_codes() {
        let err = BinId::parse("   ").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.contains("BinId")));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&BinId::new("A01")).unwrap();
        assert_eq!(json, "\"A01\"");
    }
}
