//! Catalog gender/category enumeration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown gender value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid gender: {0} (expected men, women, kid or unisex)")]
pub struct GenderError(String);

/// Catalog gender a product is listed under.
///
/// The set is closed; listings filter on it through [`crate::ProductQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Men,
    Women,
    Kid,
    Unisex,
}

impl Gender {
    /// All gender values, in display order.
    pub const ALL: [Self; 4] = [Self::Men, Self::Women, Self::Kid, Self::Unisex];

    /// Wire representation used in query strings and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kid => "kid",
            Self::Unisex => "unisex",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = GenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "kid" => Ok(Self::Kid),
            "unisex" => Ok(Self::Unisex),
            _ => Err(GenderError(s.to_string())),
        }
    }
}
