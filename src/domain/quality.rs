//! Exterior quality tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Exterior quality tier of an item, bounded by its wear float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "Factory New")]
    FactoryNew,
    #[serde(rename = "Minimal Wear")]
    MinimalWear,
    #[default]
    #[serde(rename = "Field-Tested")]
    FieldTested,
    #[serde(rename = "Well-Worn")]
    WellWorn,
    #[serde(rename = "Battle-Scarred")]
    BattleScarred,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::FactoryNew,
        Quality::MinimalWear,
        Quality::FieldTested,
        Quality::WellWorn,
        Quality::BattleScarred,
    ];

    /// Marketplace display name, e.g. `Field-Tested`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FactoryNew => "Factory New",
            Self::MinimalWear => "Minimal Wear",
            Self::FieldTested => "Field-Tested",
            Self::WellWorn => "Well-Worn",
            Self::BattleScarred => "Battle-Scarred",
        }
    }

    /// Two-letter code used in listing filters.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FactoryNew => "fn",
            Self::MinimalWear => "mw",
            Self::FieldTested => "ft",
            Self::WellWorn => "ww",
            Self::BattleScarred => "bs",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(needle) || q.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::UnknownQuality(needle.to_string()))
    }
}
