//! Source pipelines and the closed catalog of pipeline identifiers.
//!
//! # Modules
//!
//! - [`source`]: [`SourcePipeline`], the concurrent fetch/normalize driver.
//!
//! Concrete pipelines are wired by
//! [`crate::infrastructure::factory::PipelineRegistry`], which implements
//! [`PipelineFactory`].

pub mod source;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{NormalizedRecord, SearchParameters, SkinIdentity};
use crate::error::{ConfigError, Result};

pub use source::SourcePipeline;

/// Every pipeline the system knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineId {
    /// CS.MONEY sell-order listings.
    Csmoney,
    /// CS.MONEY wiki page, used to canonicalize item names.
    CsmoneyWiki,
    /// Steam Community Market read through a browser driver.
    SteamBrowser,
    /// Steam Community Market render API.
    SteamApi,
}

/// What a pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Listings,
    Identity,
}

impl PipelineId {
    pub const ALL: [PipelineId; 4] = [
        PipelineId::Csmoney,
        PipelineId::CsmoneyWiki,
        PipelineId::SteamBrowser,
        PipelineId::SteamApi,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Csmoney => "csmoney",
            Self::CsmoneyWiki => "csmoney-wiki",
            Self::SteamBrowser => "steam-browser",
            Self::SteamApi => "steam-api",
        }
    }

    #[must_use]
    pub const fn output_kind(self) -> OutputKind {
        match self {
            Self::CsmoneyWiki => OutputKind::Identity,
            Self::Csmoney | Self::SteamBrowser | Self::SteamApi => OutputKind::Listings,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Csmoney => "CS.MONEY listings with float overpay",
            Self::CsmoneyWiki => "CS.MONEY wiki name and quality lookup",
            Self::SteamBrowser => "Steam market pages via browser driver",
            Self::SteamApi => "Steam market render API with inspect lookups",
        }
    }
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipelineId {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s.trim())
            .ok_or_else(|| ConfigError::UnknownPipeline {
                name: s.to_string(),
            })
    }
}

/// A constructed pipeline of either output kind.
pub enum Pipeline {
    Listings(SourcePipeline<NormalizedRecord>),
    Identity(SourcePipeline<SkinIdentity>),
}

impl Pipeline {
    #[must_use]
    pub const fn id(&self) -> PipelineId {
        match self {
            Self::Listings(p) => p.id(),
            Self::Identity(p) => p.id(),
        }
    }

    pub fn into_listings(self) -> Result<SourcePipeline<NormalizedRecord>> {
        match self {
            Self::Listings(p) => Ok(p),
            Self::Identity(p) => Err(ConfigError::PipelineKind {
                pipeline: p.id().to_string(),
                expected: "listings",
            }
            .into()),
        }
    }

    pub fn into_identity(self) -> Result<SourcePipeline<SkinIdentity>> {
        match self {
            Self::Identity(p) => Ok(p),
            Self::Listings(p) => Err(ConfigError::PipelineKind {
                pipeline: p.id().to_string(),
                expected: "an item identity",
            }
            .into()),
        }
    }
}

/// Builds pipelines by identifier. Construction performs no I/O.
pub trait PipelineFactory: Send + Sync {
    fn create(&self, id: PipelineId, params: &SearchParameters) -> Result<Pipeline>;

    fn listings(
        &self,
        id: PipelineId,
        params: &SearchParameters,
    ) -> Result<SourcePipeline<NormalizedRecord>> {
        self.create(id, params)?.into_listings()
    }

    fn identity(&self, id: PipelineId, params: &SearchParameters) -> Result<SourcePipeline<SkinIdentity>> {
        self.create(id, params)?.into_identity()
    }
}
