//! Asset classes used to select stress shocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Asset class of the analysed instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Equities and equity indices.
    Stock,
    /// Non-energy commodities.
    Commodity,
    /// Crude oil and refined products.
    Oil,
}

impl AssetType {
    /// All asset types, in display order.
    pub const ALL: [AssetType; 3] = [AssetType::Stock, AssetType::Commodity, AssetType::Oil];

    /// Lowercase identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Commodity => "commodity",
            Self::Oil => "oil",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "commodity" => Ok(Self::Commodity),
            "oil" => Ok(Self::Oil),
            other => Err(RiskError::unknown_asset_type(other)),
        }
    }
}
