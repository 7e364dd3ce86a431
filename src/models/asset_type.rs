use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of financial instrument held in a carteira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    FixedIncome,
    Stock,
    Fund,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::FixedIncome => "FIXED_INCOME",
            AssetType::Stock => "STOCK",
            AssetType::Fund => "FUND",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIXED_INCOME" => Ok(AssetType::FixedIncome),
            "STOCK" => Ok(AssetType::Stock),
            "FUND" => Ok(AssetType::Fund),
            other => Err(format!("Unknown asset type: {}", other)),
        }
    }
}
