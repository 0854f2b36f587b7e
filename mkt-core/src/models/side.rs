use std::str::FromStr;

/// The role a participant plays in a market
///
/// Buyers submit demand curves and sellers submit supply curves. On the wire a
/// side is always one of the canonical strings `"buyer"` or `"seller"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// Buys from the market (demand)
    Buyer,
    /// Sells to the market (supply)
    Seller,
}

impl Side {
    /// The canonical wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = SideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            _ => Err(SideError(s.to_owned())),
        }
    }
}

/// Error when a string is not one of the canonical side names
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("Unknown market side: {0} (expected \"buyer\" or \"seller\")")]
pub struct SideError(pub String);
