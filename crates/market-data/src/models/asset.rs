use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fixed set of tracked assets.
///
/// The aggregator guarantees an attempt for every variant on every
/// round; there is no dynamic asset registration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Btc,
    Eth,
    Bnb,
    Pol,
}

impl Asset {
    /// Every tracked asset, in canonical order.
    pub const TRACKED: [Asset; 4] = [Asset::Btc, Asset::Eth, Asset::Bnb, Asset::Pol];

    /// Canonical ticker symbol for display and diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Bnb => "BNB",
            Asset::Pol => "POL",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
