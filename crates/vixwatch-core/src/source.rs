use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Canonical identifiers for the index source adapters, in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    YahooIntraday,
    YahooDaily,
    Cnbc,
    Investing,
    YahooDirect,
    Cboe,
}

impl SourceId {
    pub const ALL: [Self; 6] = [
        Self::YahooIntraday,
        Self::YahooDaily,
        Self::Cnbc,
        Self::Investing,
        Self::YahooDirect,
        Self::Cboe,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YahooIntraday => "yahoo_intraday",
            Self::YahooDaily => "yahoo_daily",
            Self::Cnbc => "cnbc",
            Self::Investing => "investing",
            Self::YahooDirect => "yahoo_direct",
            Self::Cboe => "cboe",
        }
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
