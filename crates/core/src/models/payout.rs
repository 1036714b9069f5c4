use serde::{Deserialize, Serialize};

/// Dividend payout cadence, derived from the spacing of historical
/// dividend dates. `Irregular` doubles as the fail-soft label for
/// tickers with too little history or a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
    Irregular,
}

impl std::fmt::Display for PayoutFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoutFrequency::Weekly => write!(f, "Weekly"),
            PayoutFrequency::Monthly => write!(f, "Monthly"),
            PayoutFrequency::Quarterly => write!(f, "Quarterly"),
            PayoutFrequency::Semiannual => write!(f, "Semiannual"),
            PayoutFrequency::Annual => write!(f, "Annual"),
            PayoutFrequency::Irregular => write!(f, "Irregular/None"),
        }
    }
}
