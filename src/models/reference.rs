use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency code -> exchange rate
pub type Rates = BTreeMap<String, f64>;

/// Leaderboard window for `GET /rankings`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPeriod {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl RankingPeriod {
    pub const ALL: [RankingPeriod; 3] = [Self::Daily, Self::Monthly, Self::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Today",
            Self::Monthly => "This month",
            Self::Yearly => "This year",
        }
    }
}

impl fmt::Display for RankingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /rag/query` response
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AssistantAnswer {
    pub answer: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub sources: Vec<String>,
    /// Stage name -> seconds
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub timings: BTreeMap<String, f64>,
}

impl AssistantAnswer {
    pub fn total_seconds(&self) -> Option<f64> {
        self.timings.get("total_handler").copied()
    }
}
