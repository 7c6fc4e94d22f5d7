//! Subscription tier and the prompt shape it selects.

use serde::{Deserialize, Serialize};

/// Subscription tier controlling analysis depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

impl Tier {
    /// Map the caller-supplied premium flag to a tier.
    pub fn from_premium(is_premium: bool) -> Self {
        if is_premium {
            Tier::Premium
        } else {
            Tier::Free
        }
    }

    /// Prompt configuration for this tier.
    pub fn config(self) -> TierConfig {
        match self {
            Tier::Free => TierConfig {
                min_risks: 5,
                min_opportunities: 5,
                include_extended_fields: false,
            },
            Tier::Premium => TierConfig {
                min_risks: 10,
                min_opportunities: 10,
                include_extended_fields: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompt shape selected by a tier.
///
/// One template function consumes this instead of maintaining two
/// near-duplicate prompt literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierConfig {
    /// Minimum number of risks the model is asked for
    pub min_risks: usize,

    /// Minimum number of opportunities the model is asked for
    pub min_opportunities: usize,

    /// Request the extended structured fields (key clauses, legal
    /// compliance, financial terms, ...)
    pub include_extended_fields: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_flag_selects_tier() {
        assert_eq!(Tier::from_premium(true), Tier::Premium);
        assert_eq!(Tier::from_premium(false), Tier::Free);
    }

    #[test]
    fn tier_config_item_counts() {
        assert_eq!(Tier::Free.config().min_risks, 5);
        assert_eq!(Tier::Premium.config().min_risks, 10);
        assert!(!Tier::Free.config().include_extended_fields);
        assert!(Tier::Premium.config().include_extended_fields);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"premium\"");
    }
}
