//! View state and the visibility predicate.

use serde::{Deserialize, Serialize};

use super::card::{Card, QualityTier};

/// One switch per quality tier, all on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierToggles {
    pub show_high: bool,
    pub show_medium: bool,
    pub show_low: bool,
}

impl Default for TierToggles {
    fn default() -> Self {
        Self {
            show_high: true,
            show_medium: true,
            show_low: true,
        }
    }
}

impl TierToggles {
    pub fn allows(&self, tier: QualityTier) -> bool {
        match tier {
            QualityTier::High => self.show_high,
            QualityTier::Medium => self.show_medium,
            QualityTier::Low => self.show_low,
        }
    }

    pub fn set(&mut self, tier: QualityTier, enabled: bool) {
        match tier {
            QualityTier::High => self.show_high = enabled,
            QualityTier::Medium => self.show_medium = enabled,
            QualityTier::Low => self.show_low = enabled,
        }
    }
}

/// Live inputs of the view: the search text and the tier toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    query: String,
    pub tiers: TierToggles,
}

impl ViewState {
    pub fn new(query: &str, tiers: TierToggles) -> Self {
        let mut state = Self {
            query: String::new(),
            tiers,
        };
        state.set_query(query);
        state
    }

    /// Store the query lower-cased. Whitespace is kept as typed.
    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.to_lowercase();
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// A card is visible iff its keys match the query and its tier is enabled.
pub fn is_visible(card: &Card, state: &ViewState) -> bool {
    card.keys.contains(state.query()) && state.tiers.allows(card.tier)
}
