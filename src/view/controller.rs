//! The view controller: owns projected cards and the live view state.
//!
//! Every input event runs one full, synchronous recompute over all cards in
//! dataset order. There is no incremental diffing and no cached previous
//! visible set.

use std::time::Instant;

use tracing::{debug, info};

use super::card::{Card, QualityTier};
use super::filter::{TierToggles, ViewState, is_visible};
use crate::model::Dataset;

/// The four input events of the catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Text field changed (fired on every keystroke).
    Query(String),
    /// One tier checkbox changed.
    Toggle(QualityTier, bool),
}

#[derive(Debug, Clone)]
pub struct ViewController {
    cards: Vec<Card>,
    state: ViewState,
    visible: Vec<bool>,
    visible_count: usize,
}

impl ViewController {
    /// Project every record and run the initial filter with default state.
    pub fn new(dataset: &Dataset) -> Self {
        Self::with_state(dataset, ViewState::default())
    }

    pub fn with_state(dataset: &Dataset, state: ViewState) -> Self {
        let started = Instant::now();
        let cards: Vec<Card> = dataset.records().iter().map(Card::project).collect();
        info!(
            component = "view",
            operation = "render",
            cards = cards.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Projected catalog cards"
        );

        let mut controller = Self {
            visible: vec![false; cards.len()],
            cards,
            state,
            visible_count: 0,
        };
        controller.recompute();
        controller
    }

    pub fn handle(&mut self, event: ViewEvent) -> usize {
        match event {
            ViewEvent::Query(query) => self.set_query(&query),
            ViewEvent::Toggle(tier, enabled) => self.set_tier(tier, enabled),
        }
    }

    pub fn set_query(&mut self, query: &str) -> usize {
        self.state.set_query(query);
        self.recompute()
    }

    pub fn set_tier(&mut self, tier: QualityTier, enabled: bool) -> usize {
        self.state.tiers.set(tier, enabled);
        self.recompute()
    }

    pub fn set_toggles(&mut self, tiers: TierToggles) -> usize {
        self.state.tiers = tiers;
        self.recompute()
    }

    /// Re-evaluate every card and return the new visible count.
    pub fn recompute(&mut self) -> usize {
        let started = Instant::now();
        let mut count = 0;
        for (slot, card) in self.visible.iter_mut().zip(&self.cards) {
            *slot = is_visible(card, &self.state);
            count += usize::from(*slot);
        }
        self.visible_count = count;

        debug!(
            component = "view",
            operation = "recompute",
            query = self.state.query(),
            show_high = self.state.tiers.show_high,
            show_medium = self.state.tiers.show_medium,
            show_low = self.state.tiers.show_low,
            visible_count = count,
            total = self.cards.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Recomputed visible cards"
        );
        count
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Visible cards in dataset order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards
            .iter()
            .zip(&self.visible)
            .filter_map(|(card, shown)| shown.then_some(card))
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible_cards().map(|card| card.id.as_str()).collect()
    }

    /// The card container with every card present, hidden ones marked.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(self.cards.iter().map(|c| c.body().len() + 256).sum());
        html.push_str(r#"<div id="discoveries" class="discoveries-grid">"#);
        html.push('\n');
        for (card, shown) in self.cards.iter().zip(&self.visible) {
            html.push_str(&card.to_html(!shown));
            html.push('\n');
        }
        html.push_str("</div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::card::tests::record;

    fn two_record_dataset() -> Dataset {
        Dataset::new(vec![record("k3s-io", "k3s", 6), record("Kong", "kong", 8)])
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let controller = ViewController::new(&two_record_dataset());
        assert_eq!(controller.visible_count(), 2);
        assert_eq!(controller.visible_ids(), ["k3s-io/k3s", "Kong/kong"]);
    }

    #[test]
    fn test_query_then_clear() {
        let mut controller = ViewController::new(&two_record_dataset());
        assert_eq!(controller.set_query("kong"), 1);
        assert_eq!(controller.visible_ids(), ["Kong/kong"]);
        assert!(!controller.is_visible(0));
        assert!(controller.is_visible(1));

        assert_eq!(controller.set_query(""), 2);
        assert_eq!(controller.visible_count(), 2);
    }

    #[test]
    fn test_events_drive_recompute() {
        let mut controller = ViewController::new(&two_record_dataset());
        assert_eq!(controller.handle(ViewEvent::Toggle(QualityTier::Medium, false)), 1);
        assert_eq!(controller.visible_ids(), ["Kong/kong"]);
        assert_eq!(controller.handle(ViewEvent::Query("k3s".into())), 0);
        assert_eq!(controller.handle(ViewEvent::Toggle(QualityTier::Medium, true)), 1);
        assert_eq!(controller.visible_ids(), ["k3s-io/k3s"]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut controller = ViewController::new(&two_record_dataset());
        controller.set_query("k");
        let first: Vec<String> = controller.visible_ids().iter().map(|s| s.to_string()).collect();
        controller.recompute();
        let second: Vec<String> = controller.visible_ids().iter().map(|s| s.to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_filtering_never_reorders() {
        let dataset = Dataset::new(vec![
            record("zeta", "z", 9),
            record("alpha", "a", 1),
            record("mid", "m", 6),
        ]);
        let mut controller = ViewController::new(&dataset);
        controller.set_toggles(TierToggles {
            show_high: true,
            show_medium: false,
            show_low: true,
        });
        assert_eq!(controller.visible_ids(), ["zeta/z", "alpha/a"]);
    }

    #[test]
    fn test_render_marks_hidden_cards() {
        let mut controller = ViewController::new(&two_record_dataset());
        controller.set_query("kong");
        let html = controller.render();
        assert!(html.starts_with(r#"<div id="discoveries""#));
        assert_eq!(html.matches("discovery-card hidden").count(), 1);
        assert_eq!(html.matches(r#"class="discovery-card""#).count(), 1);
        let k3s = html.find("k3s-io/k3s").unwrap();
        let kong = html.find("Kong/kong").unwrap();
        assert!(k3s < kong);
    }

    #[test]
    fn test_empty_dataset() {
        let mut controller = ViewController::new(&Dataset::default());
        assert_eq!(controller.visible_count(), 0);
        assert_eq!(controller.set_query("anything"), 0);
        assert!(!controller.is_visible(0));
    }
}
