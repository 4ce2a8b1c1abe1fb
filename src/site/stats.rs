//! Catalog-wide statistics shown in the page header and `catalog stats`.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::model::Dataset;
use crate::view::QualityTier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternCount {
    pub pattern: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub high_quality: usize,
    pub medium_quality: usize,
    pub low_quality: usize,
    /// Distinct non-empty languages.
    pub language_count: usize,
    /// Most used first; ties by pattern text.
    pub patterns: Vec<PatternCount>,
}

impl CatalogStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut stats = Self {
            total: dataset.len(),
            ..Default::default()
        };
        let mut languages = BTreeSet::new();
        let mut pattern_counts: HashMap<&str, usize> = HashMap::new();

        for record in dataset.records() {
            match QualityTier::from_score(record.quality.score) {
                QualityTier::High => stats.high_quality += 1,
                QualityTier::Medium => stats.medium_quality += 1,
                QualityTier::Low => stats.low_quality += 1,
            }
            if let Some(language) = record.repository.language.as_deref()
                && !language.is_empty()
            {
                languages.insert(language);
            }
            for pattern in &record.discovery.patterns_found {
                *pattern_counts.entry(pattern.as_str()).or_default() += 1;
            }
        }

        stats.language_count = languages.len();
        stats.patterns = pattern_counts
            .into_iter()
            .map(|(pattern, count)| PatternCount {
                pattern: pattern.to_string(),
                count,
            })
            .collect();
        stats
            .patterns
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pattern.cmp(&b.pattern)));
        stats
    }

    pub fn pattern_count(&self, pattern: &str) -> usize {
        self.patterns
            .iter()
            .find(|p| p.pattern == pattern)
            .map_or(0, |p| p.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::card::tests::record;

    #[test]
    fn test_stats_counts() {
        let mut a = record("a", "a", 9);
        a.discovery.patterns_found = vec!["git log".into(), "docker ps".into()];
        let mut b = record("b", "b", 6);
        b.repository.language = Some("Go".into());
        b.discovery.patterns_found = vec!["docker ps".into()];
        let mut c = record("c", "c", 1);
        c.repository.language = None;
        c.discovery.patterns_found = vec!["kubectl get".into()];

        let stats = CatalogStats::from_dataset(&Dataset::new(vec![a, b, c]));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.high_quality, 1);
        assert_eq!(stats.medium_quality, 1);
        assert_eq!(stats.low_quality, 1);
        assert_eq!(stats.language_count, 2);
        assert_eq!(stats.patterns[0].pattern, "docker ps");
        assert_eq!(stats.patterns[0].count, 2);
        assert_eq!(stats.patterns[1].pattern, "git log");
        assert_eq!(stats.pattern_count("kubectl get"), 1);
        assert_eq!(stats.pattern_count("missing"), 0);
    }

    #[test]
    fn test_empty_language_not_counted() {
        let mut a = record("a", "a", 9);
        a.repository.language = Some(String::new());
        let stats = CatalogStats::from_dataset(&Dataset::new(vec![a]));
        assert_eq!(stats.language_count, 0);
    }
}
