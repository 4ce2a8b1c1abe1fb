//! Discovery record to card projection.
//!
//! A [`Card`] is built once per record. Projection lower-cases the searchable
//! fields up front so the filter never re-derives them, classifies the score
//! into a [`QualityTier`], and renders the card body with every free-text
//! field passed through [`html_escape`].

use std::time::Instant;

use tracing::trace;

use super::escape::{format_thousands, html_escape};
use crate::model::{ContactKind, DiscoveryRecord};

pub const UNKNOWN_LANGUAGE: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";

/// Contacts shown on a card; the rest are dropped.
pub const CARD_CONTACT_LIMIT: usize = 2;

const GITHUB_BASE_URL: &str = "https://github.com/";

/// Coarse bucketing of the 0-10 quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualityTier {
    High,
    Medium,
    Low,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [QualityTier::High, QualityTier::Medium, QualityTier::Low];

    /// `>= 7` high, `5..7` medium, below 5 low.
    pub fn from_score(score: i64) -> Self {
        if score >= 7 {
            QualityTier::High
        } else if score >= 5 {
            QualityTier::Medium
        } else {
            QualityTier::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            QualityTier::High => "quality-high",
            QualityTier::Medium => "quality-medium",
            QualityTier::Low => "quality-low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::High => "High Quality",
            QualityTier::Medium => "Medium",
            QualityTier::Low => "Lower Quality",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Low => "low",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Pre-lowered search fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardKeys {
    pub name: String,
    pub owner: String,
    pub language: String,
    pub patterns: String,
}

impl CardKeys {
    pub fn from_record(record: &DiscoveryRecord) -> Self {
        Self {
            name: record.repository.name.to_lowercase(),
            owner: record.repository.owner.to_lowercase(),
            language: record
                .repository
                .language
                .as_deref()
                .unwrap_or("")
                .to_lowercase(),
            patterns: record.discovery.patterns_found.join(" ").to_lowercase(),
        }
    }

    /// Substring match against any key. `query` must already be lower-cased.
    pub fn contains(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.contains(query)
            || self.owner.contains(query)
            || self.language.contains(query)
            || self.patterns.contains(query)
    }
}

/// A projected, renderable card.
#[derive(Debug, Clone)]
pub struct Card {
    /// `owner/name`
    pub id: String,
    pub keys: CardKeys,
    pub score: i64,
    pub tier: QualityTier,
    body: String,
}

impl Card {
    pub fn project(record: &DiscoveryRecord) -> Self {
        let started = Instant::now();
        let keys = CardKeys::from_record(record);
        let tier = QualityTier::from_score(record.quality.score);
        let body = render_card_body(record, tier);

        trace!(
            component = "card",
            operation = "project",
            repository = %record.full_name(),
            tier = tier.slug(),
            bytes = body.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Projected card"
        );

        Self {
            id: record.full_name(),
            keys,
            score: record.quality.score,
            tier,
            body,
        }
    }

    /// The card element, carrying the `hidden` class when filtered out.
    pub fn to_html(&self, hidden: bool) -> String {
        format!(
            r#"<div class="discovery-card{hidden}" data-name="{name}" data-owner="{owner}" data-language="{language}" data-patterns="{patterns}" data-score="{score}">{body}</div>"#,
            hidden = if hidden { " hidden" } else { "" },
            name = html_escape(&self.keys.name),
            owner = html_escape(&self.keys.owner),
            language = html_escape(&self.keys.language),
            patterns = html_escape(&self.keys.patterns),
            score = self.score,
            body = self.body,
        )
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// First two contacts, github as `@handle` links, email as text, others dropped.
pub fn contact_summary(record: &DiscoveryRecord) -> String {
    record
        .contacts
        .iter()
        .take(CARD_CONTACT_LIMIT)
        .filter_map(|contact| match &contact.kind {
            ContactKind::Github => Some(format!(
                r#"<a href="{base}{value}">@{value}</a>"#,
                base = GITHUB_BASE_URL,
                value = html_escape(&contact.value)
            )),
            ContactKind::Email => Some(html_escape(&contact.value)),
            ContactKind::Other(_) => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_card_body(record: &DiscoveryRecord, tier: QualityTier) -> String {
    let repo = &record.repository;
    let language = repo.language.as_deref().unwrap_or(UNKNOWN_LANGUAGE);
    let reasoning = record
        .quality
        .reasoning
        .as_deref()
        .unwrap_or(NO_DESCRIPTION);

    let patterns_html: String = record
        .discovery
        .patterns_found
        .iter()
        .map(|p| format!(r#"<span class="pattern-tag">{}</span>"#, html_escape(p)))
        .collect();
    let patterns_section = if patterns_html.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="card-patterns">{patterns_html}</div>"#)
    };

    let contacts = contact_summary(record);
    let contacts_html = if contacts.is_empty() {
        String::new()
    } else {
        format!("Contact: {contacts}")
    };

    format!(
        r#"
    <div class="card-header">
        <div>
            <h3 class="card-title">
                <a href="{url}" target="_blank" rel="noopener noreferrer">{owner}/{name}</a>
            </h3>
        </div>
        <span class="quality-badge {tier_class}">{tier_label} {score}/10</span>
    </div>
    <div class="card-meta">
        <span>⭐ {stars}</span>
        <span>💻 {language}</span>
    </div>
    <div class="card-description">{reasoning}</div>
    {patterns_section}
    <div class="card-footer">
        <div class="contacts">{contacts_html}</div>
        <a href="{file_url}" target="_blank" rel="noopener noreferrer" class="discovery-link">View {markdown_file} →</a>
    </div>
"#,
        url = html_escape(&repo.url),
        owner = html_escape(&repo.owner),
        name = html_escape(&repo.name),
        tier_class = tier.css_class(),
        tier_label = tier.label(),
        score = record.quality.score,
        stars = format_thousands(repo.stars),
        language = html_escape(language),
        reasoning = html_escape(reasoning),
        patterns_section = patterns_section,
        contacts_html = contacts_html,
        file_url = html_escape(&record.discovery.file_url),
        markdown_file = html_escape(&record.discovery.markdown_file),
    )
}
