//! Human-readable Markdown report (`DISCOVERIES.md`).

use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};

use crate::model::{ContactKind, Dataset, DiscoveryRecord};
use crate::site::CatalogStats;
use crate::view::QualityTier;

const DETAIL_PATTERN_LIMIT: usize = 10;
const TOP_PATTERNS: usize = 10;

fn repo_link(record: &DiscoveryRecord) -> String {
    format!("[{}]({})", record.full_name(), record.repository.url)
}

fn first_contact(record: &DiscoveryRecord) -> String {
    record
        .contacts
        .iter()
        .find_map(|c| match &c.kind {
            ContactKind::Github => Some(format!("@{}", c.value)),
            ContactKind::Email => Some(c.value.clone()),
            ContactKind::Other(_) => None,
        })
        .unwrap_or_else(|| "N/A".to_string())
}

/// Render the report. Records are listed by score, highest first; equal
/// scores keep dataset order.
pub fn render_markdown_report(dataset: &Dataset, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    write_report(&mut out, dataset, generated_at).expect("write to String");
    out
}

fn write_report(out: &mut String, dataset: &Dataset, generated_at: DateTime<Utc>) -> fmt::Result {
    let stats = CatalogStats::from_dataset(dataset);
    let mut sorted: Vec<&DiscoveryRecord> = dataset.records().iter().collect();
    sorted.sort_by(|a, b| b.quality.score.cmp(&a.quality.score));

    let in_tier = |tier: QualityTier| {
        sorted
            .iter()
            .copied()
            .filter(|r| QualityTier::from_score(r.quality.score) == tier)
            .collect::<Vec<_>>()
    };
    let high = in_tier(QualityTier::High);
    let medium = in_tier(QualityTier::Medium);
    let low = in_tier(QualityTier::Low);

    writeln!(out, "# Discovery Report\n")?;
    writeln!(
        out,
        "Generated: {} UTC\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total discoveries:** {}", stats.total)?;
    writeln!(out, "- **High-quality peers (score ≥ 7):** {}", stats.high_quality)?;
    writeln!(out, "- **Medium-quality (score 5-6):** {}", stats.medium_quality)?;
    writeln!(out, "- **Lower quality (score < 5):** {}", stats.low_quality)?;
    writeln!(out, "- **Languages:** {}\n", stats.language_count)?;

    if let Some(meta) = dataset.metadata()
        && !meta.extra.is_empty()
    {
        writeln!(out, "### Search Parameters\n")?;
        for (key, value) in &meta.extra {
            let value = value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            writeln!(out, "- **{key}:** {value}")?;
        }
        out.push('\n');
    }

    if !high.is_empty() {
        writeln!(out, "## High-Quality Peers (Score ≥ 7)\n")?;
        writeln!(
            out,
            "| Repository | Stars | Score | Patterns | Language | Contact |"
        )?;
        writeln!(
            out,
            "|------------|-------|-------|----------|----------|---------|"
        )?;
        for r in &high {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                repo_link(r),
                r.repository.stars,
                r.quality.score,
                r.discovery.patterns_found.len(),
                r.repository.language.as_deref().unwrap_or("N/A"),
                first_contact(r)
            )?;
        }
        out.push('\n');

        writeln!(out, "### Details\n")?;
        for r in &high {
            writeln!(out, "#### {}\n", repo_link(r))?;
            writeln!(out, "**Quality Score:** {}/10\n", r.quality.score)?;
            writeln!(
                out,
                "**Reasoning:** {}\n",
                r.quality.reasoning.as_deref().unwrap_or("N/A")
            )?;
            writeln!(
                out,
                "**Discovery File:** [{}]({})\n",
                r.discovery.markdown_file, r.discovery.file_url
            )?;
            if !r.discovery.patterns_found.is_empty() {
                let patterns: Vec<&str> = r
                    .discovery
                    .patterns_found
                    .iter()
                    .take(DETAIL_PATTERN_LIMIT)
                    .map(String::as_str)
                    .collect();
                writeln!(out, "**Patterns Found:** {}\n", patterns.join(", "))?;
            }
            writeln!(out, "---\n")?;
        }
    }

    if !medium.is_empty() {
        writeln!(out, "## Medium-Quality (Score 5-6)\n")?;
        writeln!(out, "| Repository | Stars | Score | Patterns | Contact |")?;
        writeln!(out, "|------------|-------|-------|----------|---------|")?;
        for r in &medium {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                repo_link(r),
                r.repository.stars,
                r.quality.score,
                r.discovery.patterns_found.len(),
                first_contact(r)
            )?;
        }
        out.push('\n');
    }

    if !low.is_empty() {
        writeln!(out, "## Lower Quality (Score < 5)\n")?;
        for r in &low {
            writeln!(out, "- {} (score: {})", repo_link(r), r.quality.score)?;
        }
        out.push('\n');
    }

    if !stats.patterns.is_empty() {
        writeln!(out, "## Pattern Analysis\n")?;
        writeln!(out, "Most common discovery patterns:\n")?;
        for p in stats.patterns.iter().take(TOP_PATTERNS) {
            writeln!(out, "- `{}`: {} repos", p.pattern, p.count)?;
        }
        out.push('\n');
    }

    Ok(())
}
