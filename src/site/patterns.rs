//! Pattern library page content.
//!
//! Patterns are grouped by the tool they exercise. A pattern that mentions
//! several tools is listed in each matching group; anything matching none
//! lands in "Other".

use std::collections::BTreeMap;

use tracing::debug;

use super::stats::CatalogStats;
use crate::model::Dataset;
use crate::view::html_escape;

/// Repositories linked per pattern before collapsing into a `+N more` badge.
pub const REPOS_PER_PATTERN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternGroup {
    Docker,
    Kubernetes,
    Git,
    Other,
}

impl PatternGroup {
    pub const ALL: [PatternGroup; 4] = [
        PatternGroup::Docker,
        PatternGroup::Kubernetes,
        PatternGroup::Git,
        PatternGroup::Other,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PatternGroup::Docker => "Docker Discovery Patterns",
            PatternGroup::Kubernetes => "Kubernetes Discovery Patterns",
            PatternGroup::Git => "Git Discovery Patterns",
            PatternGroup::Other => "Other Discovery Patterns",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PatternGroup::Docker => "Commands for exploring Docker containers, images, and logs",
            PatternGroup::Kubernetes => {
                "Commands for exploring Kubernetes clusters, pods, and services"
            }
            PatternGroup::Git => "Commands for exploring repository history and structure",
            PatternGroup::Other => "Additional exploration patterns found in repositories",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PatternGroup::Docker => "🐳",
            PatternGroup::Kubernetes => "☸️",
            PatternGroup::Git => "📚",
            PatternGroup::Other => "🔍",
        }
    }

    fn keyword(self) -> Option<&'static str> {
        match self {
            PatternGroup::Docker => Some("docker"),
            PatternGroup::Kubernetes => Some("kubectl"),
            PatternGroup::Git => Some("git"),
            PatternGroup::Other => None,
        }
    }

    pub fn contains(self, pattern: &str) -> bool {
        let lowered = pattern.to_lowercase();
        match self.keyword() {
            Some(keyword) => lowered.contains(keyword),
            None => !PatternGroup::ALL
                .iter()
                .filter_map(|g| g.keyword())
                .any(|k| lowered.contains(k)),
        }
    }
}

/// `(owner/name, url)` for every repository that found `pattern`, sorted by name.
fn repos_using<'a>(dataset: &'a Dataset, pattern: &str) -> Vec<(String, &'a str)> {
    let mut repos: Vec<(String, &str)> = dataset
        .records()
        .iter()
        .filter(|r| r.discovery.patterns_found.iter().any(|p| p == pattern))
        .map(|r| (r.full_name(), r.repository.url.as_str()))
        .collect();
    repos.sort();
    repos
}

/// Render all non-empty group sections.
pub fn render_pattern_library(dataset: &Dataset, stats: &CatalogStats) -> String {
    let mut sections = Vec::new();

    for group in PatternGroup::ALL {
        // stats.patterns is already ordered by usage
        let patterns: Vec<_> = stats
            .patterns
            .iter()
            .filter(|p| group.contains(&p.pattern))
            .collect();
        if patterns.is_empty() {
            continue;
        }
        debug!(
            component = "patterns",
            operation = "render_group",
            group = group.title(),
            patterns = patterns.len(),
            "Rendering pattern group"
        );

        let mut entries = String::new();
        for entry in patterns {
            let repos = repos_using(dataset, &entry.pattern);
            let badges: String = repos
                .iter()
                .take(REPOS_PER_PATTERN)
                .map(|(name, url)| {
                    format!(
                        r#"<a href="{}" class="repo-badge">{}</a>"#,
                        html_escape(url),
                        html_escape(name)
                    )
                })
                .collect();
            let more = if repos.len() > REPOS_PER_PATTERN {
                format!(
                    r#"<span class="repo-badge repo-badge-more">+{} more</span>"#,
                    repos.len() - REPOS_PER_PATTERN
                )
            } else {
                String::new()
            };

            entries.push_str(&format!(
                r#"
                <div>
                    <code class="pattern-code">{pattern}</code>
                    <div class="repos-using">
                        <strong>Used in {count} repositories</strong>
                        <div class="repo-list">{badges}{more}</div>
                    </div>
                </div>"#,
                pattern = html_escape(&entry.pattern),
                count = entry.count,
            ));
        }

        sections.push(format!(
            r#"
        <section class="pattern-section">
            <h3>{icon} {title}</h3>
            <p>{description}</p>
            <div class="pattern-examples">{entries}
            </div>
        </section>"#,
            icon = group.icon(),
            title = group.title(),
            description = group.description(),
        ));
    }

    sections.join("\n")
}

/// Counts per group, used by the CLI summary.
pub fn group_sizes(stats: &CatalogStats) -> BTreeMap<&'static str, usize> {
    PatternGroup::ALL
        .iter()
        .map(|g| {
            (
                g.title(),
                stats.patterns.iter().filter(|p| g.contains(&p.pattern)).count(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::card::tests::record;

    fn dataset_with(patterns: &[(&str, &[&str])]) -> Dataset {
        Dataset::new(
            patterns
                .iter()
                .map(|(name, found)| {
                    let mut r = record("org", name, 7);
                    r.discovery.patterns_found = found.iter().map(|s| s.to_string()).collect();
                    r
                })
                .collect(),
        )
    }

    #[test]
    fn test_grouping() {
        assert!(PatternGroup::Docker.contains("docker (ps|images|logs)"));
        assert!(PatternGroup::Kubernetes.contains("kubectl get pods"));
        assert!(PatternGroup::Git.contains("git log --oneline"));
        assert!(PatternGroup::Other.contains("ls -la"));
        assert!(!PatternGroup::Other.contains("Docker compose"));
        // plain substring match
        assert!(PatternGroup::Git.contains("digital"));
    }

    #[test]
    fn test_multi_group_pattern_listed_twice() {
        let ds = dataset_with(&[("a", &["git clone && docker build"][..])]);
        let stats = CatalogStats::from_dataset(&ds);
        let html = render_pattern_library(&ds, &stats);
        assert_eq!(html.matches("git clone &amp;&amp; docker build").count(), 2);
        assert!(!html.contains("Kubernetes Discovery Patterns"));
        assert!(!html.contains("Other Discovery Patterns"));
    }

    #[test]
    fn test_more_badge_after_five_repos() {
        let names = ["f", "e", "d", "c", "b", "a", "g"];
        const FOUND: &[&str] = &["docker ps"];
        let entries: Vec<(&str, &[&str])> = names.iter().map(|n| (*n, FOUND)).collect();
        let ds = dataset_with(&entries);
        let stats = CatalogStats::from_dataset(&ds);
        let html = render_pattern_library(&ds, &stats);

        assert!(html.contains("Used in 7 repositories"));
        assert!(html.contains("+2 more"));
        assert_eq!(html.matches(r#"class="repo-badge">"#).count(), 5);
        assert!(html.contains(">org/a<"));
        assert!(!html.contains(">org/g<"), "sorted by name, g is past the cap");
    }

    #[test]
    fn test_patterns_escaped() {
        let ds = dataset_with(&[("a", &["grep <pattern>"][..])]);
        let stats = CatalogStats::from_dataset(&ds);
        let html = render_pattern_library(&ds, &stats);
        assert!(html.contains("grep &lt;pattern&gt;"));
    }

    #[test]
    fn test_group_sizes() {
        let ds = dataset_with(&[("a", &["docker ps", "kubectl logs", "make"][..])]);
        let sizes = group_sizes(&CatalogStats::from_dataset(&ds));
        assert_eq!(sizes["Docker Discovery Patterns"], 1);
        assert_eq!(sizes["Kubernetes Discovery Patterns"], 1);
        assert_eq!(sizes["Git Discovery Patterns"], 0);
        assert_eq!(sizes["Other Discovery Patterns"], 1);
    }
}
