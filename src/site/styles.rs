//! CSS for the generated site.

/// Bundle of CSS for the site.
pub struct StyleBundle {
    /// Written to `style.css`
    pub site_css: String,
}

pub fn generate_styles() -> StyleBundle {
    StyleBundle {
        site_css: format!(
            "{BASE_VARIABLES}\n{LAYOUT}\n{CONTROLS}\n{CARDS}\n{PATTERNS}\n{RESPONSIVE}"
        ),
    }
}

const BASE_VARIABLES: &str = r#":root {
    --primary-color: #2563eb;
    --secondary-color: #64748b;
    --bg-color: #f8fafc;
    --card-bg: #ffffff;
    --text-color: #0f172a;
    --muted-color: #64748b;
    --border-color: #e2e8f0;
    --high-color: #16a34a;
    --medium-color: #ca8a04;
    --low-color: #94a3b8;
}

* {
    box-sizing: border-box;
}

body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: var(--bg-color);
    color: var(--text-color);
    line-height: 1.5;
}

a {
    color: var(--primary-color);
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}"#;

const LAYOUT: &str = r#".header {
    padding: 2rem 1.5rem 1rem;
    text-align: center;
}

.header nav a {
    margin: 0 0.75rem;
}

.stats {
    display: flex;
    justify-content: center;
    gap: 2rem;
    margin-top: 1rem;
}

.stat-value {
    display: block;
    font-size: 1.75rem;
    font-weight: 700;
}

.stat-label {
    color: var(--muted-color);
    font-size: 0.85rem;
}

main {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 1.5rem 3rem;
}

.footer {
    text-align: center;
    color: var(--muted-color);
    font-size: 0.85rem;
    padding: 2rem 0;
}"#;

const CONTROLS: &str = r#".controls {
    display: flex;
    flex-wrap: wrap;
    align-items: center;
    gap: 1rem;
    margin-bottom: 1.5rem;
}

#searchInput {
    flex: 1 1 280px;
    padding: 0.6rem 0.9rem;
    border: 1px solid var(--border-color);
    border-radius: 8px;
    font-size: 1rem;
}

.filter-toggle {
    display: inline-flex;
    align-items: center;
    gap: 0.35rem;
    font-size: 0.9rem;
}

.visible-count {
    color: var(--muted-color);
}"#;

const CARDS: &str = r#".discoveries-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(340px, 1fr));
    gap: 1rem;
}

.discovery-card {
    background: var(--card-bg);
    border: 1px solid var(--border-color);
    border-radius: 10px;
    padding: 1rem 1.25rem;
    display: flex;
    flex-direction: column;
    gap: 0.6rem;
}

.discovery-card.hidden {
    display: none;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: flex-start;
    gap: 0.5rem;
}

.card-title {
    margin: 0;
    font-size: 1.05rem;
    word-break: break-word;
}

.quality-badge {
    white-space: nowrap;
    font-size: 0.75rem;
    font-weight: 600;
    padding: 0.2rem 0.5rem;
    border-radius: 999px;
    color: #fff;
}

.quality-high {
    background: var(--high-color);
}

.quality-medium {
    background: var(--medium-color);
}

.quality-low {
    background: var(--low-color);
}

.card-meta {
    display: flex;
    gap: 1rem;
    color: var(--muted-color);
    font-size: 0.85rem;
}

.card-description {
    font-size: 0.9rem;
}

.card-patterns {
    display: flex;
    flex-wrap: wrap;
    gap: 0.35rem;
}

.pattern-tag {
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
    font-size: 0.75rem;
    background: #eef2ff;
    border-radius: 4px;
    padding: 0.1rem 0.4rem;
}

.card-footer {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 0.5rem;
    font-size: 0.8rem;
    margin-top: auto;
}"#;

const PATTERNS: &str = r#".pattern-section {
    margin-bottom: 2.5rem;
}

.pattern-examples > div {
    background: var(--card-bg);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 0.75rem 1rem;
    margin-bottom: 0.75rem;
}

.pattern-code {
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
    font-size: 0.9rem;
}

.repo-list {
    display: flex;
    flex-wrap: wrap;
    gap: 0.35rem;
    margin-top: 0.4rem;
}

.repo-badge {
    font-size: 0.75rem;
    background: var(--primary-color);
    color: #fff;
    border-radius: 4px;
    padding: 0.1rem 0.45rem;
}

.repo-badge-more {
    background: var(--secondary-color);
}"#;

const RESPONSIVE: &str = r#"@media (max-width: 640px) {
    .stats {
        gap: 1rem;
    }

    .discoveries-grid {
        grid-template-columns: 1fr;
    }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_cards_are_not_displayed() {
        let css = generate_styles().site_css;
        assert!(css.contains(".discovery-card.hidden"));
        assert!(css.contains(".quality-high"));
        assert!(css.contains(".repo-badge-more"));
    }
}
