//! Page shells for `index.html` and `patterns.html`.
//!
//! No template engine: pages are assembled with `format!`. Everything that
//! comes from the dataset or configuration goes through `html_escape`; the
//! card container and pattern sections arrive already escaped.

use super::stats::CatalogStats;
use crate::view::{TierToggles, html_escape};

/// Options shared by every generated page.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub title: String,

    /// Shown in the footer, e.g. `2025-11-25 02:57 UTC`
    pub last_updated: String,

    /// Initial checkbox states; the pre-rendered cards use the same toggles.
    pub filters: TierToggles,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: "Discovery Registry".to_string(),
            last_updated: String::new(),
            filters: TierToggles::default(),
        }
    }
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}

fn render_head(title: &str, page: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="discovery-catalog">
    <title>{page} · {title}</title>
    <link rel="stylesheet" href="style.css">
</head>"#,
        page = html_escape(page),
        title = html_escape(title),
    )
}

fn render_nav() -> &'static str {
    r#"<nav aria-label="Site">
                <a href="index.html">Registry</a>
                <a href="patterns.html">Pattern Library</a>
            </nav>"#
}

fn render_footer(options: &SiteOptions) -> String {
    format!(
        r#"    <footer class="footer">Last updated: {}</footer>"#,
        html_escape(&options.last_updated)
    )
}

/// The registry page: header stats, controls, and the pre-rendered cards.
pub fn render_index(
    options: &SiteOptions,
    stats: &CatalogStats,
    visible_count: usize,
    cards_html: &str,
) -> String {
    format!(
        r#"{head}
<body>
    <header class="header" role="banner">
        <h1 class="title">{title}</h1>
        {nav}
        <div class="stats">
            <div><span class="stat-value">{total}</span><span class="stat-label">Discoveries</span></div>
            <div><span class="stat-value">{high}</span><span class="stat-label">High Quality</span></div>
            <div><span class="stat-value">{languages}</span><span class="stat-label">Languages</span></div>
        </div>
    </header>
    <main role="main">
        <div class="controls">
            <input type="search" id="searchInput" placeholder="Search by name, owner, language, or pattern..." aria-label="Search discoveries">
            <label class="filter-toggle"><input type="checkbox" id="filterHighQuality"{high_checked}> High (7+)</label>
            <label class="filter-toggle"><input type="checkbox" id="filterMediumQuality"{medium_checked}> Medium (5-6)</label>
            <label class="filter-toggle"><input type="checkbox" id="filterLowQuality"{low_checked}> Lower (&lt;5)</label>
            <span class="visible-count">Showing <span id="totalCount">{visible}</span> discoveries</span>
        </div>
        {cards}
    </main>
{footer}
    <script src="search.js"></script>
</body>
</html>
"#,
        head = render_head(&options.title, "Registry"),
        title = html_escape(&options.title),
        nav = render_nav(),
        total = stats.total,
        high = stats.high_quality,
        languages = stats.language_count,
        high_checked = checked(options.filters.show_high),
        medium_checked = checked(options.filters.show_medium),
        low_checked = checked(options.filters.show_low),
        visible = visible_count,
        cards = cards_html,
        footer = render_footer(options),
    )
}

/// The pattern library page wrapping the rendered group sections.
pub fn render_patterns_page(options: &SiteOptions, sections_html: &str) -> String {
    let body = if sections_html.trim().is_empty() {
        r#"<p class="empty">No patterns recorded yet.</p>"#
    } else {
        sections_html
    };
    format!(
        r#"{head}
<body>
    <header class="header" role="banner">
        <h1 class="title">Pattern Library</h1>
        {nav}
        <p>Discovery patterns found across {title}</p>
    </header>
    <main role="main">
{body}
    </main>
{footer}
</body>
</html>
"#,
        head = render_head(&options.title, "Pattern Library"),
        nav = render_nav(),
        title = html_escape(&options.title),
        body = body,
        footer = render_footer(options),
    )
}
