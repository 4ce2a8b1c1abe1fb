//! JavaScript for the catalog page.
//!
//! Cards arrive pre-rendered and escaped in the page. The browser side only
//! toggles the `hidden` class, reading the lower-cased `data-*` keys written
//! by card projection, so the filter rules here mirror `view::filter`.

/// Bundle of JavaScript for the site.
pub struct ScriptBundle {
    /// Written to `search.js`
    pub search_js: String,
}

pub fn generate_scripts() -> ScriptBundle {
    let scripts = [generate_core_utils(), generate_filter_js(), generate_init_js()];
    ScriptBundle {
        search_js: scripts.join("\n\n"),
    }
}

fn generate_core_utils() -> String {
    r#"// Core utilities
const $ = (sel) => document.querySelector(sel);
const $$ = (sel) => document.querySelectorAll(sel);"#
        .to_string()
}

fn generate_filter_js() -> String {
    r#"// Search and tier filters
const Catalog = {
    searchInput: null,
    filterHigh: null,
    filterMedium: null,
    filterLow: null,
    countEl: null,

    init() {
        this.searchInput = $('#searchInput');
        this.filterHigh = $('#filterHighQuality');
        this.filterMedium = $('#filterMediumQuality');
        this.filterLow = $('#filterLowQuality');
        this.countEl = $('#totalCount');
        if (!this.searchInput) return;

        this.searchInput.addEventListener('input', () => this.apply());
        [this.filterHigh, this.filterMedium, this.filterLow].forEach((el) => {
            if (el) el.addEventListener('change', () => this.apply());
        });
        this.apply();
    },

    tierEnabled(score) {
        if (score >= 7) return this.filterHigh.checked;
        if (score >= 5) return this.filterMedium.checked;
        return this.filterLow.checked;
    },

    matches(card, query) {
        if (query === '') return true;
        const d = card.dataset;
        return d.name.includes(query)
            || d.owner.includes(query)
            || d.language.includes(query)
            || d.patterns.includes(query);
    },

    apply() {
        const query = this.searchInput.value.toLowerCase();
        let visible = 0;
        $$('.discovery-card').forEach((card) => {
            const score = parseInt(card.dataset.score, 10);
            const shown = this.matches(card, query) && this.tierEnabled(score);
            card.classList.toggle('hidden', !shown);
            if (shown) visible += 1;
        });
        if (this.countEl) this.countEl.textContent = visible;
    },
};"#
    .to_string()
}

fn generate_init_js() -> String {
    r#"// Initialize on load
document.addEventListener('DOMContentLoaded', () => Catalog.init());"#
        .to_string()
}
