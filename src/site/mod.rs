//! Static site generation.
//!
//! Writes a self-contained directory that can be served as-is:
//!
//! - `index.html` with every card pre-rendered and escaped
//! - `patterns.html`, the pattern library
//! - `discoveries-data.js`, the dataset as a JS binding for external
//!   consumers (the pages do not load it)
//! - `search.js` and `style.css`

pub mod data_js;
pub mod patterns;
pub mod scripts;
pub mod stats;
pub mod styles;
pub mod template;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::model::Dataset;
use crate::view::{ViewController, ViewState};

pub use stats::CatalogStats;
pub use template::SiteOptions;

pub const INDEX_FILE: &str = "index.html";
pub const PATTERNS_FILE: &str = "patterns.html";
pub const DATA_FILE: &str = "discoveries-data.js";
pub const SCRIPT_FILE: &str = "search.js";
pub const STYLE_FILE: &str = "style.css";

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedSite {
    pub output_dir: PathBuf,
    pub files: Vec<GeneratedFile>,
    pub stats: CatalogStats,
}

pub struct SiteGenerator {
    options: SiteOptions,
    generated_at: Option<DateTime<Utc>>,
}

impl SiteGenerator {
    pub fn new(options: SiteOptions) -> Self {
        Self {
            options,
            generated_at: None,
        }
    }

    /// Pin the generation timestamp instead of using the current time.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    pub fn generate(&self, dataset: &Dataset, output_dir: &Path) -> Result<GeneratedSite, CatalogError> {
        let started = Instant::now();
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        info!(
            component = "site",
            operation = "generate",
            records = dataset.len(),
            output_dir = %output_dir.display(),
            "Generating static site"
        );

        std::fs::create_dir_all(output_dir).map_err(|source| CatalogError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let stats = CatalogStats::from_dataset(dataset);
        let mut options = self.options.clone();
        if options.last_updated.is_empty() {
            options.last_updated = generated_at.format("%Y-%m-%d %H:%M UTC").to_string();
        }

        let controller = ViewController::with_state(dataset, ViewState::new("", options.filters));
        let index_html = template::render_index(
            &options,
            &stats,
            controller.visible_count(),
            &controller.render(),
        );
        let patterns_html = template::render_patterns_page(
            &options,
            &patterns::render_pattern_library(dataset, &stats),
        );
        let data_js = data_js::render_data_js(dataset, generated_at)?;
        let search_js = scripts::generate_scripts().search_js;
        let style_css = styles::generate_styles().site_css;

        let mut files = Vec::with_capacity(5);
        for (name, content) in [
            (INDEX_FILE, index_html),
            (PATTERNS_FILE, patterns_html),
            (DATA_FILE, data_js),
            (SCRIPT_FILE, search_js),
            (STYLE_FILE, style_css),
        ] {
            files.push(write_atomic(&output_dir.join(name), &content)?);
        }

        info!(
            component = "site",
            operation = "generate_complete",
            files = files.len(),
            bytes = files.iter().map(|f| f.size_bytes).sum::<u64>(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Static site generated"
        );

        Ok(GeneratedSite {
            output_dir: output_dir.to_path_buf(),
            files,
            stats,
        })
    }
}

impl Default for SiteGenerator {
    fn default() -> Self {
        Self::new(SiteOptions::default())
    }
}

/// Write through a temp file in the same directory, then rename into place.
fn write_atomic(path: &Path, content: &str) -> Result<GeneratedFile, CatalogError> {
    let write_err = |source: std::io::Error| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(
        component = "site",
        operation = "write_file",
        path = %path.display(),
        bytes = content.len(),
        "Wrote site file"
    );
    Ok(GeneratedFile {
        path: path.to_path_buf(),
        size_bytes: content.len() as u64,
    })
}
