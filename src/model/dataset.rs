//! Loading and validating the ordered, read-only dataset.
//!
//! Three on-disk shapes are accepted:
//!
//! - the `discoveries.json` report (`{"metadata": {...}, "discoveries": [...]}`)
//! - a bare JSON array of records
//! - a generated `discoveries-data.js` (`const discoveries = [...];`)
//!
//! Record order is preserved exactly as read; nothing downstream reorders it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::types::DiscoveryRecord;
use crate::error::CatalogError;

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 10;

const DATA_JS_BINDING: &str = "const discoveries =";

/// What to do with a record whose score falls outside `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolicy {
    /// Fail the whole load with `CatalogError::DataContract`.
    #[default]
    Reject,
    /// Saturate into range and keep going.
    Clamp,
}

impl std::fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Clamp => write!(f, "clamp"),
        }
    }
}

/// Report header written by the discovery pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct ReportFile {
    #[serde(default)]
    metadata: Option<ReportMetadata>,
    discoveries: Vec<DiscoveryRecord>,
}

/// The full, materialized catalog.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DiscoveryRecord>,
    metadata: Option<ReportMetadata>,
}

impl Dataset {
    pub fn new(records: Vec<DiscoveryRecord>) -> Self {
        Self {
            records,
            metadata: None,
        }
    }

    /// Read a dataset file and validate its scores under `policy`.
    pub fn load(path: &Path, policy: ScorePolicy) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(&content)?.validate(policy)?;
        info!(
            component = "dataset",
            operation = "load",
            path = %path.display(),
            records = dataset.len(),
            score_policy = %policy,
            "Loaded discoveries"
        );
        Ok(dataset)
    }

    /// Parse any of the accepted shapes. Scores are not range-checked here.
    ///
    /// JSON input is recognized by its first character; only input that is
    /// not JSON is treated as a data file, whose first statement after the
    /// header comments must be the `const discoveries =` binding.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let trimmed = content.trim();
        let json = if trimmed.starts_with('[') || trimmed.starts_with('{') {
            trimmed
        } else {
            let array = extract_data_js_array(trimmed).ok_or(CatalogError::UnrecognizedDataset)?;
            debug!(
                component = "dataset",
                operation = "parse",
                format = "data-js",
                "Detected discoveries-data.js binding"
            );
            array
        };

        let dataset = if json.starts_with('[') {
            Self::new(serde_json::from_str::<Vec<DiscoveryRecord>>(json)?)
        } else if json.starts_with('{') {
            let report = serde_json::from_str::<ReportFile>(json)?;
            Self {
                records: report.discoveries,
                metadata: report.metadata,
            }
        } else {
            return Err(CatalogError::UnrecognizedDataset);
        };
        Ok(dataset)
    }

    /// Enforce the `[0, 10]` score contract.
    pub fn validate(mut self, policy: ScorePolicy) -> Result<Self, CatalogError> {
        for (index, record) in self.records.iter_mut().enumerate() {
            let score = record.quality.score;
            if (MIN_SCORE..=MAX_SCORE).contains(&score) {
                continue;
            }
            match policy {
                ScorePolicy::Reject => {
                    return Err(CatalogError::DataContract {
                        index,
                        owner: record.repository.owner.clone(),
                        name: record.repository.name.clone(),
                        score,
                    });
                }
                ScorePolicy::Clamp => {
                    let clamped = score.clamp(MIN_SCORE, MAX_SCORE);
                    warn!(
                        component = "dataset",
                        operation = "validate",
                        index,
                        repository = %record.full_name(),
                        score,
                        clamped,
                        "Score out of range, clamping"
                    );
                    record.quality.score = clamped;
                }
            }
        }
        Ok(self)
    }

    pub fn records(&self) -> &[DiscoveryRecord] {
        &self.records
    }

    pub fn metadata(&self) -> Option<&ReportMetadata> {
        self.metadata.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<DiscoveryRecord>> for Dataset {
    fn from(records: Vec<DiscoveryRecord>) -> Self {
        Self::new(records)
    }
}

/// Pull the JSON array out of a `const discoveries = [...];` file. Leading
/// `//` comment lines and blank lines are skipped; anything else before the
/// binding means this is not a data file.
fn extract_data_js_array(content: &str) -> Option<&str> {
    let mut rest = content.trim_start();
    while rest.starts_with("//") {
        let line_end = rest.find('\n').unwrap_or(rest.len());
        rest = rest[line_end..].trim_start();
    }
    let rest = rest.strip_prefix(DATA_JS_BINDING)?.trim();
    let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(owner: &str, name: &str, score: i64) -> String {
        format!(
            r#"{{
                "repository": {{ "owner": "{owner}", "name": "{name}", "url": "https://github.com/{owner}/{name}", "stars": 10, "language": "Go" }},
                "discovery": {{ "markdown_file": "README.md", "file_url": "https://example.com/README.md", "patterns_found": ["kubectl get"] }},
                "quality": {{ "score": {score}, "reasoning": "ok" }},
                "contacts": []
            }}"#
        )
    }

    #[test]
    fn test_parse_bare_array_preserves_order() {
        let json = format!(
            "[{}, {}]",
            record_json("k3s-io", "k3s", 6),
            record_json("Kong", "kong", 8)
        );
        let dataset = Dataset::parse(&json).unwrap();
        let names: Vec<_> = dataset.records().iter().map(|r| r.full_name()).collect();
        assert_eq!(names, ["k3s-io/k3s", "Kong/kong"]);
        assert!(dataset.metadata().is_none());
    }

    #[test]
    fn test_parse_report_object_keeps_metadata() {
        let json = format!(
            r#"{{ "metadata": {{ "generated_at": "2025-11-25T02:57:57Z", "version": "1.0", "total_discoveries": 1 }},
                 "discoveries": [{}] }}"#,
            record_json("a", "b", 7)
        );
        let dataset = Dataset::parse(&json).unwrap();
        assert_eq!(dataset.len(), 1);
        let meta = dataset.metadata().unwrap();
        assert_eq!(meta.version.as_deref(), Some("1.0"));
        assert_eq!(meta.extra["total_discoveries"], 1);
    }

    #[test]
    fn test_parse_data_js() {
        let js = format!(
            "// Auto-generated from discoveries.json\n// Generated: now\n\nconst discoveries = [{}];\n",
            record_json("a", "b", 2)
        );
        let dataset = Dataset::parse(&js).unwrap();
        assert_eq!(dataset.records()[0].quality.score, 2);
    }

    #[test]
    fn test_binding_text_inside_json_is_plain_data() {
        let json = format!("[{}]", record_json("a", "b", 7)).replace(
            r#""reasoning": "ok""#,
            r#""reasoning": "Docs say: const discoveries = [] is the global""#,
        );
        let dataset = Dataset::parse(&json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.records()[0].quality.reasoning.as_deref(),
            Some("Docs say: const discoveries = [] is the global")
        );

        let report = format!(r#"{{ "discoveries": {json} }}"#);
        assert_eq!(Dataset::parse(&report).unwrap().len(), 1);
    }

    #[test]
    fn test_binding_must_follow_header_comments() {
        let js = format!(
            "console.log(1);\nconst discoveries = [{}];\n",
            record_json("a", "b", 2)
        );
        assert!(matches!(
            Dataset::parse(&js),
            Err(CatalogError::UnrecognizedDataset)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Dataset::parse("hello"),
            Err(CatalogError::UnrecognizedDataset)
        ));
        assert!(matches!(
            Dataset::parse(r#"[{"repository": 1}]"#),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_validate_reject_out_of_range() {
        let json = format!("[{}, {}]", record_json("a", "ok", 5), record_json("x", "y", 11));
        let err = Dataset::parse(&json)
            .unwrap()
            .validate(ScorePolicy::Reject)
            .unwrap_err();
        match err {
            CatalogError::DataContract { index, score, .. } => {
                assert_eq!(index, 1);
                assert_eq!(score, 11);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_clamp_saturates() {
        let json = format!("[{}, {}]", record_json("a", "b", -3), record_json("x", "y", 42));
        let dataset = Dataset::parse(&json)
            .unwrap()
            .validate(ScorePolicy::Clamp)
            .unwrap();
        let scores: Vec<_> = dataset.records().iter().map(|r| r.quality.score).collect();
        assert_eq!(scores, [0, 10]);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = Dataset::load(Path::new("/nonexistent/discoveries.json"), ScorePolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
