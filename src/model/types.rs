//! Discovery record structs.

use serde::{Deserialize, Serialize};

/// One catalog entry: a third-party repository and why it was flagged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryRecord {
    pub repository: Repository,
    pub discovery: DiscoveryInfo,
    pub quality: Quality,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl DiscoveryRecord {
    /// `owner/name`, the display identity of a record.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.repository.owner, self.repository.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryInfo {
    pub markdown_file: String,
    pub file_url: String,
    #[serde(default)]
    pub patterns_found: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quality {
    /// Integral score; expected in `[0, 10]`, enforced by `Dataset::validate`.
    pub score: i64,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// An extracted reach-out channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub value: String,
    #[serde(default)]
    pub source_file: String,
    #[serde(default)]
    pub confidence: Confidence,
}

/// Contact channel. Types other than `github` and `email` keep their raw
/// name so they survive re-serialization; they are never displayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ContactKind {
    Github,
    Email,
    Other(String),
}

impl From<String> for ContactKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "github" => ContactKind::Github,
            "email" => ContactKind::Email,
            _ => ContactKind::Other(raw),
        }
    }
}

impl From<ContactKind> for String {
    fn from(kind: ContactKind) -> Self {
        kind.to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Low,
    High,
}

impl std::fmt::Display for ContactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactKind::Github => write!(f, "github"),
            ContactKind::Email => write!(f, "email"),
            ContactKind::Other(raw) => write!(f, "{raw}"),
        }
    }
}
