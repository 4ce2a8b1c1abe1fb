//! `discoveries-data.js`: the dataset as a JS binding for client consumers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::CatalogError;
use crate::model::{Contact, Dataset, DiscoveryInfo, Quality, Repository};

/// Contacts kept per record in the data file.
pub const DATA_CONTACT_LIMIT: usize = 3;

#[derive(Serialize)]
struct DataRecord<'a> {
    repository: &'a Repository,
    discovery: &'a DiscoveryInfo,
    quality: &'a Quality,
    contacts: &'a [Contact],
}

pub fn render_data_js(dataset: &Dataset, generated_at: DateTime<Utc>) -> Result<String, CatalogError> {
    let records: Vec<DataRecord<'_>> = dataset
        .records()
        .iter()
        .map(|r| DataRecord {
            repository: &r.repository,
            discovery: &r.discovery,
            quality: &r.quality,
            contacts: &r.contacts[..r.contacts.len().min(DATA_CONTACT_LIMIT)],
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)?;
    Ok(format!(
        "// Auto-generated from discoveries.json\n// Generated: {}\n\nconst discoveries = {};\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        json
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Confidence, ContactKind};
    use crate::view::card::tests::record;
    use chrono::TimeZone;

    #[test]
    fn test_data_js_round_trips_through_loader() {
        let mut rec = record("Kong", "kong", 8);
        rec.contacts = (0..5)
            .map(|i| Contact {
                kind: ContactKind::Github,
                value: format!("user{i}"),
                source_file: "README.md".into(),
                confidence: Confidence::Low,
            })
            .collect();
        let ts = Utc.with_ymd_and_hms(2025, 11, 25, 2, 57, 57).unwrap();

        let js = render_data_js(&Dataset::new(vec![rec]), ts).unwrap();
        assert!(js.starts_with("// Auto-generated from discoveries.json\n"));
        assert!(js.contains("// Generated: 2025-11-25T02:57:57Z"));
        assert!(js.trim_end().ends_with("];"));

        let loaded = Dataset::parse(&js).unwrap();
        let contacts = &loaded.records()[0].contacts;
        assert_eq!(contacts.len(), DATA_CONTACT_LIMIT);
        assert_eq!(contacts[2].value, "user2");
    }

    #[test]
    fn test_unknown_contact_types_pass_through() {
        let mut rec = record("Kong", "kong", 8);
        rec.contacts = vec![Contact {
            kind: ContactKind::Other("twitter".into()),
            value: "@kong".into(),
            source_file: "README.md".into(),
            confidence: Confidence::Low,
        }];
        let ts = Utc.with_ymd_and_hms(2025, 11, 25, 2, 57, 57).unwrap();

        let js = render_data_js(&Dataset::new(vec![rec]), ts).unwrap();
        assert!(js.contains(r#""type": "twitter""#));
        assert!(!js.contains(r#""type": "other""#));

        let loaded = Dataset::parse(&js).unwrap();
        assert_eq!(
            loaded.records()[0].contacts[0].kind,
            ContactKind::Other("twitter".into())
        );
    }
}
