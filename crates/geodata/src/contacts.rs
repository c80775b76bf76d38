use crate::error::{GeodataError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Contact channels for one district. Every field is optional; an absent
/// channel is an expected state, not an error.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactRecord {
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    #[serde(alias = "meetingInfo")]
    pub meeting_info: Option<String>,
}

impl ContactRecord {
    pub fn is_empty(&self) -> bool {
        self.website.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.facebook.is_none()
            && self.twitter.is_none()
            && self.meeting_info.is_none()
    }
}

/// Two independent key-to-record mappings: BPOU name and CD id.
///
/// Loaded independently of the feature store; either table may be missing
/// without affecting the other. Lookups are total over the key space.
#[derive(Debug, Default)]
pub struct ContactDirectory {
    bpou: HashMap<String, ContactRecord>,
    cd: HashMap<String, ContactRecord>,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the BPOU-name keyed table, returning the entry count.
    pub fn load_bpou(&mut self, raw: &str) -> Result<usize> {
        self.bpou = parse_table(raw, "BPOU")?;
        Ok(self.bpou.len())
    }

    /// Loads the CD-id keyed table, returning the entry count.
    pub fn load_cd(&mut self, raw: &str) -> Result<usize> {
        self.cd = parse_table(raw, "CD")?;
        Ok(self.cd.len())
    }

    /// Always returns a record; unknown names yield an all-absent one.
    pub fn lookup_bpou(&self, name: &str) -> ContactRecord {
        self.bpou.get(name).cloned().unwrap_or_default()
    }

    /// Always returns a record; unknown ids yield an all-absent one.
    pub fn lookup_cd(&self, id: &str) -> ContactRecord {
        self.cd.get(id).cloned().unwrap_or_default()
    }
}

/// Entries whose value is not a contact object are dropped with a warning
/// rather than failing the whole table, so a partially unexpected structure
/// degrades instead of erroring.
fn parse_table(raw: &str, which: &str) -> Result<HashMap<String, ContactRecord>> {
    let entries: HashMap<String, Value> = serde_json::from_str(raw)
        .map_err(|err| GeodataError::InvalidContacts(format!("{which} table: {err}")))?;

    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(record) => Some((key, record)),
            Err(err) => {
                log::warn!("Dropping malformed {which} contact entry '{key}': {err}");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookups_are_total() {
        let directory = ContactDirectory::new();
        assert!(directory.lookup_bpou("nonexistent").is_empty());
        assert!(directory.lookup_cd("nonexistent").is_empty());
    }

    #[test]
    fn loads_partial_records() {
        let mut directory = ContactDirectory::new();
        let count = directory
            .load_bpou(
                r#"{"Ramsey County":{"website":"https://example.org","meetingInfo":"First Tuesdays"},
                    "Dakota County":{}}"#,
            )
            .unwrap();

        assert_eq!(count, 2);
        let ramsey = directory.lookup_bpou("Ramsey County");
        assert_eq!(ramsey.website.as_deref(), Some("https://example.org"));
        assert_eq!(ramsey.meeting_info.as_deref(), Some("First Tuesdays"));
        assert_eq!(ramsey.phone, None);
        assert!(directory.lookup_bpou("Dakota County").is_empty());
    }

    #[test]
    fn malformed_entries_are_dropped_not_fatal() {
        let mut directory = ContactDirectory::new();
        let count = directory
            .load_cd(r#"{"4":{"website":"https://cd4.example"},"5":"not an object"}"#)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            directory.lookup_cd("4").website.as_deref(),
            Some("https://cd4.example")
        );
        assert!(directory.lookup_cd("5").is_empty());
    }

    #[test]
    fn non_object_table_is_an_error() {
        let mut directory = ContactDirectory::new();
        assert!(directory.load_bpou("[1,2,3]").is_err());
    }

    #[test]
    fn tables_are_independent() {
        let mut directory = ContactDirectory::new();
        directory
            .load_bpou(r#"{"Ramsey County":{"phone":"555-0100"}}"#)
            .unwrap();

        assert_eq!(
            directory.lookup_bpou("Ramsey County").phone.as_deref(),
            Some("555-0100")
        );
        assert!(directory.lookup_cd("Ramsey County").is_empty());
    }
}
