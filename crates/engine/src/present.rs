//! Maps a [`DistrictMatch`] plus contact lookups into a renderable content
//! description. Rendering itself (HTML, terminal text, anything else) is a
//! pure projection applied by the host; nothing here touches a display.

use crate::types::DistrictMatch;
use bpou_geodata::{ContactDirectory, ContactRecord};
use serde::Serialize;

/// Shown when no BPOU polygon contained the resolved point.
pub const BPOU_UNKNOWN_MESSAGE: &str = "Couldn't determine your BPOU.";

/// Substituted into the feedback template when the BPOU is unknown.
const BPOU_NA_TOKEN: &str = "N/A";

/// One contact channel with an explicit presence flag. Absent channels are
/// rendered as "not available", never silently omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Channel {
    Available(String),
    NotAvailable,
}

impl Channel {
    fn from_field(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self::Available(v),
            _ => Self::NotAvailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Available(v) => Some(v),
            Self::NotAvailable => None,
        }
    }
}

/// Every contact channel of one district, each with its presence flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactChannels {
    pub website: Channel,
    pub phone: Channel,
    pub email: Channel,
    pub facebook: Channel,
    pub twitter: Channel,
    pub meeting_info: Channel,
}

impl From<ContactRecord> for ContactChannels {
    fn from(record: ContactRecord) -> Self {
        Self {
            website: Channel::from_field(record.website),
            phone: Channel::from_field(record.phone),
            email: Channel::from_field(record.email),
            facebook: Channel::from_field(record.facebook),
            twitter: Channel::from_field(record.twitter),
            meeting_info: Channel::from_field(record.meeting_info),
        }
    }
}

/// BPOU half of the display. `name` is `None` when no BPOU contained the
/// point; renderers show [`BPOU_UNKNOWN_MESSAGE`] in that case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BpouSection {
    pub name: Option<String>,
    pub contact: ContactChannels,
}

/// CD half of the display. `id` may be the `"?"` sentinel but is always
/// present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CdSection {
    pub id: String,
    pub contact: ContactChannels,
}

/// The fixed contact-suggestion affordance, parameterized by the resolved
/// districts. Always present, even when nothing else resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackPrompt {
    pub subject: String,
    pub body: String,
}

/// Structured description of everything the host should render after a
/// full (locked-style) resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayContent {
    /// Disclosure line naming the simplified address that was actually
    /// geocoded, when a fallback variation succeeded.
    pub fallback_notice: Option<String>,
    pub bpou: BpouSection,
    pub cd: CdSection,
    pub feedback: FeedbackPrompt,
}

/// Reduced description for hover previews: the BPOU name and website
/// presence only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreviewContent {
    pub bpou_name: Option<String>,
    pub website: Channel,
}

/// Builds the full display description for `district`.
pub fn present(
    district: &DistrictMatch,
    directory: &ContactDirectory,
    used_fallback_address: Option<&str>,
) -> DisplayContent {
    let bpou_contact = district
        .bpou_name
        .as_deref()
        .map(|name| directory.lookup_bpou(name))
        .unwrap_or_default();
    let cd_contact = directory.lookup_cd(&district.cd_id);

    let bpou_label = district.bpou_name.as_deref().unwrap_or(BPOU_NA_TOKEN);

    DisplayContent {
        fallback_notice: used_fallback_address
            .map(|address| format!("Showing results for a simplified address: {address}")),
        bpou: BpouSection {
            name: district.bpou_name.clone(),
            contact: bpou_contact.into(),
        },
        cd: CdSection {
            id: district.cd_id.clone(),
            contact: cd_contact.into(),
        },
        feedback: FeedbackPrompt {
            subject: format!("BPOU locator feedback: {bpou_label} / CD {}", district.cd_id),
            body: format!(
                "Suggested contact update for BPOU: {bpou_label}, Congressional District: {}.",
                district.cd_id
            ),
        },
    }
}

/// Builds the hover-preview description for `district`.
pub fn present_preview(district: &DistrictMatch, directory: &ContactDirectory) -> PreviewContent {
    let website = district
        .bpou_name
        .as_deref()
        .map(|name| directory.lookup_bpou(name).website)
        .unwrap_or_default();

    PreviewContent {
        bpou_name: district.bpou_name.clone(),
        website: Channel::from_field(website),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directory() -> ContactDirectory {
        let mut directory = ContactDirectory::new();
        directory
            .load_bpou(
                r#"{"Ramsey County":{"website":"https://ramsey.example","phone":"555-0100"}}"#,
            )
            .unwrap();
        directory
            .load_cd(r#"{"4":{"website":"https://cd4.example"}}"#)
            .unwrap();
        directory
    }

    #[test]
    fn full_match_surfaces_channels_with_presence_flags() {
        let district = DistrictMatch {
            bpou_name: Some("Ramsey County".into()),
            cd_id: "4".into(),
        };
        let content = present(&district, &directory(), None);

        assert_eq!(content.fallback_notice, None);
        assert_eq!(content.bpou.name.as_deref(), Some("Ramsey County"));
        assert_eq!(
            content.bpou.contact.website,
            Channel::Available("https://ramsey.example".into())
        );
        assert_eq!(content.bpou.contact.phone.value(), Some("555-0100"));
        // Absent channels are explicit, not omitted.
        assert_eq!(content.bpou.contact.email, Channel::NotAvailable);
        assert_eq!(content.bpou.contact.meeting_info, Channel::NotAvailable);
        assert_eq!(content.cd.id, "4");
        assert!(content.cd.contact.website.is_available());
    }

    #[test]
    fn null_bpou_still_renders_cd_and_feedback() {
        let district = DistrictMatch {
            bpou_name: None,
            cd_id: "4".into(),
        };
        let content = present(&district, &directory(), None);

        assert_eq!(content.bpou.name, None);
        assert!(!content.bpou.contact.website.is_available());
        assert_eq!(content.cd.id, "4");
        assert_eq!(
            content.feedback.subject,
            "BPOU locator feedback: N/A / CD 4"
        );
        assert!(content.feedback.body.contains("BPOU: N/A"));
        assert!(content.feedback.body.contains("Congressional District: 4"));
    }

    #[test]
    fn unknown_everything_still_produces_feedback_affordance() {
        let content = present(&DistrictMatch::unknown(), &ContactDirectory::new(), None);

        assert_eq!(content.cd.id, "?");
        assert!(!content.cd.contact.website.is_available());
        assert_eq!(
            content.feedback.subject,
            "BPOU locator feedback: N/A / CD ?"
        );
    }

    #[test]
    fn fallback_address_is_disclosed() {
        let district = DistrictMatch {
            bpou_name: Some("Ramsey County".into()),
            cd_id: "4".into(),
        };
        let content = present(&district, &directory(), Some("St. Paul, Minnesota"));

        assert_eq!(
            content.fallback_notice.as_deref(),
            Some("Showing results for a simplified address: St. Paul, Minnesota")
        );
    }

    #[test]
    fn preview_surfaces_only_name_and_website() {
        let district = DistrictMatch {
            bpou_name: Some("Ramsey County".into()),
            cd_id: "4".into(),
        };
        let preview = present_preview(&district, &directory());

        assert_eq!(preview.bpou_name.as_deref(), Some("Ramsey County"));
        assert_eq!(preview.website.value(), Some("https://ramsey.example"));

        let miss = present_preview(&DistrictMatch::unknown(), &directory());
        assert_eq!(miss.bpou_name, None);
        assert_eq!(miss.website, Channel::NotAvailable);
    }

    #[test]
    fn blank_strings_count_as_absent_channels() {
        let record = ContactRecord {
            website: Some("   ".into()),
            ..ContactRecord::default()
        };
        let channels: ContactChannels = record.into();
        assert_eq!(channels.website, Channel::NotAvailable);
    }
}
