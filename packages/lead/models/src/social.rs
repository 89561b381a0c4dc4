//! Social platform handles and clickable profile links.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{Lead, LeadField, is_present};

/// Marker the generation backend appends to guessed handles.
pub const ESTIMATED_MARKER: &str = "(estimated)";

/// A social platform a lead may have a presence on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Linkedin,
    Twitter,
}

impl SocialPlatform {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Instagram, Self::Facebook, Self::Linkedin, Self::Twitter]
    }

    /// Returns the [`Lead`] field holding this platform's handle.
    #[must_use]
    pub const fn field(self) -> LeadField {
        match self {
            Self::Instagram => LeadField::InstagramHandle,
            Self::Facebook => LeadField::FacebookPage,
            Self::Linkedin => LeadField::LinkedinProfile,
            Self::Twitter => LeadField::TwitterHandle,
        }
    }

    /// Returns the raw handle stored on the lead for this platform.
    #[must_use]
    pub fn handle(self, lead: &Lead) -> Option<&str> {
        lead.field(self.field())
    }

    const fn profile_base(self) -> &'static str {
        match self {
            Self::Instagram => "https://instagram.com/",
            Self::Facebook => "https://facebook.com/",
            Self::Linkedin => "https://linkedin.com/in/",
            Self::Twitter => "https://twitter.com/",
        }
    }
}

/// Builds a clickable profile URL for the lead on the given platform.
///
/// Returns `None` when the handle is not present or was only estimated by
/// the backend. Values that are already URLs are returned unchanged; a
/// leading `@` is dropped before joining with the platform's base URL.
#[must_use]
pub fn social_link(platform: SocialPlatform, lead: &Lead) -> Option<String> {
    let handle = platform.handle(lead)?.trim();

    if !is_present(Some(handle)) || handle.contains(ESTIMATED_MARKER) {
        return None;
    }

    if handle.starts_with("http://") || handle.starts_with("https://") {
        return Some(handle.to_string());
    }

    let handle = handle.trim_start_matches('@');
    if handle.is_empty() {
        return None;
    }

    Some(format!("{}{handle}", platform.profile_base()))
}
