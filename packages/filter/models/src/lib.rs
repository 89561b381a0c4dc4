#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter criteria, sort configuration and draft/commit filter state.
//!
//! [`FilterCriteria`] is a plain snapshot. The filter panel edits a draft
//! copy and only replaces the active snapshot on [`FilterPanel::commit`];
//! [`FilterPanel::discard`] throws the draft away.

pub mod panel;

use std::collections::BTreeSet;

use lead_engine_lead_models::social::SocialPlatform;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use panel::FilterPanel;

/// Granularity of the minimum score slider.
pub const MIN_SCORE_STEP: u8 = 10;

/// Highest selectable minimum score.
pub const MIN_SCORE_MAX: u8 = 100;

/// Clamps a minimum score to `0..=100` and snaps it down to a multiple of
/// [`MIN_SCORE_STEP`].
#[must_use]
pub const fn snap_min_score(value: u8) -> u8 {
    let clamped = if value > MIN_SCORE_MAX {
        MIN_SCORE_MAX
    } else {
        value
    };
    clamped - clamped % MIN_SCORE_STEP
}

fn deserialize_min_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = u32::deserialize(deserializer)?;
    Ok(snap_min_score(u8::try_from(raw).unwrap_or(u8::MAX)))
}

/// Per-platform social toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialFilters {
    pub instagram: bool,
    pub facebook: bool,
    pub linkedin: bool,
    pub twitter: bool,
}

impl SocialFilters {
    /// Returns whether the toggle for `platform` is on.
    #[must_use]
    pub const fn is_enabled(&self, platform: SocialPlatform) -> bool {
        match platform {
            SocialPlatform::Instagram => self.instagram,
            SocialPlatform::Facebook => self.facebook,
            SocialPlatform::Linkedin => self.linkedin,
            SocialPlatform::Twitter => self.twitter,
        }
    }

    /// Turns the toggle for `platform` on or off.
    pub const fn set(&mut self, platform: SocialPlatform, enabled: bool) {
        match platform {
            SocialPlatform::Instagram => self.instagram = enabled,
            SocialPlatform::Facebook => self.facebook = enabled,
            SocialPlatform::Linkedin => self.linkedin = enabled,
            SocialPlatform::Twitter => self.twitter = enabled,
        }
    }

    /// Returns `true` if at least one platform toggle is on.
    #[must_use]
    pub const fn any_enabled(&self) -> bool {
        self.instagram || self.facebook || self.linkedin || self.twitter
    }

    /// Iterates the platforms whose toggle is on.
    pub fn enabled(&self) -> impl Iterator<Item = SocialPlatform> + '_ {
        SocialPlatform::all()
            .iter()
            .copied()
            .filter(|platform| self.is_enabled(*platform))
    }
}

/// A snapshot of every filter selection.
///
/// The default snapshot filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub has_phone: bool,
    pub has_email: bool,
    pub has_website: bool,
    /// Require presence on any social platform. Ignored while any
    /// per-platform toggle in `socials` is on.
    pub has_socials: bool,
    pub socials: SocialFilters,
    /// Niche names a lead must belong to. Empty means no niche filtering.
    pub niches: BTreeSet<String>,
    /// Minimum score, a multiple of [`MIN_SCORE_STEP`] in `0..=100`.
    ///
    /// Snapped on deserialize. Struct literals can still hold any value, so
    /// readers go through [`Self::effective_min_score`].
    #[serde(deserialize_with = "deserialize_min_score")]
    pub min_score: u8,
    /// Case-insensitive search over business and owner names.
    pub search: String,
}

impl FilterCriteria {
    /// Sets the minimum score, clamped to `0..=100` and snapped down to a
    /// multiple of [`MIN_SCORE_STEP`].
    pub const fn set_min_score(&mut self, value: u8) {
        self.min_score = snap_min_score(value);
    }

    /// The minimum score as the filter applies it, snapped even if the
    /// field was set directly.
    #[must_use]
    pub const fn effective_min_score(&self) -> u8 {
        snap_min_score(self.min_score)
    }

    /// Adds or removes a niche from the niche filter.
    pub fn toggle_niche(&mut self, niche: &str) {
        if !self.niches.remove(niche) {
            self.niches.insert(niche.to_string());
        }
    }

    /// Number of active filter selections, for the filter button badge.
    ///
    /// Each toggle, each selected niche and a non-zero minimum score count
    /// once. The search text is not counted.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let toggles = [self.has_phone, self.has_email, self.has_website, self.has_socials]
            .into_iter()
            .filter(|enabled| *enabled)
            .count();

        toggles
            + self.socials.enabled().count()
            + self.niches.len()
            + usize::from(self.effective_min_score() > 0)
    }

    /// Returns a copy with every selection cleared except the search text.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            search: self.search.clone(),
            ..Self::default()
        }
    }
}

/// Field the lead list is ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// Computed lead score
    #[default]
    Score,
    /// Record creation timestamp
    CreatedAt,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort key and direction. Defaults to score, descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Returns the config after the user clicks the header for `key`.
    ///
    /// Clicking the current key flips the direction; clicking a different
    /// key switches to it, descending.
    #[must_use]
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::new(key, SortDirection::Desc)
        }
    }
}
