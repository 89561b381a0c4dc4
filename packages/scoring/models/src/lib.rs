#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lead score breakdown types.
//!
//! A [`ScoreBreakdown`] is derived state: it is recomputed from the lead on
//! every evaluation and never persisted as the source of truth. The four
//! category maxima sum to exactly [`MAX_SCORE`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Highest score a lead can reach.
pub const MAX_SCORE: u8 = 100;

/// The four scoring categories.
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ScoreCategory {
    /// Email, phone and website
    ContactInfo,
    /// Instagram, Facebook, `LinkedIn` and Twitter handles
    SocialPresence,
    /// Business and owner names
    BusinessInfo,
    /// City, state/province and the complete-location bonus
    Geographic,
}

impl ScoreCategory {
    /// Returns the maximum number of points this category contributes.
    #[must_use]
    pub const fn max_points(self) -> u8 {
        match self {
            Self::ContactInfo => 45,
            Self::SocialPresence => 30,
            Self::BusinessInfo => 15,
            Self::Geographic => 10,
        }
    }

    /// Returns all variants of this enum, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ContactInfo,
            Self::SocialPresence,
            Self::BusinessInfo,
            Self::Geographic,
        ]
    }
}

/// One line of a category: a single all-or-nothing point award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreItem {
    /// Item name, e.g. `"email"` or `"complete_location"`.
    pub name: Cow<'static, str>,
    /// Points awarded: either `0` or `max`.
    pub value: u8,
    /// Fixed point weight of this item.
    pub max: u8,
    pub present: bool,
}

impl ScoreItem {
    /// Creates an item awarding `max` points if `present`, otherwise zero.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, max: u8, present: bool) -> Self {
        Self {
            name: name.into(),
            value: if present { max } else { 0 },
            max,
            present,
        }
    }
}

/// Subtotal and line items for one [`ScoreCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Sum of the item values, saturating at `u8::MAX`.
    pub score: u8,
    pub max: u8,
    pub items: Vec<ScoreItem>,
}

impl CategoryScore {
    /// Builds a category from its items, summing their values.
    #[must_use]
    pub fn from_items(category: ScoreCategory, items: Vec<ScoreItem>) -> Self {
        let score = items
            .iter()
            .fold(0u8, |acc, item| acc.saturating_add(item.value));
        Self {
            score,
            max: category.max_points(),
            items,
        }
    }
}

/// Full score of a lead with its per-category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Sum of the four category subtotals, in `0..=100`.
    pub total: u8,
    pub contact_info: CategoryScore,
    pub social_presence: CategoryScore,
    pub business_info: CategoryScore,
    pub geographic: CategoryScore,
}

impl ScoreBreakdown {
    /// Assembles a breakdown, deriving `total` from the category subtotals.
    #[must_use]
    pub fn new(
        contact_info: CategoryScore,
        social_presence: CategoryScore,
        business_info: CategoryScore,
        geographic: CategoryScore,
    ) -> Self {
        let total = contact_info
            .score
            .saturating_add(social_presence.score)
            .saturating_add(business_info.score)
            .saturating_add(geographic.score);
        Self {
            total,
            contact_info,
            social_presence,
            business_info,
            geographic,
        }
    }

    /// Returns the score for one category.
    #[must_use]
    pub const fn category(&self, category: ScoreCategory) -> &CategoryScore {
        match category {
            ScoreCategory::ContactInfo => &self.contact_info,
            ScoreCategory::SocialPresence => &self.social_presence,
            ScoreCategory::BusinessInfo => &self.business_info,
            ScoreCategory::Geographic => &self.geographic,
        }
    }

    /// Iterates categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = (ScoreCategory, &CategoryScore)> {
        ScoreCategory::all()
            .iter()
            .map(move |category| (*category, self.category(*category)))
    }

    /// Iterates every line item across all categories.
    pub fn items(&self) -> impl Iterator<Item = &ScoreItem> {
        self.categories()
            .flat_map(|(_, category)| category.items.iter())
    }
}

/// Result of recomputing a lead's score against its cached value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescoredLead {
    pub id: String,
    /// Freshly computed total.
    pub score: u8,
    /// The `lead_score` cached on the record, if any.
    pub previous: Option<u32>,
    /// `true` if the cache is missing or differs from `score`.
    pub stale: bool,
}
