#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weighted point scoring for lead records.
//!
//! [`score`] awards a fixed number of points for every present field (see
//! [`lead_engine_lead_models::is_present`]) and groups the awards into four
//! categories. There is no partial credit: each item is worth either zero
//! or its full weight.

use lead_engine_lead_models::{Lead, LeadField};
use lead_engine_scoring_models::{
    CategoryScore, RescoredLead, ScoreBreakdown, ScoreCategory, ScoreItem,
};

/// Name of the bonus item awarded when both city and state are present.
pub const COMPLETE_LOCATION: &str = "complete_location";

/// Points for the complete-location bonus. Additive on top of the city and
/// state points.
pub const COMPLETE_LOCATION_POINTS: u8 = 3;

/// Per-field weights, grouped by category, in display order.
pub const FIELD_WEIGHTS: &[(ScoreCategory, LeadField, u8)] = &[
    (ScoreCategory::ContactInfo, LeadField::Email, 18),
    (ScoreCategory::ContactInfo, LeadField::Phone, 17),
    (ScoreCategory::ContactInfo, LeadField::Website, 10),
    (ScoreCategory::SocialPresence, LeadField::InstagramHandle, 10),
    (ScoreCategory::SocialPresence, LeadField::FacebookPage, 8),
    (ScoreCategory::SocialPresence, LeadField::LinkedinProfile, 9),
    (ScoreCategory::SocialPresence, LeadField::TwitterHandle, 3),
    (ScoreCategory::BusinessInfo, LeadField::BusinessName, 5),
    (ScoreCategory::BusinessInfo, LeadField::OwnerName, 10),
    (ScoreCategory::Geographic, LeadField::City, 3),
    (ScoreCategory::Geographic, LeadField::StateProvince, 4),
];

fn category_score(lead: &Lead, category: ScoreCategory) -> CategoryScore {
    let mut items: Vec<ScoreItem> = FIELD_WEIGHTS
        .iter()
        .filter(|(c, _, _)| *c == category)
        .map(|(_, field, points)| ScoreItem::new(field.as_ref(), *points, lead.has(*field)))
        .collect();

    if category == ScoreCategory::Geographic {
        let complete = lead.has(LeadField::City) && lead.has(LeadField::StateProvince);
        items.push(ScoreItem::new(
            COMPLETE_LOCATION,
            COMPLETE_LOCATION_POINTS,
            complete,
        ));
    }

    CategoryScore::from_items(category, items)
}

/// Computes the score and breakdown for a lead.
///
/// Pure and deterministic. A lead with no optional fields scores `0` but
/// still gets a fully populated breakdown with every item marked absent.
#[must_use]
pub fn score(lead: &Lead) -> ScoreBreakdown {
    ScoreBreakdown::new(
        category_score(lead, ScoreCategory::ContactInfo),
        category_score(lead, ScoreCategory::SocialPresence),
        category_score(lead, ScoreCategory::BusinessInfo),
        category_score(lead, ScoreCategory::Geographic),
    )
}

/// Shorthand for `score(lead).total`.
#[must_use]
pub fn total(lead: &Lead) -> u8 {
    score(lead).total
}

/// Recomputes every lead's score and compares it to the cached `lead_score`.
///
/// The caller is responsible for persisting the stale entries.
#[must_use]
pub fn rescore_all(leads: &[Lead]) -> Vec<RescoredLead> {
    let rescored: Vec<RescoredLead> = leads
        .iter()
        .map(|lead| {
            let score = total(lead);
            RescoredLead {
                id: lead.id.clone(),
                score,
                previous: lead.lead_score,
                stale: lead.lead_score != Some(u32::from(score)),
            }
        })
        .collect();

    log::debug!(
        "rescore_all: {} leads, {} stale",
        rescored.len(),
        rescored.iter().filter(|r| r.stale).count()
    );

    rescored
}
