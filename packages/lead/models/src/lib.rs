#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lead record types and the shared field presence rule.
//!
//! A [`Lead`] is a sparse record: apart from its id and business type, every
//! field may be missing, empty, or filled with the `"N/A"` placeholder that
//! the generation backend writes when it could not find a value. Scoring and
//! filtering both go through [`Lead::field`] and [`is_present`], so there is
//! exactly one definition of what counts as "having" a field.

pub mod social;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Placeholder value written by the generation backend for unknown fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns `true` if a field value counts as present.
///
/// A value is present iff it exists, is non-empty, and is not the
/// [`NOT_AVAILABLE`] sentinel.
#[must_use]
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

/// The kind of business a lead represents.
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
pub enum BusinessType {
    /// Online store (may carry Shopify/Meta enrichment fields)
    Ecommerce,
    /// Brick-and-mortar or on-site service business
    LocalService,
}

/// The optional text fields of a [`Lead`] that take part in presence checks.
///
/// The `snake_case` string form matches the field name in stored records.
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
pub enum LeadField {
    BusinessName,
    OwnerName,
    Phone,
    Email,
    Website,
    City,
    StateProvince,
    NicheName,
    InstagramHandle,
    FacebookPage,
    LinkedinProfile,
    TwitterHandle,
}

impl LeadField {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::BusinessName,
            Self::OwnerName,
            Self::Phone,
            Self::Email,
            Self::Website,
            Self::City,
            Self::StateProvince,
            Self::NicheName,
            Self::InstagramHandle,
            Self::FacebookPage,
            Self::LinkedinProfile,
            Self::TwitterHandle,
        ]
    }
}

/// A prospective business contact.
///
/// Records are read-only inside the engine; creation, edits and deletion
/// belong to the persistence store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Stable, unique identifier assigned by the store.
    pub id: String,
    pub business_type: BusinessType,
    pub business_name: Option<String>,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub niche_name: Option<String>,
    pub instagram_handle: Option<String>,
    pub facebook_page: Option<String>,
    pub linkedin_profile: Option<String>,
    pub twitter_handle: Option<String>,

    // ── E-commerce enrichment ────────────────────────────────
    /// Estimated monthly revenue in USD.
    pub monthly_revenue_estimate: Option<f64>,
    pub follower_count_instagram: Option<u64>,
    /// Instagram engagement rate as a percentage.
    pub engagement_rate: Option<f64>,
    /// Estimated monthly ad spend in USD.
    pub ad_spend_estimate: Option<f64>,
    pub shopify_detected: Option<bool>,

    /// Last persisted score. A cache only; always recomputed for display.
    pub lead_score: Option<u32>,
    /// Creation timestamp as stored (usually RFC 3339).
    pub created_at: Option<String>,
}

impl Lead {
    /// Creates a lead with only its identity fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, business_type: BusinessType) -> Self {
        Self {
            id: id.into(),
            business_type,
            business_name: None,
            owner_name: None,
            phone: None,
            email: None,
            website: None,
            city: None,
            state_province: None,
            niche_name: None,
            instagram_handle: None,
            facebook_page: None,
            linkedin_profile: None,
            twitter_handle: None,
            monthly_revenue_estimate: None,
            follower_count_instagram: None,
            engagement_rate: None,
            ad_spend_estimate: None,
            shopify_detected: None,
            lead_score: None,
            created_at: None,
        }
    }

    /// Returns the raw value of a text field, without any presence check.
    #[must_use]
    pub fn field(&self, field: LeadField) -> Option<&str> {
        let value = match field {
            LeadField::BusinessName => &self.business_name,
            LeadField::OwnerName => &self.owner_name,
            LeadField::Phone => &self.phone,
            LeadField::Email => &self.email,
            LeadField::Website => &self.website,
            LeadField::City => &self.city,
            LeadField::StateProvince => &self.state_province,
            LeadField::NicheName => &self.niche_name,
            LeadField::InstagramHandle => &self.instagram_handle,
            LeadField::FacebookPage => &self.facebook_page,
            LeadField::LinkedinProfile => &self.linkedin_profile,
            LeadField::TwitterHandle => &self.twitter_handle,
        };
        value.as_deref()
    }

    /// Returns the value of a text field only if it is present.
    #[must_use]
    pub fn present(&self, field: LeadField) -> Option<&str> {
        self.field(field).filter(|v| is_present(Some(v)))
    }

    /// Returns `true` if the given field is present per [`is_present`].
    #[must_use]
    pub fn has(&self, field: LeadField) -> bool {
        is_present(self.field(field))
    }

    /// Returns `true` if the lead is present on at least one social platform.
    #[must_use]
    pub fn has_any_social(&self) -> bool {
        social::SocialPlatform::all()
            .iter()
            .any(|platform| self.has(platform.field()))
    }
}

/// Removes records whose id was already seen, keeping the first occurrence.
///
/// Relative order of the surviving records is unchanged.
#[must_use]
pub fn dedupe_by_id(leads: Vec<Lead>) -> Vec<Lead> {
    let mut seen = BTreeSet::new();
    leads
        .into_iter()
        .filter(|lead| seen.insert(lead.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_rejects_missing_empty_and_sentinel() {
        assert!(!is_present(None));
        assert!(!is_present(Some("")));
        assert!(!is_present(Some("N/A")));
        assert!(is_present(Some("a@b.com")));
    }

    #[test]
    fn presence_sentinel_is_case_sensitive() {
        // Only the exact placeholder written by the backend is special.
        assert!(is_present(Some("n/a")));
        assert!(is_present(Some(" N/A")));
    }

    #[test]
    fn field_accessor_covers_every_field() {
        let mut lead = Lead::new("1", BusinessType::Ecommerce);
        lead.business_name = Some("business_name".to_string());
        lead.owner_name = Some("owner_name".to_string());
        lead.phone = Some("phone".to_string());
        lead.email = Some("email".to_string());
        lead.website = Some("website".to_string());
        lead.city = Some("city".to_string());
        lead.state_province = Some("state_province".to_string());
        lead.niche_name = Some("niche_name".to_string());
        lead.instagram_handle = Some("instagram_handle".to_string());
        lead.facebook_page = Some("facebook_page".to_string());
        lead.linkedin_profile = Some("linkedin_profile".to_string());
        lead.twitter_handle = Some("twitter_handle".to_string());

        for field in LeadField::all() {
            assert_eq!(
                lead.field(*field),
                Some(field.as_ref()),
                "{field} returned the wrong value"
            );
        }
    }

    #[test]
    fn has_uses_shared_presence_rule() {
        let mut lead = Lead::new("1", BusinessType::LocalService);
        lead.state_province = Some("N/A".to_string());
        lead.city = Some("Austin".to_string());

        assert!(!lead.has(LeadField::StateProvince));
        assert!(lead.has(LeadField::City));
        assert_eq!(lead.present(LeadField::StateProvince), None);
        assert_eq!(lead.field(LeadField::StateProvince), Some("N/A"));
    }

    #[test]
    fn any_social_ignores_placeholders() {
        let mut lead = Lead::new("1", BusinessType::LocalService);
        lead.instagram_handle = Some("N/A".to_string());
        lead.twitter_handle = Some(String::new());
        assert!(!lead.has_any_social());

        lead.linkedin_profile = Some("acme-co".to_string());
        assert!(lead.has_any_social());
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut first = Lead::new("a", BusinessType::LocalService);
        first.business_name = Some("First".to_string());
        let mut duplicate = Lead::new("a", BusinessType::LocalService);
        duplicate.business_name = Some("Second".to_string());
        let other = Lead::new("b", BusinessType::Ecommerce);

        let deduped = dedupe_by_id(vec![first.clone(), other.clone(), duplicate]);
        assert_eq!(deduped, vec![first, other]);
    }

    #[test]
    fn deserializes_sparse_record() {
        let lead: Lead = serde_json::from_str(
            r#"{"id":"1","business_type":"local_service","email":null,"city":"Austin"}"#,
        )
        .unwrap();
        assert_eq!(lead.business_type, BusinessType::LocalService);
        assert_eq!(lead.email, None);
        assert_eq!(lead.city.as_deref(), Some("Austin"));
        assert_eq!(lead.lead_score, None);
    }

    #[test]
    fn business_type_string_forms() {
        assert_eq!(BusinessType::Ecommerce.to_string(), "ecommerce");
        assert_eq!(
            "local_service".parse::<BusinessType>().unwrap(),
            BusinessType::LocalService
        );
    }
}
