//! AND-combined filter stages.
//!
//! Stages, each an identity when disabled:
//!
//! 1. search over business and owner names
//! 2. minimum score
//! 3. contact method toggles (phone, email, website)
//! 4. social presence (per-platform OR, or any-platform)
//! 5. niche membership
//!
//! Every presence check goes through [`Lead::has`], the same rule the
//! scoring engine uses.

use lead_engine_filter_models::FilterCriteria;
use lead_engine_lead_models::social::SocialPlatform;
use lead_engine_lead_models::{Lead, LeadField};

use crate::Rankable;

/// Case-insensitive substring match on business or owner name.
///
/// The query is trimmed first: surrounding whitespace is never significant,
/// and a query that trims to nothing passes every lead.
fn matches_search(lead: &Lead, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();

    [LeadField::BusinessName, LeadField::OwnerName]
        .into_iter()
        .filter_map(|field| lead.present(field))
        .any(|name| name.to_lowercase().contains(&query))
}

fn matches_min_score<R: Rankable + ?Sized>(item: &R, min_score: u8) -> bool {
    min_score == 0 || item.score_total() >= min_score
}

fn matches_contact(lead: &Lead, criteria: &FilterCriteria) -> bool {
    (!criteria.has_phone || lead.has(LeadField::Phone))
        && (!criteria.has_email || lead.has(LeadField::Email))
        && (!criteria.has_website || lead.has(LeadField::Website))
}

fn matches_social(lead: &Lead, criteria: &FilterCriteria) -> bool {
    if criteria.socials.any_enabled() {
        criteria
            .socials
            .enabled()
            .any(|platform: SocialPlatform| lead.has(platform.field()))
    } else if criteria.has_socials {
        lead.has_any_social()
    } else {
        true
    }
}

fn matches_niche(lead: &Lead, criteria: &FilterCriteria) -> bool {
    criteria.niches.is_empty()
        || lead
            .niche_name
            .as_ref()
            .is_some_and(|niche| criteria.niches.contains(niche))
}

/// Returns `true` if the item survives every active filter stage.
///
/// The score is only computed when a minimum score is set.
#[must_use]
pub fn matches<R: Rankable + ?Sized>(item: &R, criteria: &FilterCriteria) -> bool {
    let lead = item.lead();

    matches_search(lead, &criteria.search)
        && matches_min_score(item, criteria.effective_min_score())
        && matches_contact(lead, criteria)
        && matches_social(lead, criteria)
        && matches_niche(lead, criteria)
}

/// Filters leads by the given criteria, preserving their relative order.
#[must_use]
pub fn filter_leads<'a, I>(leads: I, criteria: &FilterCriteria) -> Vec<&'a Lead>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut seen = 0usize;
    let filtered: Vec<&Lead> = leads
        .into_iter()
        .inspect(|_| seen += 1)
        .filter(|lead| matches(*lead, criteria))
        .collect();

    log::debug!("filter_leads: {} of {seen} leads matched", filtered.len());

    filtered
}

#[cfg(test)]
mod tests {
    use lead_engine_lead_models::BusinessType;

    use super::*;

    fn lead(id: &str) -> Lead {
        Lead::new(id, BusinessType::LocalService)
    }

    fn ids(leads: &[&Lead]) -> Vec<String> {
        leads.iter().map(|l| l.id.clone()).collect()
    }

    /// A small but varied lead set used by most tests.
    fn sample() -> Vec<Lead> {
        let mut acme = lead("acme");
        acme.business_name = Some("Acme Plumbing".to_string());
        acme.owner_name = Some("Jane Doe".to_string());
        acme.email = Some("jane@acme.test".to_string());
        acme.phone = Some("555-0100".to_string());
        acme.instagram_handle = Some("@acmeplumbing".to_string());
        acme.niche_name = Some("Plumbing".to_string());
        acme.city = Some("Austin".to_string());
        acme.state_province = Some("TX".to_string());

        let mut bolt = lead("bolt");
        bolt.business_name = Some("Bolt Electric".to_string());
        bolt.phone = Some("N/A".to_string());
        bolt.website = Some("https://bolt.test".to_string());
        bolt.facebook_page = Some("boltelectric".to_string());
        bolt.niche_name = Some("Electrical".to_string());

        let mut cool = lead("cool");
        cool.owner_name = Some("Sam Acmeson".to_string());
        cool.twitter_handle = Some("N/A".to_string());
        cool.niche_name = Some("HVAC".to_string());

        let bare = lead("bare");

        vec![acme, bolt, cool, bare]
    }

    fn run(criteria: &FilterCriteria) -> Vec<String> {
        let leads = sample();
        ids(&filter_leads(&leads, criteria))
    }

    #[test]
    fn default_criteria_pass_everything() {
        assert_eq!(
            run(&FilterCriteria::default()),
            vec!["acme", "bolt", "cool", "bare"]
        );
    }

    #[test]
    fn search_matches_business_or_owner_case_insensitively() {
        let criteria = FilterCriteria {
            search: "ACME".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(run(&criteria), vec!["acme", "cool"]);
    }

    #[test]
    fn blank_search_passes_everything() {
        let criteria = FilterCriteria {
            search: "   ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(run(&criteria).len(), 4);
    }

    #[test]
    fn search_query_is_trimmed() {
        let criteria = FilterCriteria {
            search: "  acme plumbing ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(run(&criteria), vec!["acme"]);
    }

    #[test]
    fn search_ignores_placeholder_names() {
        let mut placeholder = lead("placeholder");
        placeholder.business_name = Some("N/A".to_string());
        let criteria = FilterCriteria {
            search: "n/a".to_string(),
            ..FilterCriteria::default()
        };
        assert!(!matches(&placeholder, &criteria));
    }

    #[test]
    fn zero_min_score_keeps_zero_score_leads() {
        let criteria = FilterCriteria {
            min_score: 0,
            ..FilterCriteria::default()
        };
        assert!(run(&criteria).contains(&"bare".to_string()));
    }

    #[test]
    fn min_score_is_inclusive() {
        // acme: email 18 + phone 17 + instagram 10 + names 15 + location 10 = 70
        let mut criteria = FilterCriteria::default();
        criteria.set_min_score(70);
        assert_eq!(run(&criteria), vec!["acme"]);

        criteria.set_min_score(80);
        assert!(run(&criteria).is_empty());
    }

    #[test]
    fn out_of_range_min_score_still_admits_perfect_leads() {
        let mut perfect = lead("perfect");
        for field in LeadField::all() {
            let value = Some(format!("{field}"));
            match field {
                LeadField::BusinessName => perfect.business_name = value,
                LeadField::OwnerName => perfect.owner_name = value,
                LeadField::Phone => perfect.phone = value,
                LeadField::Email => perfect.email = value,
                LeadField::Website => perfect.website = value,
                LeadField::City => perfect.city = value,
                LeadField::StateProvince => perfect.state_province = value,
                LeadField::NicheName => perfect.niche_name = value,
                LeadField::InstagramHandle => perfect.instagram_handle = value,
                LeadField::FacebookPage => perfect.facebook_page = value,
                LeadField::LinkedinProfile => perfect.linkedin_profile = value,
                LeadField::TwitterHandle => perfect.twitter_handle = value,
            }
        }
        assert_eq!(perfect.score_total(), 100);

        let criteria = FilterCriteria {
            min_score: 250,
            ..FilterCriteria::default()
        };
        assert!(matches(&perfect, &criteria));
    }

    #[test]
    fn contact_toggles_use_presence_rule() {
        let criteria = FilterCriteria {
            has_phone: true,
            ..FilterCriteria::default()
        };
        // bolt's phone is the N/A placeholder
        assert_eq!(run(&criteria), vec!["acme"]);
    }

    #[test]
    fn contact_toggles_combine_with_and() {
        let criteria = FilterCriteria {
            has_email: true,
            has_website: true,
            ..FilterCriteria::default()
        };
        assert!(run(&criteria).is_empty());
    }

    #[test]
    fn platform_toggles_combine_with_or() {
        let mut criteria = FilterCriteria::default();
        criteria.socials.instagram = true;
        criteria.socials.facebook = true;
        assert_eq!(run(&criteria), vec!["acme", "bolt"]);
    }

    #[test]
    fn platform_toggles_override_generic_social_toggle() {
        let mut criteria = FilterCriteria {
            has_socials: true,
            ..FilterCriteria::default()
        };
        criteria.socials.facebook = true;
        assert_eq!(run(&criteria), vec!["bolt"]);
    }

    #[test]
    fn generic_social_toggle_requires_any_platform() {
        let criteria = FilterCriteria {
            has_socials: true,
            ..FilterCriteria::default()
        };
        // cool only has an N/A twitter handle
        assert_eq!(run(&criteria), vec!["acme", "bolt"]);
    }

    #[test]
    fn niche_filter_is_exact_membership() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_niche("HVAC");
        criteria.toggle_niche("Plumbing");
        assert_eq!(run(&criteria), vec!["acme", "cool"]);

        let mut lowercase = FilterCriteria::default();
        lowercase.toggle_niche("hvac");
        assert!(run(&lowercase).is_empty());
    }

    #[test]
    fn leads_without_niche_fail_active_niche_filter() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_niche("Electrical");
        assert!(!run(&criteria).contains(&"bare".to_string()));
    }

    #[test]
    fn filtering_is_idempotent() {
        let leads = sample();
        let mut criteria = FilterCriteria {
            has_socials: true,
            search: "e".to_string(),
            ..FilterCriteria::default()
        };
        criteria.set_min_score(20);

        let once = filter_leads(&leads, &criteria);
        let twice = filter_leads(once.iter().copied(), &criteria);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn combining_criteria_never_widens_results() {
        let leads = sample();
        let base = FilterCriteria {
            has_socials: true,
            ..FilterCriteria::default()
        };
        let combined = FilterCriteria {
            has_email: true,
            ..base.clone()
        };

        let base_result = filter_leads(&leads, &base);
        let combined_result = filter_leads(&leads, &combined);
        assert!(combined_result.len() <= base_result.len());
        assert!(combined_result.iter().all(|l| base_result.contains(l)));
    }
}
