//! Filter then sort in one pass, scoring each lead once.

use lead_engine_filter_models::{FilterCriteria, SortConfig};
use lead_engine_lead_models::Lead;

use crate::{ScoredLead, pipeline, sort};

/// The lead list as displayed: filtered, ranked and paired with scores.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadView<'a> {
    pub leads: Vec<ScoredLead<'a>>,
    /// Number of leads before filtering.
    pub total_count: usize,
}

impl<'a> LeadView<'a> {
    /// Scores every lead, drops those failing `criteria`, and orders the rest
    /// by `sort`.
    #[must_use]
    pub fn build(leads: &'a [Lead], criteria: &FilterCriteria, sort: SortConfig) -> Self {
        let mut scored: Vec<ScoredLead<'a>> = leads
            .iter()
            .map(ScoredLead::new)
            .filter(|item| pipeline::matches(item, criteria))
            .collect();

        sort::sort_leads(&mut scored, sort);

        log::debug!(
            "LeadView::build: showing {} of {} leads",
            scored.len(),
            leads.len()
        );

        Self {
            leads: scored,
            total_count: leads.len(),
        }
    }

    /// Number of leads hidden by the filters.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.total_count - self.leads.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.leads.iter().map(|item| item.lead.id.as_str())
    }
}
