#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter and sort pipeline over scored leads.
//!
//! The pipeline is recomputed in full whenever the lead collection, the
//! criteria or the sort config change. Working sets are small (a few
//! hundred leads), so there is no incremental update path.
//!
//! * [`pipeline`]: AND-combined filter stages
//! * [`sort`]: score / creation-time ordering
//! * [`view`]: filter then sort in one pass, scoring each lead once

pub mod pipeline;
pub mod sort;
pub mod view;

use lead_engine_lead_models::Lead;
use lead_engine_scoring_models::ScoreBreakdown;

pub use pipeline::{filter_leads, matches};
pub use sort::sort_leads;
pub use view::LeadView;

/// Something the pipeline can filter and rank: a lead plus a way to get its
/// score total.
///
/// Plain leads compute the score on demand; [`ScoredLead`] carries it.
pub trait Rankable {
    /// The underlying lead record.
    fn lead(&self) -> &Lead;

    /// The lead's current score total.
    fn score_total(&self) -> u8 {
        lead_engine_scoring::total(self.lead())
    }
}

impl Rankable for Lead {
    fn lead(&self) -> &Lead {
        self
    }
}

impl<T: Rankable + ?Sized> Rankable for &T {
    fn lead(&self) -> &Lead {
        (**self).lead()
    }

    fn score_total(&self) -> u8 {
        (**self).score_total()
    }
}

/// A lead paired with its freshly computed score breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLead<'a> {
    pub lead: &'a Lead,
    pub score: ScoreBreakdown,
}

impl<'a> ScoredLead<'a> {
    #[must_use]
    pub fn new(lead: &'a Lead) -> Self {
        Self {
            lead,
            score: lead_engine_scoring::score(lead),
        }
    }
}

impl Rankable for ScoredLead<'_> {
    fn lead(&self) -> &Lead {
        self.lead
    }

    fn score_total(&self) -> u8 {
        self.score.total
    }
}
