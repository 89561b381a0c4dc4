#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weekly quota accounting for lead generation.
//!
//! [`evaluate_generation_request`] is the precondition check run before a
//! generation backend is ever contacted. It never fails: a refused request
//! comes back as a [`Verdict::Rejected`] carrying a [`RejectionReason`].
//! [`dispatch_generation`] wraps the check and the backend call together.

mod dispatch;
mod policy;
mod reset;

use chrono::{DateTime, TimeZone};
use lead_engine_usage_models::{
    GenerationDecision, GenerationPlan, RejectionReason, UsageWindow, Verdict,
};

pub use dispatch::{DispatchError, GenerationBackend, dispatch_generation};
pub use policy::QuotaPolicy;
pub use reset::{days_until_monday, next_reset};

/// Errors from loading a [`QuotaPolicy`].
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The policy file could not be read.
    #[error("Failed to read policy file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The policy TOML did not parse.
    #[error("Failed to parse quota policy: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but are inconsistent.
    #[error("Invalid quota policy: {message}")]
    Invalid { message: String },
}

impl QuotaPolicy {
    /// Splits `leads_per_request` evenly across `niche_count` niches.
    ///
    /// The remainder is dropped: 25 leads over 3 niches plans 8 each, 24 in
    /// total. Returns `None` for zero niches.
    #[must_use]
    pub const fn plan(&self, niche_count: u32) -> Option<GenerationPlan> {
        if niche_count == 0 {
            return None;
        }
        let leads_per_niche = self.leads_per_request / niche_count;
        Some(GenerationPlan {
            niche_count,
            leads_per_niche,
            total_leads: leads_per_niche * niche_count,
        })
    }

    /// A fresh window with nothing used and this policy's weekly limit.
    #[must_use]
    pub const fn fresh_window(&self) -> UsageWindow {
        UsageWindow::new(0, self.weekly_limit)
    }

    /// Decides whether `niche_count` niches may be generated now.
    ///
    /// Checks run in a fixed order and the first failure wins: no niches,
    /// then too many niches, then an exhausted window. `remaining` is
    /// re-derived from the window's counters on every call.
    #[must_use]
    pub fn evaluate<Tz: TimeZone>(
        &self,
        window: &UsageWindow,
        now: &DateTime<Tz>,
        niche_count: usize,
    ) -> GenerationDecision {
        let remaining = window.remaining();
        let reset_at = next_reset(now).fixed_offset();

        let verdict = match self.check(remaining, niche_count) {
            Ok(plan) => Verdict::Allowed { plan },
            Err(reason) => Verdict::Rejected { reason },
        };

        match verdict {
            Verdict::Allowed { plan } => log::info!(
                "Generation allowed: {} niches x {} leads ({} total), {remaining} of {} remaining",
                plan.niche_count,
                plan.leads_per_niche,
                plan.total_leads,
                window.limit
            ),
            Verdict::Rejected { reason } => log::info!(
                "Generation rejected ({reason}): {niche_count} niches, {remaining} of {} remaining",
                window.limit
            ),
        }

        GenerationDecision {
            verdict,
            remaining,
            reset_at,
        }
    }

    fn check(&self, remaining: u32, niche_count: usize) -> Result<GenerationPlan, RejectionReason> {
        if niche_count == 0 {
            return Err(RejectionReason::NoNichesSelected);
        }
        let count = u32::try_from(niche_count)
            .ok()
            .filter(|&count| count <= self.max_niches_per_request)
            .ok_or(RejectionReason::TooManyNiches)?;
        if remaining == 0 {
            return Err(RejectionReason::QuotaExhausted);
        }
        self.plan(count).ok_or(RejectionReason::NoNichesSelected)
    }
}

/// Evaluates a request under the default [`QuotaPolicy`]: at most 5 niches,
/// 25 leads per request.
#[must_use]
pub fn evaluate_generation_request<Tz: TimeZone>(
    window: &UsageWindow,
    now: &DateTime<Tz>,
    niche_count: usize,
) -> GenerationDecision {
    QuotaPolicy::default().evaluate(window, now, niche_count)
}
