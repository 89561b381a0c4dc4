#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Usage window, cooldown and generation decision types.
//!
//! The weekly `used`/`limit` counter is the binding constraint on lead
//! generation. Per-niche cooldowns are tracked for display only.

use chrono::{DateTime, FixedOffset, Utc};
use lead_engine_lead_models::{BusinessType, Lead};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Why a generation request was refused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RejectionReason {
    /// No niche was selected.
    NoNichesSelected,
    /// More niches were selected than a single request allows.
    TooManyNiches,
    /// Nothing left in the current weekly window.
    QuotaExhausted,
}

/// A per-niche cooldown record as supplied by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicheCooldown {
    pub niche_id: String,
    pub last_used_at: DateTime<Utc>,
    pub cooldown_until: DateTime<Utc>,
}

impl NicheCooldown {
    /// Returns `true` while `now` is before `cooldown_until`.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.cooldown_until
    }
}

/// Usage counters as returned by the generation backend after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub used: u32,
    pub limit: u32,
    #[serde(default)]
    pub total_leads_today: u32,
}

/// Quota accounting state for one user.
///
/// `remaining` is not stored; it is derived from `used` and `limit` every
/// time it is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageWindow {
    /// Generation runs used in the current window.
    pub used: u32,
    /// Generation runs allowed per window.
    pub limit: u32,
    #[serde(default)]
    pub total_leads_today: u32,
    #[serde(default)]
    pub cooldowns: Vec<NicheCooldown>,
}

impl UsageWindow {
    #[must_use]
    pub const fn new(used: u32, limit: u32) -> Self {
        Self {
            used,
            limit,
            total_leads_today: 0,
            cooldowns: Vec::new(),
        }
    }

    /// `max(0, limit - used)`.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    /// Replaces the counters with a fresh snapshot from the backend.
    /// Cooldowns are left as they are.
    pub const fn apply_snapshot(&mut self, snapshot: UsageSnapshot) {
        self.used = snapshot.used;
        self.limit = snapshot.limit;
        self.total_leads_today = snapshot.total_leads_today;
    }

    /// Cooldowns still running at `now`.
    pub fn active_cooldowns(&self, now: DateTime<Utc>) -> impl Iterator<Item = &NicheCooldown> {
        self.cooldowns.iter().filter(move |c| c.is_active(now))
    }

    /// The cooldown record for a niche, if any.
    #[must_use]
    pub fn cooldown_for(&self, niche_id: &str) -> Option<&NicheCooldown> {
        self.cooldowns.iter().find(|c| c.niche_id == niche_id)
    }
}

/// How an allowed request's leads are split across niches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    pub niche_count: u32,
    /// `floor(leads_per_request / niche_count)`.
    pub leads_per_niche: u32,
    /// `leads_per_niche * niche_count`. May be less than the per-request
    /// total, the remainder is dropped.
    pub total_leads: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Allowed { plan: GenerationPlan },
    Rejected { reason: RejectionReason },
}

/// Outcome of evaluating a generation request against a usage window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationDecision {
    pub verdict: Verdict,
    /// Quota left in the window, derived at evaluation time.
    pub remaining: u32,
    /// Start of the next window, in the caller's local offset.
    pub reset_at: DateTime<FixedOffset>,
}

impl GenerationDecision {
    #[must_use]
    pub const fn allowed(&self) -> bool {
        matches!(self.verdict, Verdict::Allowed { .. })
    }

    #[must_use]
    pub const fn reason(&self) -> Option<RejectionReason> {
        match self.verdict {
            Verdict::Allowed { .. } => None,
            Verdict::Rejected { reason } => Some(reason),
        }
    }

    #[must_use]
    pub const fn plan(&self) -> Option<GenerationPlan> {
        match self.verdict {
            Verdict::Allowed { plan } => Some(plan),
            Verdict::Rejected { .. } => None,
        }
    }
}

/// Parameters sent to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub niches: Vec<String>,
    pub location: Option<String>,
    pub business_type: BusinessType,
}

/// What the generation backend returns on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub leads: Vec<Lead>,
    pub usage: UsageSnapshot,
}
