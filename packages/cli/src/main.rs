#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the lead engine.
//!
//! Reads lead records from a JSON array file and prints JSON results:
//!
//! * `score` recomputes every lead's score and flags stale cached values
//! * `view` filters and sorts the leads the way the dashboard list does
//! * `quota` checks whether a generation run would be allowed right now

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use lead_engine_filter::LeadView;
use lead_engine_filter_models::{FilterCriteria, FilterPanel, SortConfig, SortDirection, SortKey};
use lead_engine_lead_models::social::{SocialPlatform, social_link};
use lead_engine_lead_models::{Lead, dedupe_by_id};
use lead_engine_scoring_models::ScoreBreakdown;
use lead_engine_usage::{PolicyError, QuotaPolicy};
use lead_engine_usage_models::{GenerationDecision, NicheCooldown, UsageWindow};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Output(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "lead_engine", about = "Lead scoring, filtering and quota tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute scores and report leads whose cached score is stale
    Score {
        /// JSON file containing an array of leads
        leads: PathBuf,

        /// Print the full per-category breakdown for each lead
        #[arg(long)]
        breakdown: bool,

        /// Only report leads whose cached score is missing or wrong
        #[arg(long)]
        stale_only: bool,
    },
    /// Filter and rank leads
    View {
        /// JSON file containing an array of leads
        leads: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort key (`score` or `created_at`)
        #[arg(long, default_value_t = SortKey::Score)]
        sort: SortKey,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Check whether a generation run would be allowed now
    Quota {
        /// Runs already used in the current window
        #[arg(long, default_value_t = 0)]
        used: u32,

        /// Runs allowed per window (defaults to the policy's weekly limit)
        #[arg(long)]
        limit: Option<u32>,

        /// Number of niches selected for the run
        #[arg(long)]
        niches: usize,

        /// Quota policy TOML overriding the built-in defaults
        #[arg(long)]
        policy: Option<PathBuf>,

        /// JSON file containing an array of niche cooldown records
        #[arg(long)]
        cooldowns: Option<PathBuf>,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive search over business and owner names
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    has_phone: bool,

    #[arg(long)]
    has_email: bool,

    #[arg(long)]
    has_website: bool,

    /// Require at least one social handle
    #[arg(long)]
    has_socials: bool,

    /// Require a handle on this platform (repeatable, any match passes)
    #[arg(long = "social", value_name = "PLATFORM")]
    socials: Vec<SocialPlatform>,

    /// Only show leads in this niche (repeatable)
    #[arg(long = "niche", value_name = "NAME")]
    niches: Vec<String>,

    /// Minimum score, snapped down to a multiple of 10
    #[arg(long, default_value_t = 0)]
    min_score: u8,
}

impl FilterArgs {
    /// Builds active criteria the way the filter panel does: edit a draft,
    /// commit it, then apply the live search text.
    fn into_criteria(self) -> FilterCriteria {
        let mut panel = FilterPanel::default();
        panel.begin_edit();
        panel.edit(|draft| {
            draft.has_phone = self.has_phone;
            draft.has_email = self.has_email;
            draft.has_website = self.has_website;
            draft.has_socials = self.has_socials;
            for platform in &self.socials {
                draft.socials.set(*platform, true);
            }
            for niche in &self.niches {
                if !draft.niches.contains(niche) {
                    draft.toggle_niche(niche);
                }
            }
            draft.set_min_score(self.min_score);
        });
        panel.commit();

        if let Some(search) = &self.search {
            panel.set_search(search);
        }

        panel.active().clone()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BreakdownRow<'a> {
    id: &'a str,
    cached_score: Option<u32>,
    breakdown: ScoreBreakdown,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewRow<'a> {
    id: &'a str,
    business_name: Option<&'a str>,
    niche_name: Option<&'a str>,
    score: u8,
    created_at: Option<&'a str>,
    links: BTreeMap<SocialPlatform, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewReport<'a> {
    shown: usize,
    total: usize,
    active_filters: usize,
    sort: SortConfig,
    leads: Vec<ViewRow<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuotaReport<'a> {
    #[serde(flatten)]
    decision: GenerationDecision,
    active_cooldowns: Vec<&'a NicheCooldown>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Score {
            leads,
            breakdown,
            stale_only,
        } => run_score(&leads, breakdown, stale_only)?,
        Commands::View {
            leads,
            filters,
            sort,
            asc,
        } => {
            let direction = if asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            run_view(&leads, &filters.into_criteria(), SortConfig::new(sort, direction))?
        }
        Commands::Quota {
            used,
            limit,
            niches,
            policy,
            cooldowns,
        } => run_quota(used, limit, niches, policy.as_deref(), cooldowns.as_deref())?,
    };

    println!("{output}");
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Loads leads and drops repeated ids, keeping the first occurrence.
fn load_leads(path: &Path) -> Result<Vec<Lead>, CliError> {
    let leads: Vec<Lead> = read_json(path)?;
    let count = leads.len();
    let leads = dedupe_by_id(leads);
    if leads.len() < count {
        log::warn!(
            "Dropped {} duplicate lead(s) from {}",
            count - leads.len(),
            path.display()
        );
    }
    log::info!("Loaded {} leads from {}", leads.len(), path.display());
    Ok(leads)
}

fn run_score(path: &Path, breakdown: bool, stale_only: bool) -> Result<String, CliError> {
    let leads = load_leads(path)?;
    let rescored = lead_engine_scoring::rescore_all(&leads);

    let stale = rescored.iter().filter(|r| r.stale).count();
    log::info!("{stale} of {} cached scores are stale", rescored.len());

    if breakdown {
        let rows: Vec<BreakdownRow<'_>> = leads
            .iter()
            .zip(&rescored)
            .filter(|(_, r)| !stale_only || r.stale)
            .map(|(lead, _)| BreakdownRow {
                id: &lead.id,
                cached_score: lead.lead_score,
                breakdown: lead_engine_scoring::score(lead),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let rows: Vec<_> = rescored
        .into_iter()
        .filter(|r| !stale_only || r.stale)
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn run_view(path: &Path, criteria: &FilterCriteria, sort: SortConfig) -> Result<String, CliError> {
    let leads = load_leads(path)?;
    let view = LeadView::build(&leads, criteria, sort);

    let rows = view
        .leads
        .iter()
        .map(|item| {
            let lead = item.lead;
            ViewRow {
                id: &lead.id,
                business_name: lead.business_name.as_deref(),
                niche_name: lead.niche_name.as_deref(),
                score: item.score.total,
                created_at: lead.created_at.as_deref(),
                links: SocialPlatform::all()
                    .iter()
                    .filter_map(|&platform| {
                        social_link(platform, lead).map(|link| (platform, link))
                    })
                    .collect(),
            }
        })
        .collect();

    let report = ViewReport {
        shown: view.leads.len(),
        total: view.total_count,
        active_filters: criteria.active_filter_count(),
        sort,
        leads: rows,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn run_quota(
    used: u32,
    limit: Option<u32>,
    niches: usize,
    policy_path: Option<&Path>,
    cooldowns_path: Option<&Path>,
) -> Result<String, CliError> {
    let policy = QuotaPolicy::load(policy_path)?;

    let mut window = UsageWindow::new(used, limit.unwrap_or(policy.weekly_limit));
    if let Some(path) = cooldowns_path {
        window.cooldowns = read_json(path)?;
    }

    let now = chrono::Local::now();
    let decision = policy.evaluate(&window, &now, niches);

    let report = QuotaReport {
        decision,
        active_cooldowns: window.active_cooldowns(now.to_utc()).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
