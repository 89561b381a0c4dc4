//! Quota policy loaded from TOML.
//!
//! The defaults ship embedded from `config/quota.toml`; deployments can
//! point [`QuotaPolicy::load`] at an override file with the same keys.

use std::path::Path;

use serde::Deserialize;

use crate::PolicyError;

/// Quota policy TOML embedded at compile time.
const EMBEDDED_POLICY: &str = include_str!("../config/quota.toml");

/// Limits applied when evaluating a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaPolicy {
    /// Generation runs allowed per weekly window.
    pub weekly_limit: u32,
    /// Maximum niches selectable per request.
    pub max_niches_per_request: u32,
    /// Leads requested per run, divided evenly across niches.
    pub leads_per_request: u32,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            weekly_limit: 1,
            max_niches_per_request: 5,
            leads_per_request: 25,
        }
    }
}

impl QuotaPolicy {
    /// Parses and validates a policy from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the TOML is malformed or the values are
    /// inconsistent.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, PolicyError> {
        let policy: Self = toml::de::from_str(toml_str)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Loads the policy from `path`, or the embedded defaults if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the file cannot be read or is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, PolicyError> {
        let Some(path) = path else {
            return Self::from_toml_str(EMBEDDED_POLICY);
        };

        log::debug!("Loading quota policy from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.max_niches_per_request == 0 {
            return Err(PolicyError::Invalid {
                message: "max_niches_per_request must be at least 1".to_string(),
            });
        }
        if self.leads_per_request < self.max_niches_per_request {
            return Err(PolicyError::Invalid {
                message: format!(
                    "leads_per_request ({}) must be at least max_niches_per_request ({})",
                    self.leads_per_request, self.max_niches_per_request
                ),
            });
        }
        Ok(())
    }
}
