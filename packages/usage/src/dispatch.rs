//! Gated hand-off to a generation backend.
//!
//! The quota check runs first; the backend is only called when the request
//! is allowed. On success the window takes the backend's usage snapshot.

use chrono::{DateTime, TimeZone};
use lead_engine_usage_models::{
    GenerationPlan, GenerationRequest, GenerationResponse, RejectionReason, UsageWindow, Verdict,
};

use crate::QuotaPolicy;

/// Something that turns an allowed request into new leads.
pub trait GenerationBackend {
    type Error: std::error::Error + 'static;

    /// Generates leads for `request` according to `plan`.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error type on failure.
    fn generate(
        &mut self,
        request: &GenerationRequest,
        plan: &GenerationPlan,
    ) -> Result<GenerationResponse, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E: std::error::Error + 'static> {
    /// The quota check refused the request; the backend was not called.
    #[error("Generation rejected: {0}")]
    Rejected(RejectionReason),

    #[error("Generation backend failed: {0}")]
    Backend(#[source] E),
}

/// Evaluates `request` under `policy` and, if allowed, calls `backend`.
///
/// # Errors
///
/// * [`DispatchError::Rejected`] if the quota check fails
/// * [`DispatchError::Backend`] if the backend call fails
pub fn dispatch_generation<B, Tz>(
    policy: &QuotaPolicy,
    backend: &mut B,
    window: &mut UsageWindow,
    now: &DateTime<Tz>,
    request: &GenerationRequest,
) -> Result<GenerationResponse, DispatchError<B::Error>>
where
    B: GenerationBackend,
    Tz: TimeZone,
{
    let decision = policy.evaluate(window, now, request.niches.len());
    let plan = match decision.verdict {
        Verdict::Allowed { plan } => plan,
        Verdict::Rejected { reason } => {
            log::warn!("Not dispatching generation for {:?}: {reason}", request.niches);
            return Err(DispatchError::Rejected(reason));
        }
    };

    let response = backend.generate(request, &plan).map_err(|e| {
        log::warn!("Generation backend failed: {e}");
        DispatchError::Backend(e)
    })?;

    window.apply_snapshot(response.usage);
    log::info!(
        "Generated {} leads; {} of {} runs remaining",
        response.leads.len(),
        window.remaining(),
        window.limit
    );

    Ok(response)
}
