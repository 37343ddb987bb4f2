use super::{Branch, CorrectionPipeline};
use crate::domain::{DomainError, DomainPolicy};
use crate::modules::transition::NuclearParameters;
use serde::Serialize;

/// Electron and mirrored neutrino decay rate at one energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayRate {
    pub rate: f64,
    pub neutrino_rate: f64,
}

/// Per-energy decay rate of one transition.
#[derive(Debug, Clone)]
pub struct DecayRateEvaluator {
    pipeline: CorrectionPipeline,
    policy: DomainPolicy,
}

impl DecayRateEvaluator {
    pub fn new(pipeline: CorrectionPipeline, policy: DomainPolicy) -> Self {
        Self { pipeline, policy }
    }

    pub fn pipeline(&self) -> &CorrectionPipeline {
        &self.pipeline
    }

    pub fn parameters(&self) -> &NuclearParameters {
        self.pipeline.parameters()
    }

    pub fn policy(&self) -> DomainPolicy {
        self.policy
    }

    /// Applies the enabled corrections to the electron at `w` and to the
    /// neutrino at `W0 - w + 1`.
    ///
    /// No energy is rejected here. Products that end up negative or NaN are
    /// floored to zero once, after the whole chain.
    pub fn evaluate(&self, w: f64) -> DecayRate {
        let wv = self.parameters().w0() - w + 1.0;
        let mut rate = 1.0;
        let mut neutrino_rate = 1.0;

        for &correction in self.pipeline.enabled() {
            rate *= self.pipeline.factor(correction, w, Branch::Electron);
            neutrino_rate *= self.pipeline.factor(correction, wv, Branch::Neutrino);
        }

        DecayRate {
            rate: floor_at_zero(rate),
            neutrino_rate: floor_at_zero(neutrino_rate),
        }
    }

    /// Evaluates `w` under the configured [`DomainPolicy`].
    ///
    /// Returns the energy actually evaluated with its rate, `None` for a
    /// skipped point, or [`DomainError::OutOfRange`] when rejecting.
    pub fn evaluate_in_domain(&self, w: f64) -> Result<Option<(f64, DecayRate)>, DomainError> {
        let w0 = self.parameters().w0();
        let inside = (1.0..=w0).contains(&w);
        match self.policy {
            DomainPolicy::Evaluate => Ok(Some((w, self.evaluate(w)))),
            _ if inside => Ok(Some((w, self.evaluate(w)))),
            DomainPolicy::Clamp => {
                let clamped = if w.is_nan() { 1.0 } else { w.clamp(1.0, w0) };
                Ok(Some((clamped, self.evaluate(clamped))))
            }
            DomainPolicy::Skip => {
                tracing::debug!(w, w0, "skipping energy outside the spectrum");
                Ok(None)
            }
            DomainPolicy::Reject => Err(DomainError::OutOfRange { w, w0 }),
        }
    }
}

/// `max(0, x)`, mapping NaN to 0.
fn floor_at_zero(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}
