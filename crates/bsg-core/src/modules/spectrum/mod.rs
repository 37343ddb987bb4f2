//! Grid evaluation of the decay rate and everything derived from the grid.

pub mod analytics;
pub mod report;
pub mod serialization;
pub mod sinks;

pub use analytics::{AnalyticsError, SpectrumAnalytics};
pub use report::{ReportContext, RunSummary, render_text_report};
pub use sinks::{BufferedRawSink, CollectingSink, DiscardSink, RawSample, RawSampleSink};

use crate::common::config::{ConfigError, SpectrumConfig};
use crate::common::constants::{ELECTRON_MASS_KEV, kev_to_total_energy, total_energy_to_kev};
use crate::domain::{BsgError, BsgResult, DomainError};
use crate::modules::corrections::DecayRateEvaluator;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumSample {
    pub w: f64,
    pub rate: f64,
    pub neutrino_rate: f64,
}

impl SpectrumSample {
    pub fn energy_kev(&self) -> f64 {
        total_energy_to_kev(self.w)
    }

    fn raw(&self) -> RawSample {
        RawSample {
            w: self.w,
            energy_kev: self.energy_kev(),
            rate: self.rate,
            neutrino_rate: self.neutrino_rate,
        }
    }
}

/// Samples in ascending `W`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Spectrum {
    samples: Vec<SpectrumSample>,
}

impl Spectrum {
    pub fn new(samples: Vec<SpectrumSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[SpectrumSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpectrumSample> {
        self.samples.iter()
    }

    pub fn analytics(&self) -> SpectrumAnalytics<'_> {
        SpectrumAnalytics::new(self)
    }
}

/// Spacing of the energy grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridStep {
    /// Fixed step in keV.
    Fixed(f64),
    /// Number of steps between begin and end.
    Count(u32),
}

impl GridStep {
    /// A configured step count wins over the step size.
    pub fn from_config(config: &SpectrumConfig) -> Self {
        match config.steps {
            Some(count) => Self::Count(count),
            None => Self::Fixed(config.step_size),
        }
    }

    /// Step in units of the electron mass.
    pub fn step_w(self, begin_w: f64, end_w: f64) -> BsgResult<f64> {
        match self {
            Self::Fixed(step_kev) => Ok(step_kev / ELECTRON_MASS_KEV),
            Self::Count(0) => Err(ConfigError::InvalidValue {
                key: "spectrum.steps",
                reason: "step count must be at least 1".to_string(),
            }
            .into()),
            Self::Count(count) => Ok((end_w - begin_w) / f64::from(count)),
        }
    }
}

/// Evaluates a [`DecayRateEvaluator`] on an energy grid.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumBuilder<'a> {
    evaluator: &'a DecayRateEvaluator,
}

impl<'a> SpectrumBuilder<'a> {
    pub fn new(evaluator: &'a DecayRateEvaluator) -> Self {
        Self { evaluator }
    }

    /// Builds the grid described by the `[spectrum]` table.
    pub fn build_from_config(
        &self,
        config: &SpectrumConfig,
        sink: &mut dyn RawSampleSink,
    ) -> BsgResult<Spectrum> {
        self.build(config.begin, config.end, GridStep::from_config(config), sink)
    }

    /// Evaluates every `W` from `begin_kev` up to and including `end_kev`.
    ///
    /// An `end_kev` of zero runs to the endpoint. The step is validated
    /// before the first evaluation, so a degenerate grid fails instead of
    /// looping. Each sample is forwarded to `sink`, which is finished once
    /// at the end.
    pub fn build(
        &self,
        begin_kev: f64,
        end_kev: f64,
        step: GridStep,
        sink: &mut dyn RawSampleSink,
    ) -> BsgResult<Spectrum> {
        let begin_w = kev_to_total_energy(begin_kev);
        let end_w = if end_kev == 0.0 {
            self.evaluator.parameters().w0()
        } else {
            kev_to_total_energy(end_kev)
        };
        let step_w = step.step_w(begin_w, end_w)?;
        check_step(step_w, begin_w.max(end_w))?;

        tracing::debug!(begin_w, end_w, step_w, "building spectrum");

        let mut samples: Vec<SpectrumSample> = Vec::new();
        let mut current_w = begin_w;
        while current_w <= end_w {
            if let Some((w, rate)) = self.evaluator.evaluate_in_domain(current_w)? {
                let duplicate = samples.last().is_some_and(|last| last.w >= w);
                if !duplicate {
                    let sample = SpectrumSample {
                        w,
                        rate: rate.rate,
                        neutrino_rate: rate.neutrino_rate,
                    };
                    sink.emit(&sample.raw()).map_err(raw_output_error)?;
                    samples.push(sample);
                }
            }
            current_w += step_w;
        }
        sink.finish().map_err(raw_output_error)?;

        tracing::debug!(samples = samples.len(), "spectrum built");
        Ok(Spectrum::new(samples))
    }
}

/// Rejects steps that are non-positive, non-finite or too small to move
/// `largest_w` forward.
fn check_step(step_w: f64, largest_w: f64) -> Result<(), DomainError> {
    let advances = step_w > 0.0 && step_w.is_finite() && largest_w + step_w != largest_w;
    if advances {
        Ok(())
    } else {
        Err(DomainError::NonPositiveStep { step_w })
    }
}

fn raw_output_error(error: std::io::Error) -> BsgError {
    BsgError::resource(
        "SPECTRUM.RAW_OUTPUT",
        format!("failed to write raw spectrum sample: {error}"),
    )
}
