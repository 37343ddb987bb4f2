//! Integrals over a built spectrum.

use super::{Spectrum, SpectrumSample};
use crate::common::constants::total_energy_to_kev;
use crate::domain::BsgError;
use crate::numerics::{IntegrationError, simpson_samples};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyticsError {
    #[error("spectrum has {samples} samples; integration needs at least 3")]
    EmptySpectrum { samples: usize },
    #[error("{quantity} is not finite ({value})")]
    NonFiniteIntegral { quantity: &'static str, value: f64 },
    #[error("spectrum energies are not strictly increasing at sample {index}")]
    UnorderedGrid { index: usize },
}

impl From<AnalyticsError> for BsgError {
    fn from(error: AnalyticsError) -> Self {
        let placeholder = match error {
            AnalyticsError::EmptySpectrum { .. } => "ANALYTICS.EMPTY_SPECTRUM",
            AnalyticsError::NonFiniteIntegral { .. } => "ANALYTICS.NON_FINITE",
            AnalyticsError::UnorderedGrid { .. } => "ANALYTICS.UNORDERED_GRID",
        };
        Self::domain(placeholder, error.to_string())
    }
}

/// Simpson integral over `W` of `selector` applied to every sample.
pub fn integrate<F>(samples: &[SpectrumSample], selector: F) -> Result<f64, AnalyticsError>
where
    F: Fn(&SpectrumSample) -> f64,
{
    let x = samples.iter().map(|sample| sample.w).collect::<Vec<_>>();
    let y = samples.iter().map(selector).collect::<Vec<_>>();
    simpson_samples(&x, &y).map_err(|error| match error {
        IntegrationError::NonIncreasingAbscissa { index, .. } => {
            AnalyticsError::UnorderedGrid { index }
        }
        IntegrationError::InsufficientPoints { .. } | IntegrationError::LengthMismatch { .. } => {
            AnalyticsError::EmptySpectrum {
                samples: samples.len(),
            }
        }
    })
}

/// Derived observables of one spectrum.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumAnalytics<'a> {
    spectrum: &'a Spectrum,
}

impl<'a> SpectrumAnalytics<'a> {
    pub fn new(spectrum: &'a Spectrum) -> Self {
        Self { spectrum }
    }

    pub fn integrate<F>(&self, selector: F) -> Result<f64, AnalyticsError>
    where
        F: Fn(&SpectrumSample) -> f64,
    {
        integrate(self.spectrum.samples(), selector)
    }

    /// `f`, the integral of the electron rate.
    pub fn phase_space_integral(&self) -> Result<f64, AnalyticsError> {
        let f = self.integrate(|sample| sample.rate)?;
        finite("phase-space integral", f)
    }

    /// `log10(f·t)`. A half-life of 1 s gives `log f`.
    pub fn log_ft(&self, partial_halflife: f64) -> Result<f64, AnalyticsError> {
        let f = self.phase_space_integral()?;
        tracing::debug!(f, partial_halflife, "computing log ft");
        Ok((f * partial_halflife).log10())
    }

    /// Ratio of the computed to an external ft value.
    pub fn ft_ratio(&self, partial_halflife: f64, external_log_ft: f64) -> Result<f64, AnalyticsError> {
        Ok(10.0_f64.powf(self.log_ft(partial_halflife)? - external_log_ft))
    }

    /// Mean kinetic energy of the electron in keV.
    pub fn mean_energy(&self) -> Result<f64, AnalyticsError> {
        let weighted = self.integrate(|sample| sample.w * sample.rate)?;
        let f = self.phase_space_integral()?;
        tracing::debug!(weighted, f, "computing mean energy");
        finite("mean energy", total_energy_to_kev(weighted / f))
    }
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, AnalyticsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::NonFiniteIntegral { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyticsError, integrate};
    use crate::common::constants::ELECTRON_MASS_KEV;
    use crate::domain::BsgError;
    use crate::modules::spectrum::{Spectrum, SpectrumSample};

    fn assert_scalar_close(label: &str, expected: f64, actual: f64, tolerance: f64) {
        assert!(
            (expected - actual).abs() <= tolerance,
            "{label}: expected {expected}, got {actual}"
        );
    }

    fn spectrum<F>(begin: f64, end: f64, points: usize, rate: F) -> Spectrum
    where
        F: Fn(f64) -> f64,
    {
        let step = (end - begin) / (points - 1) as f64;
        Spectrum::new(
            (0..points)
                .map(|index| {
                    let w = begin + step * index as f64;
                    SpectrumSample {
                        w,
                        rate: rate(w),
                        neutrino_rate: 0.0,
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn constant_rate_integrates_to_width_times_value() {
        for points in [3, 4, 11, 40] {
            let spectrum = spectrum(1.0, 3.5, points, |_| 2.0);
            let f = spectrum.analytics().phase_space_integral().expect("integral");
            assert_scalar_close("constant", 5.0, f, 1.0e-12);
        }
    }

    #[test]
    fn quadratic_rate_is_integrated_exactly() {
        let spectrum = spectrum(1.0, 2.0, 8, |w| w * w);
        let f = spectrum.analytics().integrate(|sample| sample.rate).expect("integral");
        assert_scalar_close("quadratic", 7.0 / 3.0, f, 1.0e-12);
    }

    #[test]
    fn log_ft_with_unit_halflife_is_log_of_integral() {
        let spectrum = spectrum(1.0, 2.5, 31, |w| (w - 1.0) * (2.5 - w));
        let analytics = spectrum.analytics();
        let f = integrate(spectrum.samples(), |sample| sample.rate).expect("integral");
        assert_eq!(analytics.log_ft(1.0).expect("log f"), f.log10());

        let log_ft = analytics.log_ft(250.0).expect("log ft");
        assert_scalar_close("log ft", (f * 250.0).log10(), log_ft, 1.0e-12);
        let ratio = analytics.ft_ratio(250.0, log_ft).expect("ratio");
        assert_scalar_close("ratio", 1.0, ratio, 1.0e-12);
    }

    #[test]
    fn mean_energy_of_symmetric_rate_is_midpoint() {
        let spectrum = spectrum(1.0, 3.0, 41, |w| (w - 1.0) * (3.0 - w));
        let mean = spectrum.analytics().mean_energy().expect("mean energy");
        assert_scalar_close("mean", ELECTRON_MASS_KEV, mean, 1.0e-9);
    }

    #[test]
    fn short_or_degenerate_spectra_are_rejected() {
        let short = spectrum(1.0, 2.0, 2, |_| 1.0);
        let error = short.analytics().log_ft(1.0).expect_err("two samples");
        assert_eq!(error, AnalyticsError::EmptySpectrum { samples: 2 });
        assert_eq!(BsgError::from(error).placeholder(), "ANALYTICS.EMPTY_SPECTRUM");

        let zero = spectrum(1.0, 2.0, 5, |_| 0.0);
        let error = zero.analytics().mean_energy().expect_err("zero rate");
        assert!(matches!(
            error,
            AnalyticsError::NonFiniteIntegral {
                quantity: "mean energy",
                ..
            }
        ));

        let unordered = Spectrum::new(vec![
            SpectrumSample { w: 1.0, rate: 1.0, neutrino_rate: 0.0 },
            SpectrumSample { w: 1.5, rate: 1.0, neutrino_rate: 0.0 },
            SpectrumSample { w: 1.5, rate: 1.0, neutrino_rate: 0.0 },
        ]);
        assert_eq!(
            unordered.analytics().phase_space_integral(),
            Err(AnalyticsError::UnorderedGrid { index: 2 })
        );
    }
}
