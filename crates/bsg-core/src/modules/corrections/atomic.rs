//! Atomic-electron effects: screening, exchange and the atomic mismatch.

use super::SpectralCorrection;
use super::fermi::{coulomb_gamma, ln_gamma_modulus_squared, sommerfeld_parameter};
use crate::common::constants::{ALPHA, ELECTRON_MASS_KEV, PI};
use crate::domain::BetaType;
use crate::modules::transition::{ExchangeParameters, NuclearParameters};

/// Thomas-Fermi strength of the screening potential, `V0 = 1.45·α²·Z^(4/3)`.
const SCREENING_STRENGTH: f64 = 1.45;

/// Rose's screening correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomicScreening {
    z: i32,
    beta_type: BetaType,
}

impl AtomicScreening {
    pub fn new(z: i32, beta_type: BetaType) -> Self {
        Self { z, beta_type }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(parameters.z(), parameters.beta_type())
    }
}

impl SpectralCorrection for AtomicScreening {
    fn factor(&self, w: f64) -> f64 {
        screening_correction(w, self.z, self.beta_type)
    }
}

/// Ratio of the Fermi function at the screened energy `W - ±V0` to the
/// unscreened one, with the phase-space Jacobian `W̃p̃/(Wp)`.
///
/// The screening cloud belongs to the parent atom. Energies that would be
/// pushed below threshold are left unscreened.
pub fn screening_correction(w: f64, z: i32, beta_type: BetaType) -> f64 {
    let sign = beta_type.sign_f64();
    let screening_charge = z - beta_type.sign();
    if screening_charge <= 0 {
        return 1.0;
    }

    let v0 = SCREENING_STRENGTH * ALPHA * ALPHA * f64::from(screening_charge).powf(4.0 / 3.0);
    let w_screened = w - sign * v0;
    if w_screened <= 1.0 {
        return 1.0;
    }

    let p = (w * w - 1.0).sqrt();
    let p_screened = (w_screened * w_screened - 1.0).sqrt();
    let alpha_z = ALPHA * f64::from(z);
    let gamma = coulomb_gamma(alpha_z);
    let y = sommerfeld_parameter(w, p, alpha_z, beta_type);
    let y_screened = sommerfeld_parameter(w_screened, p_screened, alpha_z, beta_type);

    let ln_ratio = (w_screened / w).ln()
        + (2.0 * gamma - 1.0) * (p_screened / p).ln()
        + PI * (y_screened - y)
        + ln_gamma_modulus_squared(gamma, y_screened)
        - ln_gamma_modulus_squared(gamma, y);
    ln_ratio.exp()
}

/// Exchange between the β electron and the bound atomic electrons.
///
/// Positrons cannot exchange with the atomic shell, so the factor is 1 for
/// them, as it is for an all-zero parameter row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomicExchange {
    parameters: Option<ExchangeParameters>,
}

impl AtomicExchange {
    pub fn new(parameters: ExchangeParameters, beta_type: BetaType) -> Self {
        let active = beta_type == BetaType::Electron && !parameters.is_zero();
        Self {
            parameters: active.then_some(parameters),
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(*parameters.exchange(), parameters.beta_type())
    }

    pub fn is_active(&self) -> bool {
        self.parameters.is_some()
    }
}

impl SpectralCorrection for AtomicExchange {
    fn factor(&self, w: f64) -> f64 {
        match &self.parameters {
            Some(parameters) => exchange_correction(w, parameters),
            None => 1.0,
        }
    }
}

pub fn exchange_correction(w: f64, parameters: &ExchangeParameters) -> f64 {
    let e = w - 1.0;
    1.0 + parameters.a / e
        + parameters.b / (e * e)
        + parameters.c * (-parameters.d * e).exp()
        + parameters.e
            * ((w - parameters.g).powf(parameters.f) + parameters.h).sin()
            * (-parameters.i * e).exp()
}

/// Energy lost to the rearrangement of the atomic shell, which lowers the
/// effective endpoint. Skipped when an atomic energy deficit is configured,
/// since that already accounts for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomicMismatch {
    w0: f64,
    binding_curvature: f64,
    active: bool,
}

impl AtomicMismatch {
    pub fn new(w0: f64, z: i32, beta_type: BetaType, atomic_energy_deficit: f64) -> Self {
        let mean_charge = f64::from(z) - beta_type.sign_f64() / 2.0;
        Self {
            w0,
            binding_curvature: binding_energy_curvature(mean_charge),
            active: atomic_energy_deficit == 0.0,
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(
            parameters.w0(),
            parameters.z(),
            parameters.beta_type(),
            parameters.atomic_energy_deficit(),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl SpectralCorrection for AtomicMismatch {
    fn factor(&self, w: f64) -> f64 {
        if !self.active {
            return 1.0;
        }
        1.0 - self.binding_curvature / (2.0 * (self.w0 - w))
    }
}

/// `∂²B/∂Z²` of the total electronic binding energy
/// `B(Z) = 14.4381·Z^2.39 + 1.55468e-6·Z^5.35` eV, in units of the electron mass.
pub fn binding_energy_curvature(z: f64) -> f64 {
    let curvature_ev = 14.4381 * 2.39 * 1.39 * z.powf(0.39) + 1.55468e-6 * 5.35 * 4.35 * z.powf(3.35);
    curvature_ev / (ELECTRON_MASS_KEV * 1.0e3)
}

#[cfg(test)]
mod tests {
    use super::{
        AtomicExchange, AtomicMismatch, AtomicScreening, binding_energy_curvature,
        exchange_correction, screening_correction,
    };
    use crate::domain::BetaType;
    use crate::modules::corrections::SpectralCorrection;
    use crate::modules::transition::ExchangeParameters;

    #[test]
    fn screening_reduces_low_energy_electrons() {
        let screening = AtomicScreening::new(50, BetaType::Electron);
        let low = screening.factor(1.05);
        let high = screening.factor(3.0);
        assert!(low < 1.0, "screening at low energy {low}");
        assert!((high - 1.0).abs() < (low - 1.0).abs());
    }

    #[test]
    fn screening_enhances_low_energy_positrons() {
        let value = screening_correction(1.05, 50, BetaType::Positron);
        assert!(value > 1.0);
    }

    #[test]
    fn screening_is_skipped_without_parent_electrons() {
        assert_eq!(screening_correction(1.5, 1, BetaType::Electron), 1.0);
        // Screened energy below threshold.
        assert_eq!(screening_correction(1.000_001, 92, BetaType::Electron), 1.0);
    }

    #[test]
    fn exchange_is_identity_for_positrons_and_zero_rows() {
        let parameters = ExchangeParameters {
            a: -0.01,
            c: 0.2,
            d: 30.0,
            ..ExchangeParameters::default()
        };
        let positron = AtomicExchange::new(parameters, BetaType::Positron);
        assert!(!positron.is_active());
        for w in [1.01, 1.5, 3.0] {
            assert_eq!(positron.factor(w), 1.0);
        }

        let empty = AtomicExchange::new(ExchangeParameters::default(), BetaType::Electron);
        assert_eq!(empty.factor(1.2), 1.0);

        let electron = AtomicExchange::new(parameters, BetaType::Electron);
        let expected = 1.0 - 0.01 / 0.5 + 0.2 * (-15.0_f64).exp();
        assert!((electron.factor(1.5) - expected).abs() < 1.0e-15);
        assert_eq!(electron.factor(1.5), exchange_correction(1.5, &parameters));
    }

    #[test]
    fn mismatch_is_skipped_with_atomic_energy_deficit() {
        let skipped = AtomicMismatch::new(3.0, 30, BetaType::Electron, 0.5);
        assert!(!skipped.is_active());
        assert_eq!(skipped.factor(2.0), 1.0);

        let active = AtomicMismatch::new(3.0, 30, BetaType::Electron, 0.0);
        let curvature = binding_energy_curvature(29.5);
        assert!((active.factor(2.0) - (1.0 - curvature / 2.0)).abs() < 1.0e-15);
        assert!(active.factor(2.9) < active.factor(2.0));
    }

    #[test]
    fn binding_curvature_is_a_few_hundred_ev() {
        let curvature_ev = binding_energy_curvature(50.0) * 510.998_950e3;
        assert!(curvature_ev > 100.0 && curvature_ev < 500.0, "{curvature_ev}");
    }
}
