//! Point-charge Fermi function `F0`.
//!
//! `F0 = 2(γ+1)·(2pR)^(2(γ-1))·exp(πy)·|Γ(γ+iy)|²/Γ(2γ+1)²` with
//! `γ = √(1 - (αZ)²)` and `y = ±αZW/p`. The product is assembled in log space
//! since the gamma functions overflow well before the ratio does.

use super::SpectralCorrection;
use crate::common::constants::{ALPHA, PI};
use crate::domain::BetaType;
use crate::modules::transition::NuclearParameters;
use crate::numerics::{ln_gamma, ln_gamma_complex};
use num_complex::Complex64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FermiFunction {
    z: i32,
    radius: f64,
    beta_type: BetaType,
}

impl FermiFunction {
    pub fn new(z: i32, radius: f64, beta_type: BetaType) -> Self {
        Self {
            z,
            radius,
            beta_type,
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(parameters.z(), parameters.radius(), parameters.beta_type())
    }
}

impl SpectralCorrection for FermiFunction {
    fn factor(&self, w: f64) -> f64 {
        fermi_function(w, self.z, self.radius, self.beta_type)
    }
}

pub fn fermi_function(w: f64, z: i32, radius: f64, beta_type: BetaType) -> f64 {
    let p = (w * w - 1.0).sqrt();
    let alpha_z = ALPHA * f64::from(z);
    let gamma = coulomb_gamma(alpha_z);
    let y = sommerfeld_parameter(w, p, alpha_z, beta_type);

    let ln_f = (2.0 * (gamma + 1.0)).ln() + 2.0 * (gamma - 1.0) * (2.0 * p * radius).ln()
        + PI * y
        + ln_gamma_modulus_squared(gamma, y)
        - 2.0 * ln_gamma(2.0 * gamma + 1.0);
    ln_f.exp()
}

/// `γ = √(1 - (αZ)²)`.
pub(crate) fn coulomb_gamma(alpha_z: f64) -> f64 {
    (1.0 - alpha_z * alpha_z).sqrt()
}

/// `y = ±αZ·W/p`, positive for electrons.
pub(crate) fn sommerfeld_parameter(w: f64, p: f64, alpha_z: f64, beta_type: BetaType) -> f64 {
    beta_type.sign_f64() * alpha_z * w / p
}

/// `ln|Γ(γ + iy)|²`.
pub(crate) fn ln_gamma_modulus_squared(gamma: f64, y: f64) -> f64 {
    2.0 * ln_gamma_complex(Complex64::new(gamma, y)).re
}
