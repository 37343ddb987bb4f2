//! Outer radiative corrections.
//!
//! The electron branch carries Sirlin's O(α) function `g(W, W0)` and the
//! leading O(Zα²) term, whose ultraviolet cutoff is shared between the
//! nucleon mass and the nuclear radius through the axial-magnetic form
//! factors. The neutrino branch uses the simpler function of the neutrino
//! energy alone.

use super::SpectralCorrection;
use crate::common::constants::{ALPHA, PI, PROTON_MASS_ME};
use crate::domain::BetaType;
use crate::modules::transition::{Couplings, NuclearParameters};
use crate::numerics::spence;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronRadiative {
    w0: f64,
    z: i32,
    beta_type: BetaType,
    form_factor: f64,
}

impl ElectronRadiative {
    pub fn new(w0: f64, z: i32, radius: f64, beta_type: BetaType, couplings: Couplings) -> Self {
        Self {
            w0,
            z,
            beta_type,
            form_factor: nucleon_form_factor_term(radius, couplings.g_a, couplings.g_m),
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(
            parameters.w0(),
            parameters.z(),
            parameters.radius(),
            parameters.beta_type(),
            parameters.couplings(),
        )
    }
}

impl SpectralCorrection for ElectronRadiative {
    fn factor(&self, w: f64) -> f64 {
        let order_alpha = 1.0 + ALPHA / (2.0 * PI) * sirlin_g(w, self.w0);
        let order_z_alpha2 = self.beta_type.sign_f64()
            * f64::from(self.z)
            * ALPHA
            * ALPHA
            * (PROTON_MASS_ME.ln() - 5.0 / 3.0 * (2.0 * w).ln() + 43.0 / 18.0 + self.form_factor);
        order_alpha * (1.0 + order_z_alpha2)
    }
}

/// `gA·gM/(1 + 3gA²) · ln(1/(M·R))`.
///
/// Zero for a point nucleus or a vanishing weight.
pub fn nucleon_form_factor_term(radius: f64, g_a: f64, g_m: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    let weight = g_a * g_m / (1.0 + 3.0 * g_a * g_a);
    weight * (1.0 / (PROTON_MASS_ME * radius)).ln()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeutrinoRadiative;

impl SpectralCorrection for NeutrinoRadiative {
    fn factor(&self, wv: f64) -> f64 {
        1.0 + ALPHA / (2.0 * PI) * neutrino_h(wv)
    }
}

/// Sirlin's `g(W, W0)`.
pub fn sirlin_g(w: f64, w0: f64) -> f64 {
    let beta = (w * w - 1.0).sqrt() / w;
    let ratio = atanh_ratio(beta);
    let q = w0 - w;

    3.0 * PROTON_MASS_ME.ln() - 0.75
        + 4.0 * (ratio - 1.0) * (q / (3.0 * w) - 1.5 + (2.0 * q).ln())
        + 4.0 / beta * spence(2.0 * beta / (1.0 + beta))
        + ratio * (2.0 * (1.0 + beta * beta) + q * q / (6.0 * w * w) - 4.0 * beta.atanh())
}

/// O(α) correction to the neutrino spectrum, `h(Wv)`.
pub fn neutrino_h(wv: f64) -> f64 {
    let beta = (wv * wv - 1.0).sqrt() / wv;
    let ratio = atanh_ratio(beta);

    3.0 * PROTON_MASS_ME.ln() + 23.0 / 4.0 - 8.0 / beta * spence(2.0 * beta / (1.0 + beta))
        + 8.0 * (ratio - 1.0) * (2.0 * wv * beta).ln()
        + 4.0 * ratio * ((7.0 + 3.0 * beta * beta) / 8.0 - 2.0 * beta.atanh())
}

/// `atanh(β)/β`, continued to 1 at β = 0.
fn atanh_ratio(beta: f64) -> f64 {
    if beta == 0.0 { 1.0 } else { beta.atanh() / beta }
}
