//! Nuclear-structure shape factor `C(W)` and the relativistic correction.
//!
//! `C = 1 + C0 + C1·W + C₋₁/W + C2·W²` in the impulse approximation, with
//! vector and axial contributions weighted by the mixing ratio. The axial
//! part carries weak magnetism `b`, induced tensor `d`, Λ = M121/M101 and
//! the induced pseudoscalar coupling `gP`.

use super::SpectralCorrection;
use crate::common::constants::{ALPHA, NUCLEON_MASS_ME};
use crate::domain::{BetaType, ChargeShape, CorrectionProfile, DecayType};
use crate::modules::matrix_elements::SingleParticleState;
use crate::modules::transition::NuclearParameters;
use crate::numerics::valence_shell;
use serde::Serialize;

/// Coefficients of `1 + C0 + C1·W + C₋₁/W + C2·W²`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShapeCoefficients {
    pub c0: f64,
    pub c1: f64,
    pub c_minus1: f64,
    pub c2: f64,
}

impl ShapeCoefficients {
    pub fn evaluate(&self, w: f64) -> f64 {
        1.0 + self.c0 + self.c1 * w + self.c_minus1 / w + self.c2 * w * w
    }

    fn polynomial(&self, w: f64) -> f64 {
        self.c0 + self.c1 * w + self.c_minus1 / w + self.c2 * w * w
    }
}

/// Inputs of the shape factor, all in natural units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFactorInput {
    pub w0: f64,
    pub z: i32,
    pub radius: f64,
    pub nuclear_mass: f64,
    pub beta_type: BetaType,
    pub fc1: f64,
    pub fb: f64,
    pub fd: f64,
    pub ratio_m121: f64,
    pub g_a: f64,
    pub g_p: f64,
}

impl ShapeFactorInput {
    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        let matrix_elements = parameters.matrix_elements();
        let couplings = parameters.couplings();
        Self {
            w0: parameters.w0(),
            z: parameters.z(),
            radius: parameters.radius(),
            nuclear_mass: parameters.nuclear_mass(),
            beta_type: parameters.beta_type(),
            fc1: matrix_elements.fc1,
            fb: matrix_elements.fb,
            fd: matrix_elements.fd,
            ratio_m121: matrix_elements.ratio_m121,
            g_a: couplings.g_a,
            g_p: couplings.g_p,
        }
    }

    /// `gP/(6·gA·M)`: the pseudoscalar lepton current scales with the lepton
    /// mass and the momentum transfer `W0 - W`.
    fn pseudoscalar_strength(&self) -> f64 {
        if self.g_a == 0.0 {
            0.0
        } else {
            self.g_p / (6.0 * self.g_a * NUCLEON_MASS_ME)
        }
    }
}

pub fn vector_coefficients(input: &ShapeFactorInput) -> ShapeCoefficients {
    let alpha_z = ALPHA * f64::from(input.z);
    let sign = -input.beta_type.sign_f64();
    let r = input.radius;
    let w0 = input.w0;

    ShapeCoefficients {
        c0: -233.0 / 630.0 * alpha_z * alpha_z - (w0 * r).powi(2) / 5.0
            + sign * 6.0 / 35.0 * alpha_z * w0 * r,
        c1: sign * 13.0 / 35.0 * alpha_z * r + 4.0 / 15.0 * w0 * r * r,
        c_minus1: sign * alpha_z * r / 70.0,
        c2: -4.0 / 15.0 * r * r,
    }
}

pub fn axial_coefficients(input: &ShapeFactorInput) -> ShapeCoefficients {
    let alpha_z = ALPHA * f64::from(input.z);
    let sign = -input.beta_type.sign_f64();
    let beta = input.beta_type.sign_f64();
    let r = input.radius;
    let w0 = input.w0;
    let lambda = input.ratio_m121;
    let b = input.fb / (input.nuclear_mass * input.fc1);
    let d = input.fd / (input.nuclear_mass * input.fc1);
    let pseudoscalar = input.pseudoscalar_strength();

    ShapeCoefficients {
        c0: -233.0 / 630.0 * alpha_z * alpha_z - (w0 * r).powi(2) / 5.0
            + sign * 2.0 / 35.0 * alpha_z * w0 * r
            + 4.0 / 9.0 * r * r * (1.0 - lambda / 20.0)
            - beta * 2.0 / 3.0 * w0 * b
            + w0 * d / 3.0
            + pseudoscalar,
        c1: sign * 13.0 / 35.0 * alpha_z * r + 4.0 / 9.0 * w0 * r * r * (1.0 - lambda / 10.0)
            + beta * 4.0 / 3.0 * b
            - d / 3.0,
        c_minus1: -2.0 / 45.0 * w0 * r * r * (1.0 - lambda) + sign * alpha_z * r / 70.0
            - beta * b / 3.0
            - pseudoscalar * w0,
        c2: -4.0 / 9.0 * r * r * (1.0 - lambda / 20.0),
    }
}

/// Terms of the vector and axial expansions that are pure `R²` moments of
/// the uniform sphere, rescaled by the isovector correction.
fn vector_radius_terms(input: &ShapeFactorInput) -> ShapeCoefficients {
    let r2 = input.radius * input.radius;
    ShapeCoefficients {
        c0: -(input.w0 * input.w0) * r2 / 5.0,
        c1: 4.0 / 15.0 * input.w0 * r2,
        c_minus1: 0.0,
        c2: -4.0 / 15.0 * r2,
    }
}

fn axial_radius_terms(input: &ShapeFactorInput) -> ShapeCoefficients {
    let r2 = input.radius * input.radius;
    let lambda = input.ratio_m121;
    ShapeCoefficients {
        c0: -(input.w0 * input.w0) * r2 / 5.0 + 4.0 / 9.0 * r2 * (1.0 - lambda / 20.0),
        c1: 4.0 / 9.0 * input.w0 * r2 * (1.0 - lambda / 10.0),
        c_minus1: -2.0 / 45.0 * input.w0 * r2 * (1.0 - lambda),
        c2: -4.0 / 9.0 * r2 * (1.0 - lambda / 20.0),
    }
}

/// Ratio of the oscillator `⟨r²⟩` of the decaying nucleon to the
/// uniform-sphere value `3R²/5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IsovectorScaling {
    pub xi: f64,
}

impl IsovectorScaling {
    /// Oscillator length from the modified-Gaussian fit `h`, averaged major
    /// shell from the single-particle states or the valence shells.
    pub fn new(
        radius: f64,
        h: f64,
        states: Option<(SingleParticleState, SingleParticleState)>,
        z: i32,
        a: i32,
        beta_type: BetaType,
    ) -> Self {
        let b2 = 2.0 / 5.0 * radius * radius * (2.0 + 3.0 * h) / (2.0 + 5.0 * h);
        let mean_shell = match states {
            Some((initial, last)) => {
                (f64::from(initial.major_shell()) + f64::from(last.major_shell())) / 2.0
            }
            None => {
                let (initial, last) = valence_counts(z, a, beta_type);
                (f64::from(valence_shell(initial)) + f64::from(valence_shell(last))) / 2.0
            }
        };
        let r2 = b2 * (mean_shell + 1.5);
        Self {
            xi: r2 / (3.0 / 5.0 * radius * radius),
        }
    }
}

/// Counts of the nucleon species that decays in the mother and the one it
/// becomes in the daughter.
fn valence_counts(z: i32, a: i32, beta_type: BetaType) -> (u32, u32) {
    let (initial, last) = match beta_type {
        BetaType::Electron => (a - z + 1, z),
        BetaType::Positron => (z + 1, a - z),
    };
    (
        u32::try_from(initial).unwrap_or(0),
        u32::try_from(last).unwrap_or(0),
    )
}

/// Shape factor with precomputed coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFactor {
    decay_type: DecayType,
    vector: ShapeCoefficients,
    axial: ShapeCoefficients,
    vector_radius: ShapeCoefficients,
    axial_radius: ShapeCoefficients,
    isovector: Option<IsovectorScaling>,
}

impl ShapeFactor {
    pub fn new(
        input: &ShapeFactorInput,
        decay_type: DecayType,
        isovector: Option<IsovectorScaling>,
    ) -> Self {
        Self {
            decay_type,
            vector: vector_coefficients(input),
            axial: axial_coefficients(input),
            vector_radius: vector_radius_terms(input),
            axial_radius: axial_radius_terms(input),
            isovector,
        }
    }

    /// The isovector term needs the standard profile, the `isovector` switch
    /// and a modified-Gaussian nuclear-structure shape.
    pub fn from_parameters(
        parameters: &NuclearParameters,
        profile: CorrectionProfile,
        isovector: bool,
    ) -> Self {
        let isovector = (profile == CorrectionProfile::Standard
            && isovector
            && parameters.nuclear_structure_shape() == ChargeShape::ModifiedGaussian)
            .then(|| {
                IsovectorScaling::new(
                    parameters.radius(),
                    parameters.ho_fit(),
                    parameters.single_particle_states(),
                    parameters.z(),
                    parameters.a(),
                    parameters.beta_type(),
                )
            });
        Self::new(
            &ShapeFactorInput::from_parameters(parameters),
            parameters.decay_type(),
            isovector,
        )
    }

    pub fn vector(&self) -> &ShapeCoefficients {
        &self.vector
    }

    pub fn axial(&self) -> &ShapeCoefficients {
        &self.axial
    }

    pub fn isovector(&self) -> Option<IsovectorScaling> {
        self.isovector
    }

    /// `C_I = 1 + (ξ - 1)·(R² terms)`, 1 without isovector scaling.
    pub fn isovector_factor(&self, w: f64) -> f64 {
        match self.isovector {
            Some(scaling) => {
                let radius_terms = self.decay_type.blend(
                    self.vector_radius.polynomial(w),
                    self.axial_radius.polynomial(w),
                );
                1.0 + (scaling.xi - 1.0) * radius_terms
            }
            None => 1.0,
        }
    }
}

impl SpectralCorrection for ShapeFactor {
    fn factor(&self, w: f64) -> f64 {
        let c = self
            .decay_type
            .blend(self.vector.evaluate(w), self.axial.evaluate(w));
        c * self.isovector_factor(w)
    }
}

/// Axial relativistic matrix-element correction of order `αZ/(M·R)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativisticCorrection {
    w0: f64,
    strength: f64,
    beta_type: BetaType,
    decay_type: DecayType,
}

impl RelativisticCorrection {
    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        let alpha_z = ALPHA * f64::from(parameters.z());
        Self {
            w0: parameters.w0(),
            strength: alpha_z / (parameters.nuclear_mass() * parameters.radius()),
            beta_type: parameters.beta_type(),
            decay_type: parameters.decay_type(),
        }
    }
}

impl SpectralCorrection for RelativisticCorrection {
    fn factor(&self, w: f64) -> f64 {
        let axial =
            -self.beta_type.sign_f64() * self.strength * (4.0 / 3.0 * w - 2.0 / 3.0 * self.w0);
        1.0 + self.decay_type.blend(0.0, axial)
    }
}
