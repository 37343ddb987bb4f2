//! Finite nuclear size corrections to the Coulomb problem.
//!
//! `L0` replaces the point-charge solution by that of a uniformly charged
//! sphere, `U` corrects for the actual radial charge shape, and the
//! deformation factor averages `L0` over the orientation of a deformed
//! surface.

use super::SpectralCorrection;
use super::fermi::coulomb_gamma;
use crate::common::constants::{ALPHA, PI};
use crate::domain::{BetaType, CorrectionProfile};
use crate::modules::transition::{L0Coefficients, NuclearParameters, ShapeExpansion};
use crate::numerics::simpson_function;

const ORIENTATION_INTERVALS: usize = 48;

/// Wilkinson's fit of the uniform-sphere finite-size factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteSizeL0 {
    z: i32,
    radius: f64,
    beta_type: BetaType,
    coefficients: L0Coefficients,
}

impl FiniteSizeL0 {
    pub fn new(z: i32, radius: f64, beta_type: BetaType, coefficients: L0Coefficients) -> Self {
        Self {
            z,
            radius,
            beta_type,
            coefficients,
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        let beta_type = parameters.beta_type();
        Self::new(
            parameters.z(),
            parameters.radius(),
            beta_type,
            *parameters.l0().for_beta(beta_type),
        )
    }

    /// `L0` for an arbitrary radius, used by the orientation average.
    pub fn at_radius(&self, w: f64, radius: f64) -> f64 {
        l0_correction(w, self.z, radius, self.beta_type, &self.coefficients)
    }
}

impl SpectralCorrection for FiniteSizeL0 {
    fn factor(&self, w: f64) -> f64 {
        self.at_radius(w, self.radius)
    }
}

pub fn l0_correction(
    w: f64,
    z: i32,
    radius: f64,
    beta_type: BetaType,
    coefficients: &L0Coefficients,
) -> f64 {
    let alpha_z = ALPHA * f64::from(z);
    let gamma = coulomb_gamma(alpha_z);
    let signed = beta_type.sign_f64() * alpha_z;

    let common = 1.0 + 13.0 / 60.0 * alpha_z * alpha_z
        - signed * w * radius * (41.0 - 26.0 * gamma) / (15.0 * (2.0 * gamma - 1.0))
        - signed * radius * gamma * (17.0 - 2.0 * gamma) / (30.0 * w * (2.0 * gamma - 1.0))
        + coefficients.expansion(w, radius);
    let strength = match beta_type {
        BetaType::Electron => 0.41,
        BetaType::Positron => 0.22,
    };
    let specific = strength * (radius - 0.0164) * alpha_z.abs().powf(4.5);

    (common + specific) * 2.0 / (1.0 + gamma)
}

/// Charge-shape factor `U`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeShapeCorrection {
    z: i32,
    radius: f64,
    beta_type: BetaType,
    expansion: Option<ShapeExpansion>,
}

impl ChargeShapeCorrection {
    /// The potential expansion only enters under the standard profile.
    pub fn from_parameters(parameters: &NuclearParameters, profile: CorrectionProfile) -> Self {
        let expansion = match profile {
            CorrectionProfile::Standard => parameters.shape_expansion().copied(),
            CorrectionProfile::Legacy => None,
        };
        Self {
            z: parameters.z(),
            radius: parameters.radius(),
            beta_type: parameters.beta_type(),
            expansion,
        }
    }
}

impl SpectralCorrection for ChargeShapeCorrection {
    fn factor(&self, w: f64) -> f64 {
        match &self.expansion {
            Some(expansion) => {
                u_correction_expansion(w, self.z, self.radius, self.beta_type, expansion)
            }
            None => u_correction_fermi(w, self.z, self.beta_type),
        }
    }
}

/// Parametrisation of `U` for a Fermi charge distribution, quadratic in W.
pub fn u_correction_fermi(w: f64, z: i32, beta_type: BetaType) -> f64 {
    let z = f64::from(z);
    let sign = beta_type.sign_f64();
    let a0 = -5.6e-5 - sign * 4.94e-5 * z + 6.23e-8 * z * z;
    let a1 = 5.17e-6 + sign * 2.517e-6 * z + 2.00e-8 * z * z;
    let a2 = -9.17e-8 + sign * 5.53e-9 * z + 1.25e-10 * z * z;
    1.0 + a0 + a1 * w + a2 * w * w
}

/// First-order change of the finite-size factor when the uniform-sphere
/// potential is replaced by the expansion `v_new`.
pub fn u_correction_expansion(
    w: f64,
    z: i32,
    radius: f64,
    beta_type: BetaType,
    expansion: &ShapeExpansion,
) -> f64 {
    let signed = beta_type.sign_f64() * ALPHA * f64::from(z);
    1.0 + signed * 5.0 / 6.0 * (w * radius + radius / (2.0 * w)) * expansion.averaged_difference()
}

/// Deformation of the daughter charge distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeformationCorrection {
    /// Orientation average of `L0` over a quadrupole-deformed surface.
    OrientationAveraged { l0: FiniteSizeL0, beta2: f64 },
    /// Closed form in β2 and β4.
    ClosedForm {
        z: i32,
        radius: f64,
        beta2: f64,
        beta4: f64,
    },
}

impl DeformationCorrection {
    pub fn from_parameters(parameters: &NuclearParameters, profile: CorrectionProfile) -> Self {
        match profile {
            CorrectionProfile::Standard => Self::OrientationAveraged {
                l0: FiniteSizeL0::from_parameters(parameters),
                beta2: parameters.daughter_beta2(),
            },
            CorrectionProfile::Legacy => Self::ClosedForm {
                z: parameters.z(),
                radius: parameters.radius(),
                beta2: parameters.daughter_beta2(),
                beta4: parameters.daughter_beta4(),
            },
        }
    }
}

impl SpectralCorrection for DeformationCorrection {
    fn factor(&self, w: f64) -> f64 {
        match *self {
            Self::OrientationAveraged { ref l0, beta2 } => orientation_averaged_deformation(w, l0, beta2),
            Self::ClosedForm {
                z,
                radius,
                beta2,
                beta4,
            } => closed_form_deformation(w, z, radius, beta2, beta4),
        }
    }
}

/// `⟨L0(R(θ))⟩/L0(R)` with `R(θ) = R0·(1 + β2·Y20(θ))`, where `R0` keeps the
/// volume of the sphere of radius `R`.
pub fn orientation_averaged_deformation(w: f64, l0: &FiniteSizeL0, beta2: f64) -> f64 {
    if beta2 == 0.0 {
        return 1.0;
    }

    let surface = |cos_theta: f64| 1.0 + beta2 * y20(cos_theta);
    let volume = simpson_function(|x| surface(x).powi(3), 0.0, 1.0, ORIENTATION_INTERVALS);
    let r0 = l0.radius / volume.cbrt();
    let averaged = simpson_function(
        |x| l0.at_radius(w, r0 * surface(x)),
        0.0,
        1.0,
        ORIENTATION_INTERVALS,
    );
    averaged / l0.factor(w)
}

pub fn closed_form_deformation(w: f64, z: i32, radius: f64, beta2: f64, beta4: f64) -> f64 {
    let alpha_z = ALPHA * f64::from(z);
    1.0 + alpha_z * (w + 1.0 / (2.0 * w)) * radius * (beta2 * beta2 + beta4 * beta4) / (4.0 * PI)
}

fn y20(cos_theta: f64) -> f64 {
    (5.0 / (16.0 * PI)).sqrt() * (3.0 * cos_theta * cos_theta - 1.0)
}

#[cfg(test)]
mod tests {
    use super::{
        ChargeShapeCorrection, DeformationCorrection, FiniteSizeL0, closed_form_deformation,
        l0_correction, orientation_averaged_deformation, u_correction_expansion,
        u_correction_fermi,
    };
    use crate::common::constants::ALPHA;
    use crate::domain::BetaType;
    use crate::modules::corrections::SpectralCorrection;
    use crate::modules::transition::{L0CoefficientTable, ShapeExpansion, UNIFORM_SPHERE_EXPANSION};

    fn l0(z: i32, radius: f64, beta_type: BetaType) -> FiniteSizeL0 {
        let table = L0CoefficientTable::for_charge(z);
        FiniteSizeL0::new(z, radius, beta_type, *table.for_beta(beta_type))
    }

    #[test]
    fn l0_is_unity_without_charge() {
        let table = L0CoefficientTable::for_charge(0);
        let value = l0_correction(2.0, 0, 0.01, BetaType::Electron, &table.electron);
        assert!((value - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn l0_stays_close_to_unity_for_medium_nuclei() {
        let correction = l0(29, 0.0125, BetaType::Electron);
        for w in [1.01, 2.0, 4.0] {
            let value = correction.factor(w);
            assert!(value > 0.9 && value < 1.1, "L0({w}) = {value}");
        }
        let positron = l0(29, 0.0125, BetaType::Positron);
        assert!(positron.factor(2.0) > 0.9 && positron.factor(2.0) < 1.1);
    }

    #[test]
    fn fermi_parametrised_u_is_a_small_quadratic() {
        let value = u_correction_fermi(2.0, 50, BetaType::Electron);
        let z = 50.0;
        let a0 = -5.6e-5 - 4.94e-5 * z + 6.23e-8 * z * z;
        let a1 = 5.17e-6 + 2.517e-6 * z + 2.00e-8 * z * z;
        let a2 = -9.17e-8 + 5.53e-9 * z + 1.25e-10 * z * z;
        assert!((value - (1.0 + a0 + 2.0 * a1 + 4.0 * a2)).abs() < 1.0e-15);
        assert!((value - 1.0).abs() < 1.0e-2);
    }

    #[test]
    fn identical_potentials_leave_u_at_unity() {
        let expansion = ShapeExpansion {
            v_old: UNIFORM_SPHERE_EXPANSION,
            v_new: UNIFORM_SPHERE_EXPANSION,
        };
        assert_eq!(u_correction_expansion(2.0, 40, 0.012, BetaType::Electron, &expansion), 1.0);

        let shifted = ShapeExpansion {
            v_old: UNIFORM_SPHERE_EXPANSION,
            v_new: [1.4, -0.5, 0.0],
        };
        let value = u_correction_expansion(2.0, 40, 0.012, BetaType::Electron, &shifted);
        let expected = 1.0 + ALPHA * 40.0 * 5.0 / 6.0 * (2.0 * 0.012 + 0.012 / 4.0) * (-0.1);
        assert!((value - expected).abs() < 1.0e-15);
        let mirrored = u_correction_expansion(2.0, 40, 0.012, BetaType::Positron, &shifted);
        assert!((mirrored - 1.0 + (value - 1.0)).abs() < 1.0e-15);
    }

    #[test]
    fn legacy_u_ignores_shape_expansion() {
        let expansion = ShapeExpansion {
            v_old: UNIFORM_SPHERE_EXPANSION,
            v_new: [1.4, -0.5, 0.0],
        };
        let correction = ChargeShapeCorrection {
            z: 40,
            radius: 0.012,
            beta_type: BetaType::Electron,
            expansion: None,
        };
        assert_eq!(correction.factor(2.0), u_correction_fermi(2.0, 40, BetaType::Electron));
        let shaped = ChargeShapeCorrection {
            expansion: Some(expansion),
            ..correction
        };
        assert_ne!(shaped.factor(2.0), correction.factor(2.0));
    }

    #[test]
    fn spherical_nucleus_has_no_deformation_correction() {
        let correction = l0(60, 0.017, BetaType::Electron);
        assert_eq!(orientation_averaged_deformation(2.0, &correction, 0.0), 1.0);
        assert_eq!(closed_form_deformation(2.0, 60, 0.017, 0.0, 0.0), 1.0);
    }

    #[test]
    fn deformation_corrections_stay_perturbative() {
        let correction = DeformationCorrection::OrientationAveraged {
            l0: l0(66, 0.018, BetaType::Electron),
            beta2: 0.3,
        };
        let value = correction.factor(2.5);
        assert!(value.is_finite());
        assert!((value - 1.0).abs() < 1.0e-2, "deformation factor {value}");

        let legacy = DeformationCorrection::ClosedForm {
            z: 66,
            radius: 0.018,
            beta2: 0.3,
            beta4: 0.05,
        };
        let value = legacy.factor(2.5);
        assert!(value > 1.0 && value < 1.01);
    }
}
