//! Finite nuclear mass effects: kinematic recoil `R` and Coulomb recoil `Q`.

use super::SpectralCorrection;
use crate::common::constants::{ALPHA, PI};
use crate::domain::{BetaType, DecayType};
use crate::modules::transition::NuclearParameters;

/// `R = 1 + r0 + r1/W + r2·W + r3·W²`, vector and axial parts weighted by the
/// mixing ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicRecoil {
    w0: f64,
    nuclear_mass: f64,
    decay_type: DecayType,
}

impl KinematicRecoil {
    pub fn new(w0: f64, nuclear_mass: f64, decay_type: DecayType) -> Self {
        Self {
            w0,
            nuclear_mass,
            decay_type,
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(
            parameters.w0(),
            parameters.nuclear_mass(),
            parameters.decay_type(),
        )
    }
}

impl SpectralCorrection for KinematicRecoil {
    fn factor(&self, w: f64) -> f64 {
        let w0 = self.w0;
        let m = self.nuclear_mass;
        let m2 = m * m;

        let vector = 1.0 + w0 * w0 / (6.0 * m2) - 11.0 / (6.0 * m2)
            + w0 / (3.0 * m2) / w
            + (2.0 / m - 4.0 * w0 / (3.0 * m2)) * w
            + 16.0 / (3.0 * m2) * w * w;
        let axial = 1.0 - 2.0 * w0 / (3.0 * m) - w0 * w0 / (6.0 * m2) - 77.0 / (18.0 * m2)
            + (-2.0 / (3.0 * m) + 7.0 * w0 / (9.0 * m2)) / w
            + (10.0 / (3.0 * m) - 28.0 * w0 / (9.0 * m2)) * w
            + 88.0 / (9.0 * m2) * w * w;

        self.decay_type.blend(vector, axial)
    }
}

/// Coulomb field of the recoiling daughter, `1 - (±παZ/(M·p))·(1 + a·(W0 - W)/(3W))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombRecoil {
    w0: f64,
    z: i32,
    nuclear_mass: f64,
    beta_type: BetaType,
    asymmetry: f64,
}

impl CoulombRecoil {
    pub fn new(w0: f64, z: i32, nuclear_mass: f64, beta_type: BetaType, decay_type: DecayType) -> Self {
        Self {
            w0,
            z,
            nuclear_mass,
            beta_type,
            asymmetry: neutrino_asymmetry(decay_type),
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(
            parameters.w0(),
            parameters.z(),
            parameters.nuclear_mass(),
            parameters.beta_type(),
            parameters.decay_type(),
        )
    }
}

impl SpectralCorrection for CoulombRecoil {
    fn factor(&self, w: f64) -> f64 {
        let p = (w * w - 1.0).sqrt();
        let alpha_z = ALPHA * f64::from(self.z);
        1.0 - self.beta_type.sign_f64() * PI * alpha_z / (self.nuclear_mass * p)
            * (1.0 + self.asymmetry * (self.w0 - w) / (3.0 * w))
    }
}

/// β-ν angular correlation coefficient: 1 for Fermi, -1/3 for Gamow-Teller.
pub fn neutrino_asymmetry(decay_type: DecayType) -> f64 {
    match decay_type {
        DecayType::Fermi => 1.0,
        DecayType::GamowTeller => -1.0 / 3.0,
        DecayType::Mixed { mixing_ratio } => {
            let lambda2 = mixing_ratio * mixing_ratio;
            (1.0 - lambda2 / 3.0) / (1.0 + lambda2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoulombRecoil, KinematicRecoil, SpectralCorrection, neutrino_asymmetry};
    use crate::common::constants::{ALPHA, NUCLEON_MASS_ME, PI};
    use crate::domain::{BetaType, DecayType};

    #[test]
    fn recoil_vanishes_for_infinite_mass() {
        for decay_type in [DecayType::Fermi, DecayType::GamowTeller] {
            let recoil = KinematicRecoil::new(3.0, 1.0e12, decay_type);
            assert!((recoil.factor(2.0) - 1.0).abs() < 1.0e-10);
        }
    }

    #[test]
    fn vector_recoil_has_leading_two_w_over_m_slope() {
        let m = 20.0 * NUCLEON_MASS_ME;
        let recoil = KinematicRecoil::new(5.0, m, DecayType::Fermi);
        let slope = recoil.factor(3.0) - recoil.factor(2.0);
        assert!((slope - 2.0 / m).abs() < 1.0e-7);
    }

    #[test]
    fn mixed_recoil_interpolates_between_pure_cases() {
        let m = 6.0 * NUCLEON_MASS_ME;
        let fermi = KinematicRecoil::new(8.0, m, DecayType::Fermi).factor(4.0);
        let gamow_teller = KinematicRecoil::new(8.0, m, DecayType::GamowTeller).factor(4.0);
        let mixed = KinematicRecoil::new(8.0, m, DecayType::Mixed { mixing_ratio: 1.0 }).factor(4.0);
        assert!((mixed - (fermi + gamow_teller) / 2.0).abs() < 1.0e-15);
    }

    #[test]
    fn asymmetry_coefficient_matches_pure_limits() {
        assert_eq!(neutrino_asymmetry(DecayType::Fermi), 1.0);
        assert_eq!(neutrino_asymmetry(DecayType::GamowTeller), -1.0 / 3.0);
        assert_eq!(neutrino_asymmetry(DecayType::Mixed { mixing_ratio: 0.0 }), 1.0);
        let large = neutrino_asymmetry(DecayType::Mixed { mixing_ratio: 1.0e4 });
        assert!((large + 1.0 / 3.0).abs() < 1.0e-6);
    }

    #[test]
    fn coulomb_recoil_sign_follows_lepton_charge() {
        let m = 60.0 * NUCLEON_MASS_ME;
        let electron = CoulombRecoil::new(3.0, 28, m, BetaType::Electron, DecayType::Fermi);
        let positron = CoulombRecoil::new(3.0, 28, m, BetaType::Positron, DecayType::Fermi);
        let w: f64 = 2.0;
        let p = (w * w - 1.0).sqrt();
        let shift = PI * ALPHA * 28.0 / (m * p) * (1.0 + 1.0 / 6.0);
        assert!((electron.factor(w) - (1.0 - shift)).abs() < 1.0e-15);
        assert!((positron.factor(w) - (1.0 + shift)).abs() < 1.0e-15);
    }
}
