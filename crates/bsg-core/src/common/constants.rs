//! Physical constants shared by the correction kernels.
//!
//! Energies are in keV unless the name says otherwise; lengths entering the
//! corrections are expressed in the natural unit ħ/(mₑc).

pub const PI: f64 = std::f64::consts::PI;
pub const ALPHA: f64 = 1.0 / 137.035_999_139_f64;
pub const ELECTRON_MASS_KEV: f64 = 510.998_950_f64;
pub const PROTON_MASS_KEV: f64 = 938_272.088_16_f64;
pub const NEUTRON_MASS_KEV: f64 = 939_565.420_52_f64;
pub const NUCLEON_MASS_KEV: f64 = (PROTON_MASS_KEV + NEUTRON_MASS_KEV) / 2.0;
/// Reduced Compton wavelength of the electron in metres.
pub const NATURAL_LENGTH: f64 = 3.861_592_679_6e-13_f64;
pub const FERMI_IN_METRES: f64 = 1.0e-15;
/// Default nuclear radius parameter r₀ in fm for R = r₀·A^(1/3).
pub const DEFAULT_RADIUS_PARAMETER_FM: f64 = 1.2;

/// Nucleon mass in units of the electron mass.
pub const NUCLEON_MASS_ME: f64 = NUCLEON_MASS_KEV / ELECTRON_MASS_KEV;
pub const PROTON_MASS_ME: f64 = PROTON_MASS_KEV / ELECTRON_MASS_KEV;

/// Converts a length in fm to natural units.
pub fn fermi_to_natural(length_fm: f64) -> f64 {
    length_fm * FERMI_IN_METRES / NATURAL_LENGTH
}

/// Converts a total electron energy W to kinetic energy in keV.
pub fn total_energy_to_kev(w: f64) -> f64 {
    (w - 1.0) * ELECTRON_MASS_KEV
}

/// Converts a kinetic energy in keV to total energy W.
pub fn kev_to_total_energy(energy_kev: f64) -> f64 {
    energy_kev / ELECTRON_MASS_KEV + 1.0
}

#[cfg(test)]
mod tests {
    use super::{
        ALPHA, ELECTRON_MASS_KEV, NATURAL_LENGTH, NEUTRON_MASS_KEV, NUCLEON_MASS_KEV,
        NUCLEON_MASS_ME, PROTON_MASS_KEV, fermi_to_natural, kev_to_total_energy,
        total_energy_to_kev,
    };

    #[test]
    fn constants_match_expected_relationships() {
        assert!((1.0 / ALPHA - 137.036).abs() < 1.0e-3);
        assert!(NUCLEON_MASS_KEV > PROTON_MASS_KEV && NUCLEON_MASS_KEV < NEUTRON_MASS_KEV);
        assert!((NUCLEON_MASS_ME - 1837.4).abs() < 1.0);
    }

    #[test]
    fn natural_length_scale_converts_nuclear_radii() {
        // 386.16 fm is one natural length unit.
        let natural = fermi_to_natural(NATURAL_LENGTH / 1.0e-15);
        assert!((natural - 1.0).abs() < 1.0e-12);
        assert!((fermi_to_natural(5.0) - 0.012_948).abs() < 1.0e-5);
    }

    #[test]
    fn energy_conversions_are_inverse() {
        let w = kev_to_total_energy(1000.0);
        assert!((w - (1000.0 / ELECTRON_MASS_KEV + 1.0)).abs() < 1.0e-15);
        assert!((total_energy_to_kev(w) - 1000.0).abs() < 1.0e-9);
        assert_eq!(kev_to_total_energy(0.0), 1.0);
    }
}
