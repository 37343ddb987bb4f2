//! Ordered chain of spectral corrections.
//!
//! Every correction is a multiplicative factor of the total lepton energy.
//! [`CorrectionPipeline`] builds each one once from [`NuclearParameters`] and
//! applies the enabled ones in [`Correction::ORDER`].

pub mod atomic;
pub mod evaluator;
pub mod fermi;
pub mod finite_size;
pub mod phase_space;
pub mod radiative;
pub mod recoil;
pub mod shape_factor;

pub use evaluator::{DecayRate, DecayRateEvaluator};

use crate::common::config::{CorrectionToggles, RunConfig};
use crate::domain::CorrectionProfile;
use crate::modules::transition::NuclearParameters;
use atomic::{AtomicExchange, AtomicMismatch, AtomicScreening};
use fermi::FermiFunction;
use finite_size::{ChargeShapeCorrection, DeformationCorrection, FiniteSizeL0};
use phase_space::PhaseSpace;
use radiative::{ElectronRadiative, NeutrinoRadiative};
use recoil::{CoulombRecoil, KinematicRecoil};
use serde::Serialize;
use shape_factor::{RelativisticCorrection, ShapeFactor};
use std::fmt::{Display, Formatter};

/// A factor of the total energy `W` of one lepton.
pub trait SpectralCorrection {
    fn factor(&self, w: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Correction {
    PhaseSpace,
    Fermi,
    ShapeFactor,
    Relativistic,
    Deformation,
    FiniteSize,
    ChargeShape,
    CoulombRecoil,
    Radiative,
    Recoil,
    Screening,
    Exchange,
    AtomicMismatch,
}

impl Correction {
    /// Application order. Floating-point products are order dependent and
    /// reference spectra assume this one.
    pub const ORDER: [Self; 13] = [
        Self::PhaseSpace,
        Self::Fermi,
        Self::ShapeFactor,
        Self::Relativistic,
        Self::Deformation,
        Self::FiniteSize,
        Self::ChargeShape,
        Self::CoulombRecoil,
        Self::Radiative,
        Self::Recoil,
        Self::Screening,
        Self::Exchange,
        Self::AtomicMismatch,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhaseSpace => "Phase space",
            Self::Fermi => "Fermi function",
            Self::ShapeFactor => "C shape factor",
            Self::Relativistic => "Relativistic terms",
            Self::Deformation => "Deformation",
            Self::FiniteSize => "L0 finite size",
            Self::ChargeShape => "U charge shape",
            Self::CoulombRecoil => "Q Coulomb recoil",
            Self::Radiative => "Radiative",
            Self::Recoil => "R kinematic recoil",
            Self::Screening => "Atomic screening",
            Self::Exchange => "Atomic exchange",
            Self::AtomicMismatch => "Atomic mismatch",
        }
    }

    pub const fn is_enabled(self, toggles: &CorrectionToggles) -> bool {
        match self {
            Self::PhaseSpace => toggles.phase_space,
            Self::Fermi => toggles.fermi,
            Self::ShapeFactor => toggles.c,
            Self::Relativistic => toggles.relativistic,
            Self::Deformation => toggles.deformation,
            Self::FiniteSize => toggles.finite_size,
            Self::ChargeShape => toggles.u,
            Self::CoulombRecoil => toggles.coulomb_recoil,
            Self::Radiative => toggles.radiative,
            Self::Recoil => toggles.recoil,
            Self::Screening => toggles.screening,
            Self::Exchange => toggles.exchange,
            Self::AtomicMismatch => toggles.atomic_mismatch,
        }
    }
}

impl Display for Correction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Which lepton a factor is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Electron,
    Neutrino,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CorrectionSettings {
    pub toggles: CorrectionToggles,
    pub profile: CorrectionProfile,
    pub isovector: bool,
}

impl CorrectionSettings {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            toggles: config.corrections,
            profile: config.spectrum.profile,
            isovector: config.spectrum.isovector,
        }
    }

    /// Only the phase-space factor.
    pub fn phase_space_only() -> Self {
        Self {
            toggles: CorrectionToggles {
                phase_space: true,
                ..CorrectionToggles::none()
            },
            ..Self::default()
        }
    }
}

/// Every correction of one transition, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CorrectionPipeline {
    parameters: NuclearParameters,
    settings: CorrectionSettings,
    enabled: Vec<Correction>,
    phase_space: PhaseSpace,
    fermi: FermiFunction,
    shape_factor: ShapeFactor,
    relativistic: RelativisticCorrection,
    deformation: DeformationCorrection,
    finite_size: FiniteSizeL0,
    charge_shape: ChargeShapeCorrection,
    coulomb_recoil: CoulombRecoil,
    radiative: ElectronRadiative,
    neutrino_radiative: NeutrinoRadiative,
    recoil: KinematicRecoil,
    screening: AtomicScreening,
    exchange: AtomicExchange,
    atomic_mismatch: AtomicMismatch,
}

impl CorrectionPipeline {
    pub fn new(parameters: NuclearParameters, settings: CorrectionSettings) -> Self {
        let profile = settings.profile;
        let enabled = Correction::ORDER
            .into_iter()
            .filter(|correction| correction.is_enabled(&settings.toggles))
            .collect::<Vec<_>>();
        tracing::debug!(
            profile = profile.as_str(),
            enabled = enabled.len(),
            "building correction pipeline"
        );

        Self {
            phase_space: PhaseSpace::from_parameters(&parameters),
            fermi: FermiFunction::from_parameters(&parameters),
            shape_factor: ShapeFactor::from_parameters(&parameters, profile, settings.isovector),
            relativistic: RelativisticCorrection::from_parameters(&parameters),
            deformation: DeformationCorrection::from_parameters(&parameters, profile),
            finite_size: FiniteSizeL0::from_parameters(&parameters),
            charge_shape: ChargeShapeCorrection::from_parameters(&parameters, profile),
            coulomb_recoil: CoulombRecoil::from_parameters(&parameters),
            radiative: ElectronRadiative::from_parameters(&parameters),
            neutrino_radiative: NeutrinoRadiative,
            recoil: KinematicRecoil::from_parameters(&parameters),
            screening: AtomicScreening::from_parameters(&parameters),
            exchange: AtomicExchange::from_parameters(&parameters),
            atomic_mismatch: AtomicMismatch::from_parameters(&parameters),
            enabled,
            settings,
            parameters,
        }
    }

    pub fn parameters(&self) -> &NuclearParameters {
        &self.parameters
    }

    pub fn settings(&self) -> &CorrectionSettings {
        &self.settings
    }

    /// Enabled corrections in application order.
    pub fn enabled(&self) -> &[Correction] {
        &self.enabled
    }

    pub fn shape_factor(&self) -> &ShapeFactor {
        &self.shape_factor
    }

    /// Factor of `correction` at total energy `w` of the given lepton.
    ///
    /// Both branches share every correction except the radiative one.
    pub fn factor(&self, correction: Correction, w: f64, branch: Branch) -> f64 {
        match correction {
            Correction::PhaseSpace => self.phase_space.factor(w),
            Correction::Fermi => self.fermi.factor(w),
            Correction::ShapeFactor => self.shape_factor.factor(w),
            Correction::Relativistic => self.relativistic.factor(w),
            Correction::Deformation => self.deformation.factor(w),
            Correction::FiniteSize => self.finite_size.factor(w),
            Correction::ChargeShape => self.charge_shape.factor(w),
            Correction::CoulombRecoil => self.coulomb_recoil.factor(w),
            Correction::Radiative => match branch {
                Branch::Electron => self.radiative.factor(w),
                Branch::Neutrino => self.neutrino_radiative.factor(w),
            },
            Correction::Recoil => self.recoil.factor(w),
            Correction::Screening => self.screening.factor(w),
            Correction::Exchange => self.exchange.factor(w),
            Correction::AtomicMismatch => self.atomic_mismatch.factor(w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Branch, Correction, CorrectionPipeline, CorrectionSettings};
    use crate::common::config::{CorrectionToggles, RunConfig};
    use crate::domain::Diagnostics;
    use crate::modules::corrections::radiative::{NeutrinoRadiative, sirlin_g};
    use crate::modules::corrections::SpectralCorrection;
    use crate::modules::matrix_elements::ConfiguredMatrixElements;
    use crate::modules::transition::NuclearParameters;
    use std::collections::HashSet;

    const DECK: &str = r#"
[transition]
process = "B+"
type = "Fermi"
q_value = 4000.0

[mother]
z = 12
a = 22
spin_parity = 0

[daughter]
z = 11
a = 22
spin_parity = 0

[spectrum]
weak_magnetism = 0.0
induced_tensor = 0.0
lambda = 0.0
"#;

    fn build_pipeline(settings: CorrectionSettings) -> CorrectionPipeline {
        let config = RunConfig::from_toml_str("pipeline", DECK).expect("deck should parse");
        let parameters = NuclearParameters::build(
            &config,
            &ConfiguredMatrixElements::default(),
            None,
            &mut Diagnostics::new(),
        )
        .expect("parameters should build");
        CorrectionPipeline::new(parameters, settings)
    }

    #[test]
    fn order_lists_every_correction_once() {
        let seen = Correction::ORDER.into_iter().collect::<HashSet<_>>();
        assert_eq!(seen.len(), 13);
        assert_eq!(Correction::ORDER[0], Correction::PhaseSpace);
        assert_eq!(Correction::ORDER[12], Correction::AtomicMismatch);
    }

    #[test]
    fn toggles_select_enabled_corrections_in_order() {
        let settings = CorrectionSettings {
            toggles: CorrectionToggles {
                screening: false,
                radiative: false,
                ..CorrectionToggles::all()
            },
            ..CorrectionSettings::default()
        };
        let pipeline = build_pipeline(settings);
        assert_eq!(pipeline.enabled().len(), 11);
        assert!(!pipeline.enabled().contains(&Correction::Screening));
        assert_eq!(pipeline.enabled()[2], Correction::ShapeFactor);

        let only = build_pipeline(CorrectionSettings::phase_space_only());
        assert_eq!(only.enabled(), &[Correction::PhaseSpace]);
    }

    #[test]
    fn radiative_branch_selects_lepton_function() {
        let pipeline = build_pipeline(CorrectionSettings::default());
        let w0 = pipeline.parameters().w0();
        let electron = pipeline.factor(Correction::Radiative, 2.0, Branch::Electron);
        let neutrino = pipeline.factor(Correction::Radiative, 2.0, Branch::Neutrino);
        assert_eq!(neutrino, NeutrinoRadiative.factor(2.0));
        assert_ne!(electron, neutrino);
        assert!(sirlin_g(2.0, w0).is_finite());
    }

    #[test]
    fn positron_transition_has_no_exchange() {
        let pipeline = build_pipeline(CorrectionSettings::default());
        for w in [1.01, 2.0, 4.0] {
            assert_eq!(pipeline.factor(Correction::Exchange, w, Branch::Electron), 1.0);
            assert_eq!(pipeline.factor(Correction::Exchange, w, Branch::Neutrino), 1.0);
        }
    }
}
