//! Per-transition nuclear parameters.
//!
//! [`NuclearParameters::build`] turns a validated [`RunConfig`] into the
//! immutable data every correction reads: radius and endpoint in natural
//! units, coupling constants, matrix-element form factors, charge-shape
//! parameters and the atomic tables.

pub mod exchange;
pub mod l0;
pub mod shape;

pub use exchange::{ExchangeParameterTable, ExchangeParameters, ExchangeTableError};
pub use l0::{L0CoefficientTable, L0Coefficients};
pub use shape::{ShapeExpansion, UNIFORM_SPHERE_EXPANSION, resolve_shape_expansion};

use crate::common::config::{ConfigError, RunConfig, require};
use crate::common::constants::{
    DEFAULT_RADIUS_PARAMETER_FM, ELECTRON_MASS_KEV, NATURAL_LENGTH, NUCLEON_MASS_ME,
    fermi_to_natural,
};
use crate::domain::{BetaType, BsgError, BsgResult, ChargeShape, DecayType, Diagnostics};
use crate::modules::matrix_elements::{
    DerivedMatrixElements, MatrixElementOverrides, MatrixElementProvider, SingleParticleState,
    derive_matrix_elements,
};
use crate::numerics::fit_modified_gaussian;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Couplings {
    pub g_a: f64,
    pub g_p: f64,
    pub g_m: f64,
}

/// Immutable description of one β transition.
///
/// Energies are total energies in units of the electron mass and lengths are
/// in units of ħ/(mₑc) unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuclearParameters {
    z: i32,
    a: i32,
    mother_z: i32,
    radius: f64,
    mother_spin_parity: i32,
    daughter_spin_parity: i32,
    mother_beta2: f64,
    mother_beta4: f64,
    daughter_beta2: f64,
    daughter_beta4: f64,
    beta_type: BetaType,
    decay_type: DecayType,
    couplings: Couplings,
    q_value: f64,
    atomic_energy_deficit: f64,
    mother_excitation_energy: f64,
    daughter_excitation_energy: f64,
    w0: f64,
    ho_fit: f64,
    electrostatic_shape: ChargeShape,
    nuclear_structure_shape: ChargeShape,
    shape_expansion: Option<ShapeExpansion>,
    l0: L0CoefficientTable,
    exchange: ExchangeParameters,
    matrix_elements: DerivedMatrixElements,
    single_particle_states: Option<(SingleParticleState, SingleParticleState)>,
}

impl NuclearParameters {
    /// Builds the transition from a validated configuration.
    ///
    /// Only a truly absent required option or an endpoint `W0 ≤ 1` fails;
    /// inconsistent inputs and degenerate matrix elements are recorded in
    /// `diagnostics` and replaced by safe defaults.
    pub fn build(
        config: &RunConfig,
        provider: &dyn MatrixElementProvider,
        exchange_table: Option<&ExchangeParameterTable>,
        diagnostics: &mut Diagnostics,
    ) -> BsgResult<Self> {
        let z = require("daughter.z", config.daughter.z)?;
        let a = require("daughter.a", config.daughter.a)?;
        let mother_z = require("mother.z", config.mother.z)?;
        let mother_a = require("mother.a", config.mother.a)?;
        let mother_spin_parity = require("mother.spin_parity", config.mother.spin_parity)?;
        let daughter_spin_parity = require("daughter.spin_parity", config.daughter.spin_parity)?;
        let process = require("transition.process", config.transition.process.as_deref())?;
        let type_name = require("transition.type", config.transition.decay_type.as_deref())?;
        let q_value = require("transition.q_value", config.transition.q_value)?;

        let radius = nuclear_radius(config.daughter.radius, a);
        if !(radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "daughter.radius",
                reason: format!("derived radius {radius} must be positive"),
            }
            .into());
        }
        if config.daughter.radius == 0.0 {
            tracing::debug!("radius not given, using 1.2·A^(1/3) fm");
        }

        let beta_type = BetaType::from_process(process);
        let decay_type = parse_decay_type(type_name, config.transition.mixing_ratio)?;

        if mother_a != a {
            diagnostics.error(
                "TRANSITION.MASS_MISMATCH",
                format!("mother and daughter mass numbers differ ({mother_a} vs {a})"),
            );
        }
        if mother_z + beta_type.sign() != z {
            diagnostics.error(
                "TRANSITION.CHARGE_MISMATCH",
                format!(
                    "daughter Z={z} cannot be reached from mother Z={mother_z} through {beta_type} decay"
                ),
            );
        }

        let atomic_energy_deficit = config.transition.atomic_energy_deficit;
        let mother_excitation_energy = config.mother.excitation_energy;
        let daughter_excitation_energy = config.daughter.excitation_energy;
        let w0 = endpoint_energy(
            q_value - atomic_energy_deficit + mother_excitation_energy
                - daughter_excitation_energy,
            beta_type,
            a,
        );
        if !(w0 > 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "transition.q_value",
                reason: format!("endpoint total energy W0 = {w0} must exceed 1"),
            }
            .into());
        }

        let ho_fit = match config.spectrum.mod_gauss_fit {
            Some(h) => h,
            None => fit_modified_gaussian(z, radius * (3.0_f64 / 5.0).sqrt()),
        };
        let shape_expansion = resolve_shape_expansion(
            config.spectrum.es_shape,
            ho_fit,
            config.spectrum.v_old.as_deref(),
            config.spectrum.v_new.as_deref(),
            diagnostics,
        );

        let l0 = L0CoefficientTable::for_charge(z);
        let exchange = if config.corrections.exchange {
            exchange_parameters(exchange_table, z - beta_type.sign(), diagnostics)
        } else {
            ExchangeParameters::default()
        };

        let single_particle_states = if config.spectrum.connect {
            let states = provider.single_particle_states();
            if states.is_none() {
                diagnostics.error(
                    "MATRIX.MISSING_STATES",
                    "connect mode requested but no single-particle states are available; using shell filling",
                );
            }
            states
        } else {
            None
        };

        let couplings = Couplings {
            g_a: config.couplings.g_a,
            g_p: config.couplings.g_p,
            g_m: config.couplings.g_m,
        };
        let matrix_elements = derive_matrix_elements(
            MatrixElementOverrides::from_spectrum(&config.spectrum),
            provider,
            couplings.g_a,
            a,
            diagnostics,
        );

        tracing::debug!(z, a, radius, w0, ho_fit, "nuclear parameters initialised");

        Ok(Self {
            z,
            a,
            mother_z,
            radius,
            mother_spin_parity,
            daughter_spin_parity,
            mother_beta2: config.mother.beta2,
            mother_beta4: config.mother.beta4,
            daughter_beta2: config.daughter.beta2,
            daughter_beta4: config.daughter.beta4,
            beta_type,
            decay_type,
            couplings,
            q_value,
            atomic_energy_deficit,
            mother_excitation_energy,
            daughter_excitation_energy,
            w0,
            ho_fit,
            electrostatic_shape: config.spectrum.es_shape,
            nuclear_structure_shape: config.spectrum.ns_shape,
            shape_expansion,
            l0,
            exchange,
            matrix_elements,
            single_particle_states,
        })
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn a(&self) -> i32 {
        self.a
    }

    pub fn mother_z(&self) -> i32 {
        self.mother_z
    }

    /// Nuclear radius in units of ħ/(mₑc).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mother_spin_parity(&self) -> i32 {
        self.mother_spin_parity
    }

    pub fn daughter_spin_parity(&self) -> i32 {
        self.daughter_spin_parity
    }

    pub fn mother_beta2(&self) -> f64 {
        self.mother_beta2
    }

    pub fn mother_beta4(&self) -> f64 {
        self.mother_beta4
    }

    pub fn daughter_beta2(&self) -> f64 {
        self.daughter_beta2
    }

    pub fn daughter_beta4(&self) -> f64 {
        self.daughter_beta4
    }

    pub fn beta_type(&self) -> BetaType {
        self.beta_type
    }

    pub fn decay_type(&self) -> DecayType {
        self.decay_type
    }

    pub fn couplings(&self) -> Couplings {
        self.couplings
    }

    /// keV
    pub fn q_value(&self) -> f64 {
        self.q_value
    }

    /// keV
    pub fn atomic_energy_deficit(&self) -> f64 {
        self.atomic_energy_deficit
    }

    pub fn mother_excitation_energy(&self) -> f64 {
        self.mother_excitation_energy
    }

    pub fn daughter_excitation_energy(&self) -> f64 {
        self.daughter_excitation_energy
    }

    /// Endpoint total energy, corrected for nuclear recoil.
    pub fn w0(&self) -> f64 {
        self.w0
    }

    pub fn ho_fit(&self) -> f64 {
        self.ho_fit
    }

    pub fn electrostatic_shape(&self) -> ChargeShape {
        self.electrostatic_shape
    }

    pub fn nuclear_structure_shape(&self) -> ChargeShape {
        self.nuclear_structure_shape
    }

    pub fn shape_expansion(&self) -> Option<&ShapeExpansion> {
        self.shape_expansion.as_ref()
    }

    pub fn l0(&self) -> &L0CoefficientTable {
        &self.l0
    }

    pub fn exchange(&self) -> &ExchangeParameters {
        &self.exchange
    }

    pub fn matrix_elements(&self) -> &DerivedMatrixElements {
        &self.matrix_elements
    }

    pub fn single_particle_states(&self) -> Option<(SingleParticleState, SingleParticleState)> {
        self.single_particle_states
    }

    /// Nuclear mass in units of the electron mass, approximated by `A·m_N`.
    pub fn nuclear_mass(&self) -> f64 {
        f64::from(self.a) * NUCLEON_MASS_ME
    }
}

/// Nuclear radius in natural units.
///
/// A non-zero `radius_fm` is an rms charge radius and is scaled to the
/// equivalent uniform sphere; zero selects `1.2·A^(1/3)` fm.
pub fn nuclear_radius(radius_fm: f64, mass_number: i32) -> f64 {
    if radius_fm != 0.0 {
        fermi_to_natural(radius_fm) * (5.0_f64 / 3.0).sqrt()
    } else {
        DEFAULT_RADIUS_PARAMETER_FM * f64::from(mass_number).cbrt() * 1.0e-15 / NATURAL_LENGTH
    }
}

/// Endpoint total energy for an available kinetic energy `energy_kev`,
/// including the recoil shift `(W0² - 1)/(2M)`.
pub fn endpoint_energy(energy_kev: f64, beta_type: BetaType, mass_number: i32) -> f64 {
    let w0 = energy_kev / ELECTRON_MASS_KEV + beta_type.sign_f64();
    w0 - (w0 * w0 - 1.0) / 2.0 / f64::from(mass_number) / NUCLEON_MASS_ME
}

/// Loads the exchange table named by `exchange_data` when the exchange
/// correction is enabled. Read and parse failures are recovered as warnings.
pub fn load_exchange_table(
    config: &RunConfig,
    diagnostics: &mut Diagnostics,
) -> Option<ExchangeParameterTable> {
    if !config.corrections.exchange {
        return None;
    }
    let path = config.exchange_data.as_deref()?;
    match ExchangeParameterTable::load(path) {
        Ok(table) => {
            tracing::debug!(path = %path.display(), rows = table.len(), "loaded exchange table");
            Some(table)
        }
        Err(error) => {
            diagnostics.recovered(&BsgError::from(error));
            None
        }
    }
}

fn parse_decay_type(type_name: &str, mixing_ratio: Option<f64>) -> Result<DecayType, ConfigError> {
    let type_name = type_name.trim();
    if type_name.eq_ignore_ascii_case("fermi") {
        Ok(DecayType::Fermi)
    } else if type_name.eq_ignore_ascii_case("gamow-teller") {
        Ok(DecayType::GamowTeller)
    } else {
        let mixing_ratio = require("transition.mixing_ratio", mixing_ratio)?;
        Ok(DecayType::Mixed { mixing_ratio })
    }
}

fn exchange_parameters(
    table: Option<&ExchangeParameterTable>,
    z: i32,
    diagnostics: &mut Diagnostics,
) -> ExchangeParameters {
    match table.and_then(|table| table.lookup(z)) {
        Some(parameters) => parameters,
        None => {
            let reason = if table.is_some() {
                format!("no exchange parameters for Z={z}")
            } else {
                "no exchange table loaded".to_string()
            };
            diagnostics.warn(
                "EXCHANGE.MISSING",
                format!("{reason}; the exchange correction is disabled"),
            );
            ExchangeParameters::default()
        }
    }
}
