use super::SpectralCorrection;
use crate::modules::transition::NuclearParameters;

/// Statistical factor `p·W·(W0 - W)²`.
///
/// Unique first-forbidden transitions carry the extra `q² + p²` of the
/// lowest allowed lepton partial waves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSpace {
    w0: f64,
    unique_first_forbidden: bool,
}

impl PhaseSpace {
    pub fn new(w0: f64, mother_spin_parity: i32, daughter_spin_parity: i32) -> Self {
        Self {
            w0,
            unique_first_forbidden: is_unique_first_forbidden(
                mother_spin_parity,
                daughter_spin_parity,
            ),
        }
    }

    pub fn from_parameters(parameters: &NuclearParameters) -> Self {
        Self::new(
            parameters.w0(),
            parameters.mother_spin_parity(),
            parameters.daughter_spin_parity(),
        )
    }

    pub fn is_unique(&self) -> bool {
        self.unique_first_forbidden
    }
}

impl SpectralCorrection for PhaseSpace {
    fn factor(&self, w: f64) -> f64 {
        phase_space(w, self.w0, self.unique_first_forbidden)
    }
}

pub fn phase_space(w: f64, w0: f64, unique_first_forbidden: bool) -> f64 {
    let p = (w * w - 1.0).sqrt();
    let q = w0 - w;
    let allowed = p * w * q * q;
    if unique_first_forbidden {
        allowed * (q * q + p * p)
    } else {
        allowed
    }
}

/// Spins are doubled and signed by parity, with `0` read as 0⁺: ΔJ = 2
/// with a parity change.
pub fn is_unique_first_forbidden(mother_spin_parity: i32, daughter_spin_parity: i32) -> bool {
    (mother_spin_parity.abs() - daughter_spin_parity.abs()).abs() == 4
        && (mother_spin_parity >= 0) != (daughter_spin_parity >= 0)
}
