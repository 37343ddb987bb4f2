//! Finite-size `L0` expansion coefficients.
//!
//! Each coefficient is a sixth-order polynomial in `αZ` without constant
//! term, `a_i = Σ_j b_ij·(αZ)^(j+1)`, with the tabulated `b_ij` of Wilkinson's
//! fit to the exact finite-size solutions.

use crate::common::constants::ALPHA;
use crate::domain::BetaType;
use serde::Serialize;

const B_ELECTRON: [[f64; 6]; 7] = [
    [0.115, -1.8123, 8.2498, -11.223, -14.854, 32.086],
    [-0.00062, 0.007165, 0.01841, -0.53736, 1.2691, -1.5467],
    [0.02482, -0.5975, 4.84199, -15.3374, 23.9774, -12.6534],
    [-0.14038, 3.64953, -38.8143, 172.1368, -346.708, 288.7873],
    [0.008152, -1.15664, 49.9663, -273.711, 657.6292, -603.7033],
    [1.2145, -23.9931, 149.9718, -471.2985, 662.1909, -305.6804],
    [-1.5632, 33.4192, -255.1333, 938.5297, -1641.2845, 1095.358],
];

const B_POSITRON: [[f64; 6]; 7] = [
    [0.0701, -2.572, 27.5971, -128.658, 272.264, -214.925],
    [-0.002308, 0.066463, -0.6407, 2.63606, -5.6317, 4.0011],
    [0.07936, -2.09284, 18.45462, -80.9375, 160.8384, -124.8927],
    [-0.93832, 22.02513, -197.00221, 807.1878, -1566.6077, 1156.3287],
    [4.276181, -96.82411, 835.26505, -3355.8441, 6411.3255, -4681.573],
    [-8.2135, 179.0862, -1492.1295, 5872.5362, -11038.7299, 7963.4701],
    [5.4583, -115.8922, 940.8305, -3633.9181, 6727.6296, -4795.0481],
];

/// Coefficients for one lepton charge.
///
/// `inverse` multiplies `R/W`; `polynomial[k]` multiplies `(W·R)^k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct L0Coefficients {
    pub inverse: f64,
    pub polynomial: [f64; 6],
}

impl L0Coefficients {
    fn from_table(table: &[[f64; 6]; 7], z: i32) -> Self {
        let alpha_z = ALPHA * f64::from(z);
        let mut values = [0.0; 7];
        for (value, row) in values.iter_mut().zip(table) {
            let mut power = alpha_z;
            for coefficient in row {
                *value += coefficient * power;
                power *= alpha_z;
            }
        }

        let mut polynomial = [0.0; 6];
        polynomial.copy_from_slice(&values[1..]);
        Self {
            inverse: values[0],
            polynomial,
        }
    }

    /// `a_inverse·R/W + Σ_k a_k·(W·R)^k`.
    pub fn expansion(&self, w: f64, r: f64) -> f64 {
        let wr = w * r;
        let mut sum = self.inverse * r / w;
        let mut power = 1.0;
        for coefficient in self.polynomial {
            sum += coefficient * power;
            power *= wr;
        }
        sum
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct L0CoefficientTable {
    pub electron: L0Coefficients,
    pub positron: L0Coefficients,
}

impl L0CoefficientTable {
    /// Coefficients for daughter charge `z`.
    pub fn for_charge(z: i32) -> Self {
        Self {
            electron: L0Coefficients::from_table(&B_ELECTRON, z),
            positron: L0Coefficients::from_table(&B_POSITRON, z),
        }
    }

    pub fn for_beta(&self, beta_type: BetaType) -> &L0Coefficients {
        match beta_type {
            BetaType::Electron => &self.electron,
            BetaType::Positron => &self.positron,
        }
    }
}
