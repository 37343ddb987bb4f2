use crate::domain::{ChargeShape, Diagnostics};
use serde::Serialize;
use std::f64::consts::PI;

/// Potential expansion coefficients of the uniformly charged sphere.
pub const UNIFORM_SPHERE_EXPANSION: [f64; 3] = [1.5, -0.5, 0.0];

/// Electrostatic potential expansion of the reference (`v_old`) and actual
/// (`v_new`) charge distribution, in powers of `(r/R)²`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeExpansion {
    pub v_old: [f64; 3],
    pub v_new: [f64; 3],
}

impl ShapeExpansion {
    /// Closed-form expansion for a modified-Gaussian distribution with shape parameter `h`.
    pub fn modified_gaussian(h: f64) -> Self {
        let sqrt_pi = PI.sqrt();
        let ratio = 5.0 * (2.0 + 5.0 * h) / 2.0 / (2.0 + 3.0 * h);
        Self {
            v_old: UNIFORM_SPHERE_EXPANSION,
            v_new: [
                (5.0_f64 / 2.0).sqrt() * 4.0 * (1.0 + h) * (2.0 + 5.0 * h).sqrt() / sqrt_pi
                    * (2.0 + 3.0 * h).powf(1.5),
                -4.0 / 3.0 / (3.0 * h + 2.0) / sqrt_pi * ratio.powf(1.5),
                (2.0 - 7.0 * h) / 5.0 / (3.0 * h + 2.0) / sqrt_pi * ratio.powf(5.0 / 3.0),
            ],
        }
    }

    /// `Σ_n (v_new[n] - v_old[n])·3/(2n + 3)`, the volume-averaged potential difference.
    pub fn averaged_difference(&self) -> f64 {
        self.v_new
            .iter()
            .zip(self.v_old)
            .enumerate()
            .map(|(n, (new, old))| (new - old) * 3.0 / (2.0 * n as f64 + 3.0))
            .sum()
    }
}

/// Picks the shape expansion for the electrostatic shape `es_shape`.
///
/// A modified-Gaussian shape always uses the closed forms in `h`; otherwise
/// both explicit vectors must be present. A single vector is reported and
/// ignored.
pub fn resolve_shape_expansion(
    es_shape: ChargeShape,
    h: f64,
    v_old: Option<&[f64]>,
    v_new: Option<&[f64]>,
    diagnostics: &mut Diagnostics,
) -> Option<ShapeExpansion> {
    if es_shape == ChargeShape::ModifiedGaussian {
        tracing::debug!(h, "using modified-Gaussian potential expansion");
        return Some(ShapeExpansion::modified_gaussian(h));
    }

    match (v_old.and_then(as_triplet), v_new.and_then(as_triplet)) {
        (Some(v_old), Some(v_new)) => {
            tracing::debug!(?v_old, ?v_new, "using configured potential expansion");
            Some(ShapeExpansion { v_old, v_new })
        }
        (None, None) => None,
        _ => {
            diagnostics.error(
                "CONFIG.SHAPE_EXPANSION",
                "both old and new potential expansions must be given; ignoring the expansion",
            );
            None
        }
    }
}

fn as_triplet(values: &[f64]) -> Option<[f64; 3]> {
    values.try_into().ok()
}
