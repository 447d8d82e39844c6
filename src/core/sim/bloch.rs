//! Single-qubit Bloch-sphere projection.
use num_complex::Complex64 as C64;
use serde::Serialize;

use super::state::{c, StateVector};
use crate::core::error::{QuantumError, Result};

/// Point on (or, for invalid input, off) the unit sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Polar angle θ ∈ [0, π] and azimuth φ ∈ (−π, π].
    pub fn polar_angles(&self) -> (f64, f64) {
        let theta = self.z.clamp(-1.0, 1.0).acos();
        let phi = self.y.atan2(self.x);
        (theta, phi)
    }
}

/// ⟨X⟩, ⟨Y⟩, ⟨Z⟩ for a one-qubit pure state `α|0⟩ + β|1⟩`.
///
/// Multi-qubit states are rejected; reduced single-qubit projections would
/// need a partial trace, which this engine does not do.
pub fn bloch_coords(state: &StateVector) -> Result<BlochVector> {
    if state.len() != 2 {
        return Err(QuantumError::dimension(2, state.len()));
    }
    let (alpha, beta) = (state.amplitudes()[0], state.amplitudes()[1]);
    let cross = alpha.conj() * beta;
    Ok(BlochVector {
        x: 2.0 * cross.re,
        y: 2.0 * cross.im,
        z: alpha.norm_sqr() - beta.norm_sqr(),
    })
}

/// `cos(θ/2)|0⟩ + e^{iφ} sin(θ/2)|1⟩`.
pub fn bloch_state(theta: f64, phi: f64) -> StateVector {
    let alpha = c((theta / 2.0).cos(), 0.0);
    let beta = C64::from_polar((theta / 2.0).sin(), phi);
    StateVector::from_raw(nalgebra::DVector::from_vec(vec![alpha, beta]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sim::apply::apply_single_qubit_gate;
    use crate::core::sim::gates::{h, s, x};
    use crate::core::sim::state::zero_state;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    fn near(v: BlochVector, x: f64, y: f64, z: f64) -> bool {
        (v.x - x).abs() < 1e-9 && (v.y - y).abs() < 1e-9 && (v.z - z).abs() < 1e-9
    }

    #[test]
    fn poles_and_equator() {
        let zero = zero_state(1).unwrap();
        assert!(near(bloch_coords(&zero).unwrap(), 0.0, 0.0, 1.0));
        let one = apply_single_qubit_gate(&x(), 0, &zero, 1).unwrap();
        assert!(near(bloch_coords(&one).unwrap(), 0.0, 0.0, -1.0));
        let plus = apply_single_qubit_gate(&h(), 0, &zero, 1).unwrap();
        assert!(near(bloch_coords(&plus).unwrap(), 1.0, 0.0, 0.0));
        let plus_i = apply_single_qubit_gate(&s(), 0, &plus, 1).unwrap();
        assert!(near(bloch_coords(&plus_i).unwrap(), 0.0, 1.0, 0.0));
    }

    #[test]
    fn bloch_state_inverts_projection() {
        for &(theta, phi) in &[(FRAC_PI_3, 0.4), (FRAC_PI_2, -2.0), (2.5, 3.0)] {
            let v = bloch_coords(&bloch_state(theta, phi)).unwrap();
            assert!((v.norm() - 1.0).abs() < 1e-12);
            let (t, p) = v.polar_angles();
            assert!((t - theta).abs() < 1e-9);
            assert!((p - phi).abs() < 1e-9);
        }
        assert!(near(bloch_coords(&bloch_state(PI, 0.0)).unwrap(), 0.0, 0.0, -1.0));
    }

    #[test]
    fn two_qubit_state_is_rejected() {
        let err = bloch_coords(&zero_state(2).unwrap());
        assert_eq!(err, Err(QuantumError::DimensionMismatch { expected: 2, actual: 4 }));
    }
}
