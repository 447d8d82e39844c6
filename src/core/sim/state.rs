//! Pure n-qubit state vectors.
//!
//! Bit ordering is little-endian: qubit `k` is bit `k` of the basis index, so
//! qubit 0 is the least-significant bit. [`bit_of`] and [`qubit_mask`] are the
//! only places that encode this; every other module goes through them.
use nalgebra::DVector;
use num_complex::Complex64 as C64;

use crate::core::error::{QuantumError, Result};

/// Tolerance for normalization and unitarity checks.
pub const NORM_TOLERANCE: f64 = 1e-9;

#[inline]
pub(crate) fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Mask selecting `qubit` inside a basis index.
#[inline]
pub fn qubit_mask(qubit: usize) -> usize {
    1usize << qubit
}

/// Value (0 or 1) of `qubit` in basis index `index`.
#[inline]
pub fn bit_of(index: usize, qubit: usize) -> usize {
    (index >> qubit) & 1
}

/// Largest qubit count whose basis indices fit in a `usize`.
pub const MAX_QUBITS: usize = usize::BITS as usize - 1;

/// Number of amplitudes for `n` qubits. Fails for `n == 0` and `n > MAX_QUBITS`.
pub fn dimension(n: usize) -> Result<usize> {
    if n < 1 {
        return Err(QuantumError::InvalidQubitCount { n });
    }
    if n > MAX_QUBITS {
        return Err(QuantumError::TooManyQubits { n, max: MAX_QUBITS });
    }
    Ok(1usize << n)
}

/// Immutable amplitude vector of length `2^n`.
///
/// There is no `&mut` access to the amplitudes: every transformation in the
/// engine builds a new `StateVector`, so a value held by a caller never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    data: DVector<C64>,
}

impl StateVector {
    /// Explicit amplitude list. Length must be a power of two ≥ 2 and the
    /// vector must already be normalized.
    pub fn from_amplitudes(amps: Vec<C64>) -> Result<Self> {
        Self::try_new(amps, false)
    }

    /// Like [`StateVector::from_amplitudes`], but rescales a non-normalized
    /// vector when `auto_normalize` is set. A zero vector is always rejected.
    pub fn try_new(amps: Vec<C64>, auto_normalize: bool) -> Result<Self> {
        let len = amps.len();
        if len < 2 || !len.is_power_of_two() {
            let expected = len.max(2).next_power_of_two();
            return Err(QuantumError::dimension(expected, len));
        }
        let mut v = DVector::from_vec(amps);
        let total = total_probability(v.as_slice());
        if (total - 1.0).abs() <= NORM_TOLERANCE {
            Ok(Self { data: v })
        } else if auto_normalize {
            if total <= NORM_TOLERANCE || !total.is_finite() {
                return Err(QuantumError::NormalizationViolation { norm: total });
            }
            v /= c(total.sqrt(), 0.0);
            Ok(Self { data: v })
        } else {
            Err(QuantumError::NormalizationViolation { norm: total })
        }
    }

    /// Build from engine-computed amplitudes. Callers inside the engine are
    /// responsible for keeping the length a power of two.
    pub(crate) fn from_raw(data: DVector<C64>) -> Self {
        Self { data }
    }

    pub fn amplitudes(&self) -> &[C64] {
        self.data.as_slice()
    }

    pub(crate) fn raw(&self) -> &DVector<C64> {
        &self.data
    }

    pub fn amplitude(&self, index: usize) -> Option<C64> {
        self.data.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Qubit count inferred from the length.
    pub fn n_qubits(&self) -> usize {
        self.data.len().trailing_zeros() as usize
    }

    /// Sum of squared magnitudes.
    pub fn total_probability(&self) -> f64 {
        total_probability(self.amplitudes())
    }

    /// Elementwise comparison within `tol` (complex distance).
    pub fn approx_eq(&self, other: &StateVector, tol: f64) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Checks that this vector has exactly `2^n_qubits` amplitudes.
    pub fn check_dimension(&self, n_qubits: usize) -> Result<()> {
        let expected = dimension(n_qubits)?;
        if self.len() != expected {
            return Err(QuantumError::dimension(expected, self.len()));
        }
        Ok(())
    }
}

fn total_probability(amps: &[C64]) -> f64 {
    amps.iter().map(|z| z.norm_sqr()).sum()
}

/// `|0…0⟩` for `n` qubits.
pub fn zero_state(n: usize) -> Result<StateVector> {
    basis_state(n, 0)
}

/// Computational basis state `|index⟩` for `n` qubits.
pub fn basis_state(n: usize, index: usize) -> Result<StateVector> {
    let dim = dimension(n)?;
    if index >= dim {
        return Err(QuantumError::InvalidBasisIndex { index, dim });
    }
    let mut data = DVector::from_element(dim, c(0.0, 0.0));
    data[index] = c(1.0, 0.0);
    Ok(StateVector { data })
}

/// Fails with `NormalizationViolation` when total probability drifts from 1
/// or is not a finite number.
pub fn check_normalized(state: &StateVector) -> Result<()> {
    let total = state.total_probability();
    if !total.is_finite() || (total - 1.0).abs() > NORM_TOLERANCE {
        return Err(QuantumError::NormalizationViolation { norm: total });
    }
    Ok(())
}

/// Normalization check that only runs in debug builds.
#[inline]
pub(crate) fn debug_check(state: StateVector) -> Result<StateVector> {
    #[cfg(debug_assertions)]
    check_normalized(&state)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_puts_all_weight_on_index_zero() {
        for n in 1..=6 {
            let psi = zero_state(n).unwrap();
            assert_eq!(psi.len(), 1 << n);
            assert_eq!(psi.n_qubits(), n);
            assert_eq!(psi.amplitude(0), Some(c(1.0, 0.0)));
            assert!(psi.amplitudes()[1..].iter().all(|z| z.norm() == 0.0));
        }
    }

    #[test]
    fn zero_qubits_is_rejected() {
        assert_eq!(zero_state(0), Err(QuantumError::InvalidQubitCount { n: 0 }));
    }

    #[test]
    fn oversized_registers_are_rejected() {
        assert_eq!(
            dimension(MAX_QUBITS + 1),
            Err(QuantumError::TooManyQubits { n: MAX_QUBITS + 1, max: MAX_QUBITS })
        );
        assert!(matches!(zero_state(usize::MAX), Err(QuantumError::TooManyQubits { .. })));
    }

    #[test]
    fn non_finite_amplitudes_fail_the_normalization_check() {
        let nan = StateVector::from_raw(DVector::from_vec(vec![c(f64::NAN, 0.0), c(0.0, 0.0)]));
        assert!(matches!(check_normalized(&nan), Err(QuantumError::NormalizationViolation { .. })));
        let inf =
            StateVector::from_raw(DVector::from_vec(vec![c(f64::INFINITY, 0.0), c(0.0, 0.0)]));
        assert!(matches!(check_normalized(&inf), Err(QuantumError::NormalizationViolation { .. })));
        assert!(StateVector::try_new(vec![c(f64::NAN, 0.0), c(1.0, 0.0)], true).is_err());
    }

    #[test]
    fn from_amplitudes_rejects_odd_lengths() {
        let err = StateVector::from_amplitudes(vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)]);
        assert_eq!(err, Err(QuantumError::DimensionMismatch { expected: 4, actual: 3 }));
        let err = StateVector::from_amplitudes(vec![c(1.0, 0.0)]);
        assert!(matches!(err, Err(QuantumError::DimensionMismatch { .. })));
    }

    #[test]
    fn from_amplitudes_rejects_unnormalized() {
        let err = StateVector::from_amplitudes(vec![c(3.0, 0.0), c(4.0, 0.0)]);
        assert!(matches!(err, Err(QuantumError::NormalizationViolation { .. })));
    }

    #[test]
    fn try_new_auto_normalizes() {
        let psi = StateVector::try_new(vec![c(3.0, 0.0), c(0.0, 4.0)], true).unwrap();
        assert!((psi.amplitudes()[0].re - 0.6).abs() < 1e-12);
        assert!((psi.amplitudes()[1].im - 0.8).abs() < 1e-12);
        assert!(check_normalized(&psi).is_ok());
    }

    #[test]
    fn try_new_rejects_zero_vector() {
        let err = StateVector::try_new(vec![c(0.0, 0.0); 4], true);
        assert!(matches!(err, Err(QuantumError::NormalizationViolation { .. })));
    }

    #[test]
    fn basis_state_checks_index() {
        let psi = basis_state(2, 3).unwrap();
        assert_eq!(psi.amplitude(3), Some(c(1.0, 0.0)));
        assert_eq!(
            basis_state(2, 4),
            Err(QuantumError::InvalidBasisIndex { index: 4, dim: 4 })
        );
    }

    #[test]
    fn check_dimension_reports_expected_length() {
        let psi = zero_state(2).unwrap();
        assert!(psi.check_dimension(2).is_ok());
        assert_eq!(
            psi.check_dimension(3),
            Err(QuantumError::DimensionMismatch { expected: 8, actual: 4 })
        );
    }

    #[test]
    fn bit_helpers_are_little_endian() {
        // index 0b110: qubit 0 = 0, qubit 1 = 1, qubit 2 = 1
        assert_eq!(bit_of(0b110, 0), 0);
        assert_eq!(bit_of(0b110, 1), 1);
        assert_eq!(bit_of(0b110, 2), 1);
        assert_eq!(qubit_mask(2), 0b100);
    }
}
