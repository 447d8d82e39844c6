//! Single-qubit gate library.
//!
//! Gates are plain 2×2 complex matrices. The eight fixed gates are named by
//! [`GateKind`]; rotations are built on demand and are unitary for every finite angle.
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

use nalgebra::Matrix2;
use num_complex::Complex64 as C64;

use super::state::{c, NORM_TOLERANCE};
use crate::core::error::{QuantumError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gate {
    m: Matrix2<C64>,
}

impl Gate {
    /// Accepts a caller-supplied matrix only if it is unitary within tolerance.
    pub fn try_new_unitary(m: Matrix2<C64>) -> Result<Self> {
        let gate = Gate { m };
        let deviation = gate.unitarity_deviation();
        if !gate.is_unitary(NORM_TOLERANCE) {
            return Err(QuantumError::NonUnitaryGate { deviation });
        }
        Ok(gate)
    }

    #[inline]
    fn from_rows(m00: C64, m01: C64, m10: C64, m11: C64) -> Self {
        Gate { m: Matrix2::new(m00, m01, m10, m11) }
    }

    pub fn matrix(&self) -> &Matrix2<C64> {
        &self.m
    }

    /// Entry at (row, col); both must be 0 or 1.
    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> C64 {
        self.m[(row, col)]
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Gate {
        Gate { m: self.m.adjoint() }
    }

    /// ‖U·U† − I‖∞ (largest entry magnitude). Infinite when any entry is
    /// NaN or infinite.
    pub fn unitarity_deviation(&self) -> f64 {
        if self.m.iter().any(|z| !z.is_finite()) {
            return f64::INFINITY;
        }
        (self.m * self.m.adjoint() - Matrix2::<C64>::identity())
            .iter()
            .map(|z| z.norm())
            .fold(0.0_f64, f64::max)
    }

    pub fn is_unitary(&self, tol: f64) -> bool {
        let deviation = self.unitarity_deviation();
        deviation.is_finite() && deviation <= tol
    }

    /// Gate equivalent to applying `self`, then `next` (matrix `next · self`).
    pub fn then(&self, next: &Gate) -> Gate {
        Gate { m: next.m * self.m }
    }

    pub fn rx(theta: f64) -> Self {
        let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
        Self::from_rows(c(c0, 0.0), c(0.0, -s0), c(0.0, -s0), c(c0, 0.0))
    }

    pub fn ry(theta: f64) -> Self {
        let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
        Self::from_rows(c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0))
    }

    pub fn rz(theta: f64) -> Self {
        let e_m = C64::from_polar(1.0, -theta / 2.0);
        let e_p = C64::from_polar(1.0, theta / 2.0);
        Self::from_rows(e_m, c(0.0, 0.0), c(0.0, 0.0), e_p)
    }

    /// diag(1, e^{iφ}). S and T are `phase(π/2)` and `phase(π/4)`.
    pub fn phase(phi: f64) -> Self {
        Self::from_rows(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), C64::from_polar(1.0, phi))
    }
}

/// The fixed gate set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    T,
    Sdg,
    Tdg,
}

impl GateKind {
    pub const ALL: [GateKind; 8] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::Sdg,
        GateKind::Tdg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::S => "s",
            GateKind::T => "t",
            GateKind::Sdg => "sdg",
            GateKind::Tdg => "tdg",
        }
    }

    /// Case-insensitive; accepts `s†`/`t†` as well as `sdg`/`tdg`.
    pub fn from_name(name: &str) -> Option<GateKind> {
        let lower = name.trim().to_ascii_lowercase();
        let kind = match lower.as_str() {
            "h" => GateKind::H,
            "x" => GateKind::X,
            "y" => GateKind::Y,
            "z" => GateKind::Z,
            "s" => GateKind::S,
            "t" => GateKind::T,
            "sdg" | "s†" | "sdag" => GateKind::Sdg,
            "tdg" | "t†" | "tdag" => GateKind::Tdg,
            _ => return None,
        };
        Some(kind)
    }

    pub fn gate(self) -> Gate {
        let z = c(0.0, 0.0);
        let one = c(1.0, 0.0);
        match self {
            GateKind::H => {
                let s = c(FRAC_1_SQRT_2, 0.0);
                Gate::from_rows(s, s, s, -s)
            }
            GateKind::X => Gate::from_rows(z, one, one, z),
            GateKind::Y => Gate::from_rows(z, c(0.0, -1.0), c(0.0, 1.0), z),
            GateKind::Z => Gate::from_rows(one, z, z, -one),
            GateKind::S => Gate::from_rows(one, z, z, c(0.0, 1.0)),
            GateKind::T => Gate::from_rows(one, z, z, C64::from_polar(1.0, FRAC_PI_4)),
            GateKind::Sdg => Gate::from_rows(one, z, z, c(0.0, -1.0)),
            GateKind::Tdg => Gate::from_rows(one, z, z, C64::from_polar(1.0, -FRAC_PI_4)),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name → gate lookup table for the fixed gate set.
pub fn gate_table() -> Vec<(&'static str, Gate)> {
    GateKind::ALL.iter().map(|k| (k.name(), k.gate())).collect()
}

pub fn lookup(name: &str) -> Option<Gate> {
    GateKind::from_name(name).map(GateKind::gate)
}

pub fn h() -> Gate { GateKind::H.gate() }
pub fn x() -> Gate { GateKind::X.gate() }
pub fn y() -> Gate { GateKind::Y.gate() }
pub fn z() -> Gate { GateKind::Z.gate() }
pub fn s() -> Gate { GateKind::S.gate() }
pub fn t() -> Gate { GateKind::T.gate() }
pub fn sdg() -> Gate { GateKind::Sdg.gate() }
pub fn tdg() -> Gate { GateKind::Tdg.gate() }

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: &Gate, b: &Gate) -> bool {
        (a.matrix() - b.matrix()).iter().all(|z| z.norm() < 1e-12)
    }

    #[test]
    fn every_fixed_gate_is_unitary() {
        for (name, g) in gate_table() {
            assert!(g.is_unitary(1e-9), "{name} deviates by {}", g.unitarity_deviation());
        }
    }

    #[test]
    fn daggers_are_adjoints() {
        assert!(close(&sdg(), &s().adjoint()));
        assert!(close(&tdg(), &t().adjoint()));
    }

    #[test]
    fn t_squared_is_s() {
        assert!(close(&t().then(&t()), &s()));
        assert!(close(&Gate::phase(FRAC_PI_2), &s()));
    }

    #[test]
    fn rotations_are_unitary() {
        for k in 0..16 {
            let theta = k as f64 * PI / 7.0;
            assert!(Gate::rx(theta).is_unitary(1e-9));
            assert!(Gate::ry(theta).is_unitary(1e-9));
            assert!(Gate::rz(theta).is_unitary(1e-9));
            assert!(Gate::phase(theta).is_unitary(1e-9));
        }
    }

    #[test]
    fn non_finite_matrices_are_not_unitary() {
        assert!(!Gate::rx(f64::NAN).is_unitary(1e-9));
        assert!(!Gate::rz(f64::INFINITY).is_unitary(1e-9));
        assert_eq!(Gate::ry(f64::NAN).unitarity_deviation(), f64::INFINITY);
        let m = Matrix2::new(c(f64::NAN, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0));
        assert!(matches!(
            Gate::try_new_unitary(m),
            Err(QuantumError::NonUnitaryGate { .. })
        ));
    }

    #[test]
    fn try_new_unitary_rejects_scaled_identity() {
        let m = Matrix2::new(c(2.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(2.0, 0.0));
        assert!(matches!(Gate::try_new_unitary(m), Err(QuantumError::NonUnitaryGate { .. })));
        assert!(Gate::try_new_unitary(*h().matrix()).is_ok());
    }

    #[test]
    fn names_round_trip_through_lookup() {
        for kind in GateKind::ALL {
            assert_eq!(GateKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(GateKind::from_name("S†"), Some(GateKind::Sdg));
        assert_eq!(GateKind::from_name("TDG"), Some(GateKind::Tdg));
        assert!(lookup("cnot").is_none());
    }
}
