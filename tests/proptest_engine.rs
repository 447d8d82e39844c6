//! Property-based tests: invariants that must hold for arbitrary gate
//! sequences and angles.

use proptest::prelude::*;
use quantum_lab::{
    apply_cnot, apply_single_qubit_gate, bloch_coords, bloch_state, check_normalized,
    grover_diffusion, grover_oracle, probabilities, uniform_superposition, zero_state, Gate,
    GateKind,
};

#[derive(Clone, Debug)]
enum Step {
    Fixed(usize, usize),
    Rot(u8, f64, usize),
    Cnot(usize, usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..8, 0usize..6).prop_map(|(k, q)| Step::Fixed(k, q)),
        (0u8..4, -10.0f64..10.0, 0usize..6).prop_map(|(a, t, q)| Step::Rot(a, t, q)),
        (0usize..6, 0usize..6).prop_map(|(c, t)| Step::Cnot(c, t)),
    ]
}

fn gate_for(axis: u8, theta: f64) -> Gate {
    match axis {
        0 => Gate::rx(theta),
        1 => Gate::ry(theta),
        2 => Gate::rz(theta),
        _ => Gate::phase(theta),
    }
}

proptest! {
    /// Property: any composed circuit keeps total probability at 1.
    #[test]
    fn circuits_preserve_normalization(
        n in 1usize..=4,
        steps in prop::collection::vec(step(), 0..40)
    ) {
        let mut psi = zero_state(n).unwrap();
        for s in steps {
            psi = match s {
                Step::Fixed(k, q) => {
                    apply_single_qubit_gate(&GateKind::ALL[k].gate(), q % n, &psi, n).unwrap()
                }
                Step::Rot(a, t, q) => {
                    apply_single_qubit_gate(&gate_for(a, t), q % n, &psi, n).unwrap()
                }
                Step::Cnot(c, t) if n > 1 && c % n != t % n => {
                    apply_cnot(c % n, t % n, &psi, n).unwrap()
                }
                Step::Cnot(..) => psi,
            };
        }
        prop_assert!(check_normalized(&psi).is_ok());
        let total: f64 = probabilities(&psi).iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
    }

    /// Property: rotations are unitary for every angle.
    #[test]
    fn rotations_are_unitary(axis in 0u8..4, theta in -100.0f64..100.0) {
        let g = gate_for(axis, theta);
        prop_assert!(g.is_unitary(1e-9), "deviation {}", g.unitarity_deviation());
    }

    /// Property: every Bloch vector of a pure state has unit length.
    #[test]
    fn bloch_vectors_are_on_the_sphere(theta in 0.0f64..std::f64::consts::PI, phi in -3.0f64..3.0) {
        let v = bloch_coords(&bloch_state(theta, phi)).unwrap();
        prop_assert!((v.norm() - 1.0).abs() < 1e-9);
    }

    /// Property: diffusion is a reflection, so applying it twice is the identity.
    #[test]
    fn diffusion_is_an_involution(n in 1usize..=5, target in 0usize..32) {
        let psi = uniform_superposition(n).unwrap();
        let marked = grover_oracle(&psi, target % (1 << n)).unwrap();
        let twice = grover_diffusion(&grover_diffusion(&marked).unwrap()).unwrap();
        prop_assert!(twice.approx_eq(&marked, 1e-9));
    }
}
