//! Statevector simulation kernels.

use num_complex::Complex64;
use std::f64::consts::PI;

use qgrid_ir::{Operation, StandardGate, WireId};

/// A statevector representing a quantum state.
///
/// Wire 0 is the most significant bit of the basis-state index.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Consume the statevector and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply an operation to the statevector.
    ///
    /// Every wire of `op` must be below `num_qubits`.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::Gate { gate, target } => self.apply_gate(*gate, *target, 0),
            Operation::ControlledGate {
                gate,
                target,
                controls,
            } => {
                let ctrl = self.control_mask(controls);
                self.apply_gate(*gate, *target, ctrl);
            }
            Operation::Swap { a, b } => self.apply_swap(*a, *b, 0),
            Operation::ControlledSwap { a, b, controls } => {
                let ctrl = self.control_mask(controls);
                self.apply_swap(*a, *b, ctrl);
            }
            Operation::Probe(_) => {
                // Probes read the state, they never change it
            }
        }
    }

    /// Basis-index bit for a wire.
    #[inline]
    fn mask(&self, wire: WireId) -> usize {
        1 << (self.num_qubits - 1 - wire.index())
    }

    fn control_mask(&self, controls: &[WireId]) -> usize {
        controls.iter().fold(0, |acc, c| acc | self.mask(*c))
    }

    fn apply_gate(&mut self, gate: StandardGate, target: WireId, ctrl: usize) {
        let qubit = self.mask(target);
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubit, ctrl),
            StandardGate::Y => self.apply_y(qubit, ctrl),
            StandardGate::Z => self.apply_phase(qubit, PI, ctrl),
            StandardGate::H => self.apply_h(qubit, ctrl),
            StandardGate::S => self.apply_phase(qubit, PI / 2.0, ctrl),
            StandardGate::T => self.apply_phase(qubit, PI / 4.0, ctrl),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    //
    // `mask` selects the target bit, `ctrl` the bits that must all be set for
    // an amplitude pair to be touched (0 means uncontrolled).
    // =========================================================================

    fn apply_x(&mut self, mask: usize, ctrl: usize) {
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 && i & ctrl == ctrl {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, mask: usize, ctrl: usize) {
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 && i & ctrl == ctrl {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_h(&mut self, mask: usize, ctrl: usize) {
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 && i & ctrl == ctrl {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, mask: usize, theta: f64, ctrl: usize) {
        let phase = Complex64::from_polar(1.0, theta);
        let required = mask | ctrl;
        for i in 0..self.amplitudes.len() {
            if i & required == required {
                self.amplitudes[i] *= phase;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_swap(&mut self, q1: WireId, q2: WireId, ctrl: usize) {
        let mask1 = self.mask(q1);
        let mask2 = self.mask(q2);
        for i in 0..self.amplitudes.len() {
            if i & ctrl != ctrl {
                continue;
            }
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], c(1.0)));
        assert!(approx_eq(sv.amplitudes[1], c(0.0)));
        assert!(approx_eq(sv.amplitudes[2], c(0.0)));
        assert!(approx_eq(sv.amplitudes[3], c(0.0)));
    }

    #[test]
    fn test_zero_wire_register() {
        let sv = Statevector::new(0);
        assert_eq!(sv.into_amplitudes(), vec![c(1.0)]);
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply(&Operation::gate(StandardGate::H, WireId(0)));

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], c(sqrt2_inv)));
        assert!(approx_eq(sv.amplitudes[1], c(sqrt2_inv)));
    }

    #[test]
    fn test_wire_zero_is_most_significant() {
        let mut sv = Statevector::new(2);
        sv.apply(&Operation::gate(StandardGate::X, WireId(0)));

        // |10⟩ → index 2
        assert!(approx_eq(sv.amplitudes[2], c(1.0)));
        assert!(approx_eq(sv.amplitudes[1], c(0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply(&Operation::gate(StandardGate::H, WireId(0)));
        sv.apply(&Operation::controlled(
            StandardGate::X,
            WireId(1),
            &[WireId(0)],
        ));

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], c(sqrt2_inv)));
        assert!(approx_eq(sv.amplitudes[1], c(0.0)));
        assert!(approx_eq(sv.amplitudes[2], c(0.0)));
        assert!(approx_eq(sv.amplitudes[3], c(sqrt2_inv)));
    }

    #[test]
    fn test_x_gate() {
        let mut sv = Statevector::new(1);
        sv.apply(&Operation::gate(StandardGate::X, WireId(0)));

        assert!(approx_eq(sv.amplitudes[0], c(0.0)));
        assert!(approx_eq(sv.amplitudes[1], c(1.0)));
    }

    #[test]
    fn test_y_gate_phase() {
        let mut sv = Statevector::new(1);
        sv.apply(&Operation::gate(StandardGate::Y, WireId(0)));

        // Y|0⟩ = i|1⟩
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn test_s_then_s_is_z() {
        let mut sv = Statevector::new(1);
        sv.apply(&Operation::gate(StandardGate::H, WireId(0)));
        sv.apply(&Operation::gate(StandardGate::S, WireId(0)));
        sv.apply(&Operation::gate(StandardGate::S, WireId(0)));
        sv.apply(&Operation::gate(StandardGate::H, WireId(0)));

        // H Z H = X
        assert!(approx_eq(sv.amplitudes[0], c(0.0)));
        assert!((sv.amplitudes[1].norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_controlled_gate_inactive_when_control_clear() {
        let mut sv = Statevector::new(2);
        sv.apply(&Operation::controlled(
            StandardGate::X,
            WireId(1),
            &[WireId(0)],
        ));
        assert!(approx_eq(sv.amplitudes[0], c(1.0)));
    }

    #[test]
    fn test_toffoli_needs_both_controls() {
        let mut sv = Statevector::new(3);
        sv.apply(&Operation::gate(StandardGate::X, WireId(0)));
        sv.apply(&Operation::controlled(
            StandardGate::X,
            WireId(2),
            &[WireId(0), WireId(1)],
        ));
        // Only wire 0 set: |100⟩ = index 4
        assert!(approx_eq(sv.amplitudes[4], c(1.0)));

        sv.apply(&Operation::gate(StandardGate::X, WireId(1)));
        sv.apply(&Operation::controlled(
            StandardGate::X,
            WireId(2),
            &[WireId(0), WireId(1)],
        ));
        // |111⟩ = index 7
        assert!(approx_eq(sv.amplitudes[7], c(1.0)));
    }

    #[test]
    fn test_swap() {
        let mut sv = Statevector::new(2);
        sv.apply(&Operation::gate(StandardGate::X, WireId(0)));
        sv.apply(&Operation::swap(WireId(0), WireId(1), &[]));

        // |10⟩ → |01⟩
        assert!(approx_eq(sv.amplitudes[1], c(1.0)));
        assert!(approx_eq(sv.amplitudes[2], c(0.0)));
    }

    #[test]
    fn test_controlled_swap() {
        let mut sv = Statevector::new(3);
        sv.apply(&Operation::gate(StandardGate::X, WireId(1)));
        sv.apply(&Operation::swap(WireId(1), WireId(2), &[WireId(0)]));
        // Control clear: still |010⟩
        assert!(approx_eq(sv.amplitudes[2], c(1.0)));

        sv.apply(&Operation::gate(StandardGate::X, WireId(0)));
        sv.apply(&Operation::swap(WireId(1), WireId(2), &[WireId(0)]));
        // |110⟩ → |101⟩
        assert!(approx_eq(sv.amplitudes[5], c(1.0)));
    }

    #[test]
    fn test_probe_is_identity() {
        let mut sv = Statevector::new(1);
        sv.apply(&Operation::gate(StandardGate::H, WireId(0)));
        let before = sv.amplitudes.clone();
        sv.apply(&Operation::probe(WireId(0), 3));
        assert_eq!(before, sv.amplitudes);
    }
}
