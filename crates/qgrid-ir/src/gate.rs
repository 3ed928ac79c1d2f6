//! Single-wire gates and the symbol catalog.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::sync::LazyLock;

/// A 2×2 unitary, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// Gates the grid can place on a single wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
}

impl StandardGate {
    /// Every catalog gate, in catalog order.
    pub const ALL: [StandardGate; 7] = [
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::T,
        StandardGate::I,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::T => "t",
        }
    }

    /// The grid symbol that places this gate.
    #[inline]
    pub fn symbol(&self) -> &'static str {
        match self {
            StandardGate::I => "I",
            StandardGate::X => "X",
            StandardGate::Y => "Y",
            StandardGate::Z => "Z",
            StandardGate::H => "H",
            StandardGate::S => "S",
            StandardGate::T => "T",
        }
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> Matrix2 {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            StandardGate::I => [[one, zero], [zero, one]],
            StandardGate::X => [[zero, one], [one, zero]],
            StandardGate::Y => [[zero, -i], [i, zero]],
            StandardGate::Z => [[one, zero], [zero, -one]],
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            StandardGate::S => [[one, zero], [zero, i]],
            StandardGate::T => [
                [one, zero],
                [zero, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)],
            ],
        }
    }
}

static CATALOG: LazyLock<GateCatalog> = LazyLock::new(|| GateCatalog {
    table: StandardGate::ALL
        .iter()
        .map(|gate| (gate.symbol(), *gate))
        .collect(),
});

/// Immutable symbol → gate table.
///
/// Built once per process on first use and never mutated afterwards.
#[derive(Debug)]
pub struct GateCatalog {
    table: FxHashMap<&'static str, StandardGate>,
}

impl GateCatalog {
    /// The process-wide catalog.
    pub fn global() -> &'static GateCatalog {
        &CATALOG
    }

    /// Look up the gate placed by `symbol`. Symbols are case-sensitive.
    #[inline]
    pub fn lookup(&self, symbol: &str) -> Option<StandardGate> {
        self.table.get(symbol).copied()
    }

    /// Number of gates in the catalog.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
