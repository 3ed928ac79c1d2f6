//! Grid cell symbols.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use qgrid_ir::{GateCatalog, StandardGate};

/// The content of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Empty cell (`0`).
    Empty,
    /// A catalog gate (`X`, `Y`, `Z`, `H`, `S`, `T`, `I`).
    Gate(StandardGate),
    /// Control, active on |1⟩ (`c`).
    Control,
    /// Anticontrol, active on |0⟩ (`ac`).
    Anticontrol,
    /// One end of a swap (`sw`).
    Swap,
    /// Measurement probe (`M`).
    Measure,
    /// Visual-only barrier (`b`).
    Barrier,
    /// Anything else. Kept so it can be reported, never emitted.
    Unknown(String),
}

impl Symbol {
    /// Parse a cell. Never fails: unrecognised text becomes [`Symbol::Unknown`].
    pub fn parse(text: &str) -> Self {
        match text {
            "0" => Symbol::Empty,
            "c" => Symbol::Control,
            "ac" => Symbol::Anticontrol,
            "sw" => Symbol::Swap,
            "M" => Symbol::Measure,
            "b" => Symbol::Barrier,
            other => GateCatalog::global()
                .lookup(other)
                .map_or_else(|| Symbol::Unknown(other.to_string()), Symbol::Gate),
        }
    }

    /// The text form used in requests.
    pub fn as_str(&self) -> &str {
        match self {
            Symbol::Empty => "0",
            Symbol::Gate(gate) => gate.symbol(),
            Symbol::Control => "c",
            Symbol::Anticontrol => "ac",
            Symbol::Swap => "sw",
            Symbol::Measure => "M",
            Symbol::Barrier => "b",
            Symbol::Unknown(text) => text,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cells arrive as strings, or as bare numbers for empty cells.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSymbol {
    Text(String),
    Integer(i64),
    Float(f64),
    Null(()),
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSymbol::deserialize(deserializer)? {
            RawSymbol::Text(text) => Symbol::parse(&text),
            RawSymbol::Integer(0) | RawSymbol::Null(()) => Symbol::Empty,
            RawSymbol::Integer(n) => Symbol::Unknown(n.to_string()),
            RawSymbol::Float(x) if x == 0.0 => Symbol::Empty,
            RawSymbol::Float(x) => Symbol::Unknown(x.to_string()),
        })
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
