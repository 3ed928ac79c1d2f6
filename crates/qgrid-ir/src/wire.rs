//! Wire identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of one qubit lane (one row of the authored grid).
///
/// Wires are numbered `0..N` at construction and never renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub u32);

impl WireId {
    /// The wire index as a `usize`, for indexing into per-wire storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl From<u32> for WireId {
    fn from(id: u32) -> Self {
        WireId(id)
    }
}

impl From<usize> for WireId {
    fn from(id: usize) -> Self {
        WireId(u32::try_from(id).expect("WireId overflow: exceeds u32::MAX"))
    }
}

/// Iterate over the wires `0..num_wires` in ascending order.
pub fn wires(num_wires: u32) -> impl Iterator<Item = WireId> + Clone {
    (0..num_wires).map(WireId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_display() {
        assert_eq!(format!("{}", WireId(0)), "w0");
        assert_eq!(format!("{}", WireId(12)), "w12");
    }

    #[test]
    fn test_wire_ordering() {
        let mut ws = vec![WireId(3), WireId(0), WireId(2)];
        ws.sort();
        assert_eq!(ws, vec![WireId(0), WireId(2), WireId(3)]);
    }

    #[test]
    fn test_wires_range() {
        let all: Vec<_> = wires(3).collect();
        assert_eq!(all, vec![WireId(0), WireId(1), WireId(2)]);
        assert_eq!(wires(0).count(), 0);
    }

    #[test]
    fn test_wire_serializes_as_integer() {
        let json = serde_json::to_string(&WireId(4)).unwrap();
        assert_eq!(json, "4");
    }
}
