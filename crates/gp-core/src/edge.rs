//! Directed road segment.

use crate::NodeId;

/// A directed edge of the city graph.
///
/// Roads are stored as two directed edges; the reverse edge carries the same
/// `distance` and the negated `elevation`, so climbing one way is descending
/// the other.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Length in distance units (grid spacing ≈ 100).
    pub distance: f64,
    /// Signed elevation change from `from` to `to`.
    pub elevation: f64,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, distance: f64, elevation: f64) -> Self {
        Self { from, to, distance, elevation }
    }

    /// The same road traversed in the opposite direction.
    #[inline]
    pub fn reversed(&self) -> Edge {
        Edge {
            from: self.to,
            to: self.from,
            distance: self.distance,
            elevation: -self.elevation,
        }
    }
}
