//! Node element - a pin joint in the 2D plane

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Vector2};

/// A pin joint in the structure.
///
/// A node can be externally constrained per axis and carries the point
/// loads applied to it. Loads are additive: the effect of the collection is
/// the sum of its vectors, whatever their insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique positive identifier within a structure
    pub id: usize,
    /// Position of the node
    pub position: Point,
    /// Whether displacement along the X axis is externally constrained
    pub constrained_x: bool,
    /// Whether displacement along the Y axis is externally constrained
    pub constrained_y: bool,
    /// External loads applied to the node
    loads: Vec<Vector2>,
}

impl Node {
    /// Create an unconstrained node with no loads.
    #[must_use]
    pub fn new(id: usize, position: Point) -> Self {
        Self::constrained(id, position, false, false)
    }

    /// Create a node with explicit per-axis constraints.
    #[must_use]
    pub fn constrained(id: usize, position: Point, constrained_x: bool, constrained_y: bool) -> Self {
        Self {
            id,
            position,
            constrained_x,
            constrained_y,
            loads: Vec::new(),
        }
    }

    /// Create a node constrained in both axes.
    #[must_use]
    pub fn fixed(id: usize, position: Point) -> Self {
        Self::constrained(id, position, true, true)
    }

    /// Append an external load to the node.
    pub fn add_load(&mut self, load: Vector2) {
        self.loads.push(load);
    }

    /// The loads applied to the node.
    #[must_use]
    pub fn loads(&self) -> &[Vector2] {
        &self.loads
    }

    /// Number of external loads applied to the node.
    #[must_use]
    pub fn loads_count(&self) -> usize {
        self.loads.len()
    }

    /// Whether the node has at least one external load applied.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.loads.is_empty()
    }

    /// Net load: the sum of every load applied to the node.
    #[must_use]
    pub fn net_load(&self) -> Vector2 {
        self.loads
            .iter()
            .fold(Vector2::zero(), |sum, load| sum + *load)
    }

    /// Whether the node is constrained in at least one axis.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.constrained_x || self.constrained_y
    }
}
