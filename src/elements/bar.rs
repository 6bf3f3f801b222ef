//! Bar element - an axial-only member between two nodes

use serde::{Deserialize, Serialize};

use crate::error::{TrussError, TrussResult};
use crate::geom::Segment;
use crate::math::Matrix;

/// An axial-only (pin-jointed) bar connecting two nodes.
///
/// Nodes are referenced by id, not held by reference; the owning
/// [`Structure`](crate::model::Structure) resolves them. Geometry is
/// derived from the node positions, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    /// Unique positive identifier within a structure
    pub id: usize,
    /// Id of the start node
    pub start_node: usize,
    /// Id of the end node
    pub end_node: usize,
    /// Cross-section area, strictly positive
    pub cross_section: f64,
    /// Young (elasticity) modulus, strictly positive
    pub young_modulus: f64,
}

impl Bar {
    /// Create a bar between the nodes with ids `start_node` and `end_node`.
    ///
    /// Rejects a bar connecting a node to itself and non-positive section
    /// or modulus values.
    pub fn new(
        id: usize,
        start_node: usize,
        end_node: usize,
        cross_section: f64,
        young_modulus: f64,
    ) -> TrussResult<Self> {
        if start_node == end_node {
            return Err(TrussError::DegenerateBar(id));
        }
        if cross_section <= 0.0 {
            return Err(TrussError::NonPositiveCrossSection {
                bar: id,
                value: cross_section,
            });
        }
        if young_modulus <= 0.0 {
            return Err(TrussError::NonPositiveYoungModulus {
                bar: id,
                value: young_modulus,
            });
        }

        Ok(Self {
            id,
            start_node,
            end_node,
            cross_section,
            young_modulus,
        })
    }

    /// The bar's 4x4 stiffness block in the global frame.
    ///
    /// DOF order is (start-x, start-y, end-x, end-y). With `c` and `s` the
    /// cosine and sine of the bar's direction angle and `k = E*A/L`, each
    /// node's 2x2 diagonal sub-block is positive and the start-end coupling
    /// sub-blocks carry the negated values, keeping the block symmetric.
    ///
    /// `geometry` must span the bar's two node positions; a zero-length
    /// segment must have been rejected before getting here.
    #[must_use]
    pub fn global_stiffness_matrix(&self, geometry: &Segment) -> Matrix {
        let direction = geometry.direction_vector();
        let eal = self.young_modulus * self.cross_section / geometry.length();
        let c = direction.cosine();
        let s = direction.sine();

        let c2 = c * c * eal;
        let s2 = s * s * eal;
        let sc = s * c * eal;

        #[rustfmt::skip]
        let data = [
             c2,  sc, -c2, -sc,
             sc,  s2, -sc, -s2,
            -c2, -sc,  c2,  sc,
            -sc, -s2,  sc,  s2,
        ];

        Matrix::from_row_slice(4, 4, &data)
    }
}
