//! Truss Solver - 2D pin-jointed truss static analysis
//!
//! This library computes the static response of 2D truss structures under
//! external point loads using the direct stiffness method, supporting:
//! - Dense `Matrix`/`Vector` primitives
//! - Cholesky, Doolittle LU and conjugate-gradient equation solvers
//! - Global system assembly and constraint elimination
//! - Displacement, strain, stress and reaction recovery
//!
//! ## Example
//! ```rust
//! use truss_solver::prelude::*;
//!
//! let mut structure = Structure::new();
//!
//! // Add nodes (two fixed supports, one free node)
//! structure.add_node(Node::fixed(1, Point::new(0.0, 0.0))).unwrap();
//! structure.add_node(Node::fixed(2, Point::new(0.0, 200.0))).unwrap();
//! structure.add_node(Node::new(3, Point::new(400.0, 200.0))).unwrap();
//!
//! // Add bars: cross section 5, Young modulus 2e7
//! structure.add_bar(Bar::new(1, 1, 2, 5.0, 2e7).unwrap()).unwrap();
//! structure.add_bar(Bar::new(2, 2, 3, 5.0, 2e7).unwrap()).unwrap();
//! structure.add_bar(Bar::new(3, 1, 3, 5.0, 2e7).unwrap()).unwrap();
//!
//! // Load the free node and solve
//! structure.add_load(3, Vector2::new(500.0, -1000.0)).unwrap();
//! let solution = structure.solve().unwrap();
//!
//! assert!(solution.nodes[2].displacement.x > 0.0);
//! assert!(solution.nodes[2].displacement.y < 0.0);
//! ```

pub mod elements;
pub mod error;
pub mod geom;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::elements::{Bar, Node};
    pub use crate::error::{TrussError, TrussResult};
    pub use crate::geom::{Point, Segment, Vector2};
    pub use crate::math::{
        cholesky_solve, conjugate_gradient_solve, doolittle_solve, Matrix, Vector,
    };
    pub use crate::model::Structure;
    pub use crate::results::{AxialState, BarSolution, NodeSolution, StructureSolution};
}
