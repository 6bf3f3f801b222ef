//! Structure model - assembly and resolution of the global system

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::elements::{Bar, Node};
use crate::error::{TrussError, TrussResult};
use crate::geom::{Segment, Vector2};
use crate::math::{cholesky_solve, Matrix, Vector};
use crate::results::{BarSolution, NodeSolution, StructureSolution};

/// Degrees of freedom per node: x and y displacement.
const DOF_PER_NODE: usize = 2;

/// A pin-jointed truss structure: a group of bars built to withstand the
/// application of external loads on its nodes.
///
/// Solving is a pure computation: every piece of solver state (degree of
/// freedom map, global matrix, load vector, displacements) lives in locals
/// of one [`solve`](Structure::solve) call, so independent structures can
/// be solved concurrently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structure {
    nodes: Vec<Node>,
    bars: Vec<Bar>,
}

impl Structure {
    /// Create an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a structure from parsed nodes and bars, validating ids and
    /// bar geometry along the way.
    pub fn from_parts(nodes: Vec<Node>, bars: Vec<Bar>) -> TrussResult<Self> {
        let mut structure = Structure::new();
        for node in nodes {
            structure.add_node(node)?;
        }
        for bar in bars {
            structure.add_bar(bar)?;
        }
        Ok(structure)
    }

    /// Add a node to the structure. Node ids must be unique.
    pub fn add_node(&mut self, node: Node) -> TrussResult<()> {
        if self.nodes.iter().any(|existing| existing.id == node.id) {
            return Err(TrussError::DuplicateNodeId(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Add a bar to the structure.
    ///
    /// Both endpoint nodes must already exist and the segment between them
    /// must have strictly positive length.
    pub fn add_bar(&mut self, bar: Bar) -> TrussResult<()> {
        if self.bars.iter().any(|existing| existing.id == bar.id) {
            return Err(TrussError::DuplicateBarId(bar.id));
        }

        let start = self.node_index(bar.start_node)?;
        let end = self.node_index(bar.end_node)?;
        let length = self.nodes[start]
            .position
            .distance_to(&self.nodes[end].position);
        if length <= 0.0 {
            return Err(TrussError::DegenerateBar(bar.id));
        }

        self.bars.push(bar);
        Ok(())
    }

    /// Append an external load to the node with the given id.
    pub fn add_load(&mut self, node_id: usize, load: Vector2) -> TrussResult<()> {
        let index = self.node_index(node_id)?;
        self.nodes[index].add_load(load);
        Ok(())
    }

    /// Number of nodes in the structure.
    #[must_use]
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of bars in the structure.
    #[must_use]
    pub fn bars_count(&self) -> usize {
        self.bars.len()
    }

    /// Total number of external loads applied to the structure's nodes.
    #[must_use]
    pub fn loads_count(&self) -> usize {
        self.nodes.iter().map(Node::loads_count).sum()
    }

    /// The structure's nodes, in storage order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The structure's bars, in storage order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Computes the solution for the structure: the displacements of the
    /// nodes under the existing loads and the stresses on each of the bars.
    pub fn solve(&self) -> TrussResult<StructureSolution> {
        let dofs = self.assign_degrees_of_freedom();
        let size = self.nodes.len() * DOF_PER_NODE;

        debug!(
            "assembling global system: {} nodes, {} bars, {} dofs",
            self.nodes.len(),
            self.bars.len(),
            size
        );

        let mut sys_matrix = self.assemble_system_matrix(size, &dofs)?;
        let mut sys_vector = self.assemble_system_vector(size, &dofs);
        self.apply_external_constraints(&mut sys_matrix, &mut sys_vector, &dofs);

        let displacements = cholesky_solve(&sys_matrix, &sys_vector)?;
        info!("solved structure with {size} degrees of freedom");

        self.make_solution(&displacements, &dofs)
    }

    /// DOF pair for each node id, following node storage order.
    fn assign_degrees_of_freedom(&self) -> HashMap<usize, (usize, usize)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, (DOF_PER_NODE * i, DOF_PER_NODE * i + 1)))
            .collect()
    }

    fn assemble_system_matrix(
        &self,
        size: usize,
        dofs: &HashMap<usize, (usize, usize)>,
    ) -> TrussResult<Matrix> {
        let mut matrix = Matrix::new(size, size);

        for bar in &self.bars {
            let bar_matrix = bar.global_stiffness_matrix(&self.bar_geometry(bar)?);

            let (start_x, start_y) = dofs[&bar.start_node];
            let (end_x, end_y) = dofs[&bar.end_node];
            let bar_dofs = [start_x, start_y, end_x, end_y];

            for (row, &row_dof) in bar_dofs.iter().enumerate() {
                for (col, &col_dof) in bar_dofs.iter().enumerate() {
                    matrix.add_to_value(row_dof, col_dof, bar_matrix.value_at(row, col));
                }
            }
        }

        Ok(matrix)
    }

    fn assemble_system_vector(
        &self,
        size: usize,
        dofs: &HashMap<usize, (usize, usize)>,
    ) -> Vector {
        let mut vector = Vector::new(size);

        for node in &self.nodes {
            let net_load = node.net_load();
            let (dof_x, dof_y) = dofs[&node.id];

            vector.add_to_value(dof_x, net_load.x);
            vector.add_to_value(dof_y, net_load.y);
        }

        vector
    }

    /// Decouples every constrained DOF from the system: its row and column
    /// become the canonical basis vector and its load entry is zeroed. The
    /// matrix stays symmetric and, with enough constraints, positive
    /// definite, which is what makes the Cholesky solve valid.
    fn apply_external_constraints(
        &self,
        matrix: &mut Matrix,
        vector: &mut Vector,
        dofs: &HashMap<usize, (usize, usize)>,
    ) {
        for node in &self.nodes {
            let (dof_x, dof_y) = dofs[&node.id];

            if node.constrained_x {
                matrix.set_identity_row(dof_x);
                matrix.set_identity_col(dof_x);
                vector.set_value(dof_x, 0.0);
            }

            if node.constrained_y {
                matrix.set_identity_row(dof_y);
                matrix.set_identity_col(dof_y);
                vector.set_value(dof_y, 0.0);
            }
        }
    }

    fn make_solution(
        &self,
        displacements: &Vector,
        dofs: &HashMap<usize, (usize, usize)>,
    ) -> TrussResult<StructureSolution> {
        let node_solutions: Vec<NodeSolution> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let (dof_x, dof_y) = dofs[&node.id];
                let displacement = Vector2::new(
                    displacements.value_at(dof_x),
                    displacements.value_at(dof_y),
                );
                NodeSolution::new(index, node.clone(), displacement)
            })
            .collect();

        let bar_solutions = self
            .bars
            .iter()
            .map(|bar| {
                let start = self.node_index(bar.start_node)?;
                let end = self.node_index(bar.end_node)?;
                Ok(BarSolution::new(
                    bar.clone(),
                    node_solutions[start].clone(),
                    node_solutions[end].clone(),
                ))
            })
            .collect::<TrussResult<Vec<_>>>()?;

        Ok(StructureSolution::new(node_solutions, bar_solutions))
    }

    fn bar_geometry(&self, bar: &Bar) -> TrussResult<Segment> {
        let start = self.node_index(bar.start_node)?;
        let end = self.node_index(bar.end_node)?;
        Ok(Segment::new(
            self.nodes[start].position,
            self.nodes[end].position,
        ))
    }

    fn node_index(&self, node_id: usize) -> TrussResult<usize> {
        self.nodes
            .iter()
            .position(|node| node.id == node_id)
            .ok_or(TrussError::NodeNotFound(node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn triangle_structure() -> Structure {
        let mut structure = Structure::new();
        structure.add_node(Node::fixed(1, Point::new(0.0, 0.0))).unwrap();
        structure.add_node(Node::fixed(2, Point::new(0.0, 200.0))).unwrap();
        structure.add_node(Node::new(3, Point::new(400.0, 200.0))).unwrap();
        structure.add_bar(Bar::new(1, 1, 2, 5.0, 2e7).unwrap()).unwrap();
        structure.add_bar(Bar::new(2, 2, 3, 5.0, 2e7).unwrap()).unwrap();
        structure.add_bar(Bar::new(3, 1, 3, 5.0, 2e7).unwrap()).unwrap();
        structure.add_load(3, Vector2::new(500.0, -1000.0)).unwrap();
        structure
    }

    #[test]
    fn counts() {
        let structure = triangle_structure();
        assert_eq!(structure.nodes_count(), 3);
        assert_eq!(structure.bars_count(), 3);
        assert_eq!(structure.loads_count(), 1);
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let mut structure = Structure::new();
        structure.add_node(Node::new(1, Point::new(0.0, 0.0))).unwrap();
        let result = structure.add_node(Node::new(1, Point::new(1.0, 1.0)));
        assert!(matches!(result, Err(TrussError::DuplicateNodeId(1))));
    }

    #[test]
    fn duplicate_bar_id_is_rejected() {
        let mut structure = Structure::new();
        structure.add_node(Node::new(1, Point::new(0.0, 0.0))).unwrap();
        structure.add_node(Node::new(2, Point::new(1.0, 0.0))).unwrap();
        structure.add_node(Node::new(3, Point::new(2.0, 0.0))).unwrap();
        structure.add_bar(Bar::new(1, 1, 2, 1.0, 1.0).unwrap()).unwrap();
        let result = structure.add_bar(Bar::new(1, 2, 3, 1.0, 1.0).unwrap());
        assert!(matches!(result, Err(TrussError::DuplicateBarId(1))));
    }

    #[test]
    fn bar_with_unknown_node_is_rejected() {
        let mut structure = Structure::new();
        structure.add_node(Node::new(1, Point::new(0.0, 0.0))).unwrap();
        let result = structure.add_bar(Bar::new(1, 1, 9, 1.0, 1.0).unwrap());
        assert!(matches!(result, Err(TrussError::NodeNotFound(9))));
    }

    #[test]
    fn bar_between_coincident_nodes_is_rejected() {
        let mut structure = Structure::new();
        structure.add_node(Node::new(1, Point::new(5.0, 5.0))).unwrap();
        structure.add_node(Node::new(2, Point::new(5.0, 5.0))).unwrap();
        let result = structure.add_bar(Bar::new(1, 1, 2, 1.0, 1.0).unwrap());
        assert!(matches!(result, Err(TrussError::DegenerateBar(1))));
    }

    #[test]
    fn load_on_unknown_node_is_rejected() {
        let mut structure = Structure::new();
        let result = structure.add_load(7, Vector2::new(1.0, 0.0));
        assert!(matches!(result, Err(TrussError::NodeNotFound(7))));
    }

    #[test]
    fn solve_displaces_loaded_node() {
        let solution = triangle_structure().solve().unwrap();

        // constrained nodes stay put
        assert_eq!(
            solution.nodes[0].original_position(),
            solution.nodes[0].displaced_position()
        );
        assert_eq!(
            solution.nodes[1].original_position(),
            solution.nodes[1].displaced_position()
        );

        // loaded node moves towards {+X, -Y}
        assert!(solution.nodes[2].displacement.x > 0.0);
        assert!(solution.nodes[2].displacement.y < 0.0);
    }

    #[test]
    fn unconstrained_structure_is_not_positive_definite() {
        let mut structure = Structure::new();
        structure.add_node(Node::new(1, Point::new(0.0, 0.0))).unwrap();
        structure.add_node(Node::new(2, Point::new(200.0, 0.0))).unwrap();
        structure.add_bar(Bar::new(1, 1, 2, 5.0, 2e7).unwrap()).unwrap();

        let result = structure.solve();
        assert!(matches!(
            result,
            Err(TrussError::NonPositiveDefinite { .. })
        ));
    }
}
