//! Solution types: displaced geometry, strains, stresses and reactions

use serde::Serialize;

use crate::elements::{Bar, Node};
use crate::error::{TrussError, TrussResult};
use crate::geom::{make_vector_between, Point, Segment, Vector2};

/// Axial state of a bar in the solved structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxialState {
    /// The bar is stretched; it pulls its two nodes towards each other.
    Tension,
    /// The bar is shortened; it pushes its two nodes apart.
    Compression,
}

/// A node of the structure together with its computed global displacement.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSolution {
    /// Stable handle: the node's position in the solution node list.
    /// Endpoint matching uses this handle, never position equality, so two
    /// coincident nodes can never alias each other.
    index: usize,
    node: Node,
    /// Computed global displacement of the node.
    pub displacement: Vector2,
}

impl NodeSolution {
    pub(crate) fn new(index: usize, node: Node, displacement: Vector2) -> Self {
        Self {
            index,
            node,
            displacement,
        }
    }

    /// Stable handle of this node solution within its structure solution.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The original node's identifier.
    #[must_use]
    pub fn id(&self) -> usize {
        self.node.id
    }

    /// The node's position before loads are applied.
    #[must_use]
    pub fn original_position(&self) -> Point {
        self.node.position
    }

    /// The node's position once displaced by the computed solution.
    #[must_use]
    pub fn displaced_position(&self) -> Point {
        self.displaced_position_scaled(1.0)
    }

    /// The displaced position with the displacement magnified by `scale`.
    ///
    /// Scaling is for visualization only; physical quantities are always
    /// derived from the unscaled displacement.
    #[must_use]
    pub fn displaced_position_scaled(&self, scale: f64) -> Point {
        self.node.position.displaced(self.displacement, scale)
    }

    /// Whether the original node is constrained in at least one axis.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.node.is_constrained()
    }

    /// Whether the original node is constrained along the X axis.
    #[must_use]
    pub fn is_constrained_x(&self) -> bool {
        self.node.constrained_x
    }

    /// Whether the original node is constrained along the Y axis.
    #[must_use]
    pub fn is_constrained_y(&self) -> bool {
        self.node.constrained_y
    }

    /// Whether the original node carries external loads.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.node.is_loaded()
    }

    /// Net external load on the original node.
    #[must_use]
    pub fn net_load(&self) -> Vector2 {
        self.node.net_load()
    }
}

/// A bar of the structure together with its two solution nodes.
///
/// All derived quantities are computed on demand from the displaced
/// endpoint positions.
#[derive(Debug, Clone, Serialize)]
pub struct BarSolution {
    bar: Bar,
    start_node: NodeSolution,
    end_node: NodeSolution,
}

impl BarSolution {
    pub(crate) fn new(bar: Bar, start_node: NodeSolution, end_node: NodeSolution) -> Self {
        Self {
            bar,
            start_node,
            end_node,
        }
    }

    /// The original bar's identifier.
    #[must_use]
    pub fn id(&self) -> usize {
        self.bar.id
    }

    /// The original bar's cross-section area.
    #[must_use]
    pub fn cross_section(&self) -> f64 {
        self.bar.cross_section
    }

    /// The original bar's Young modulus.
    #[must_use]
    pub fn young_modulus(&self) -> f64 {
        self.bar.young_modulus
    }

    /// The bar's start node solution.
    #[must_use]
    pub fn start_node(&self) -> &NodeSolution {
        &self.start_node
    }

    /// The bar's end node solution.
    #[must_use]
    pub fn end_node(&self) -> &NodeSolution {
        &self.end_node
    }

    /// The bar's geometry before displacements are applied.
    #[must_use]
    pub fn original_geometry(&self) -> Segment {
        Segment::new(
            self.start_node.original_position(),
            self.end_node.original_position(),
        )
    }

    /// The bar's geometry after the computed displacements are applied.
    #[must_use]
    pub fn final_geometry(&self) -> Segment {
        Segment::new(
            self.start_node.displaced_position(),
            self.end_node.displaced_position(),
        )
    }

    /// The displaced geometry with displacements magnified by `scale`,
    /// for drawing solution diagrams.
    #[must_use]
    pub fn final_geometry_scaled(&self, scale: f64) -> Segment {
        Segment::new(
            self.start_node.displaced_position_scaled(scale),
            self.end_node.displaced_position_scaled(scale),
        )
    }

    /// The bar's length before displacements.
    #[must_use]
    pub fn original_length(&self) -> f64 {
        self.original_geometry().length()
    }

    /// The bar's length after displacements.
    #[must_use]
    pub fn final_length(&self) -> f64 {
        self.final_geometry().length()
    }

    /// Length change of the bar: positive when stretched, negative when
    /// shortened.
    #[must_use]
    pub fn elongation(&self) -> f64 {
        self.final_length() - self.original_length()
    }

    /// Elongation per unit of length.
    #[must_use]
    pub fn strain(&self) -> f64 {
        self.elongation() / self.original_length()
    }

    /// Axial force per unit of cross-section area, by Hooke's law.
    #[must_use]
    pub fn stress(&self) -> f64 {
        self.young_modulus() * self.strain()
    }

    /// Magnitude of the bar's internal axial force.
    #[must_use]
    pub fn internal_force(&self) -> f64 {
        self.stress() * self.cross_section()
    }

    /// Whether the bar works in tension or compression.
    #[must_use]
    pub fn axial_state(&self) -> AxialState {
        if self.stress() >= 0.0 {
            AxialState::Tension
        } else {
            AxialState::Compression
        }
    }

    /// Whether `node` is one of this bar's two end node solutions.
    #[must_use]
    pub fn has_node(&self, node: &NodeSolution) -> bool {
        node.index() == self.start_node.index() || node.index() == self.end_node.index()
    }

    /// The force this bar exerts on one of its two end nodes.
    ///
    /// The returned vector goes from the other endpoint's displaced
    /// position towards `node`'s displaced position, with the internal
    /// force magnitude: a bar in tension pulls both nodes towards each
    /// other, a bar in compression pushes them apart.
    pub fn force_in_node(&self, node: &NodeSolution) -> TrussResult<Vector2> {
        if node.index() == self.start_node.index() {
            return Ok(make_vector_between(
                &self.end_node.displaced_position(),
                &self.start_node.displaced_position(),
            )
            .with_length(self.internal_force()));
        }

        if node.index() == self.end_node.index() {
            return Ok(make_vector_between(
                &self.start_node.displaced_position(),
                &self.end_node.displaced_position(),
            )
            .with_length(self.internal_force()));
        }

        Err(TrussError::UnrelatedNode {
            bar: self.bar.id,
            node: node.id(),
        })
    }
}

/// The full solution of a structure: every node with its displacement and
/// every bar with its solution endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct StructureSolution {
    /// Node solutions, in the structure's node storage order.
    pub nodes: Vec<NodeSolution>,
    /// Bar solutions, in the structure's bar storage order.
    pub bars: Vec<BarSolution>,
}

impl StructureSolution {
    pub(crate) fn new(nodes: Vec<NodeSolution>, bars: Vec<BarSolution>) -> Self {
        Self { nodes, bars }
    }

    /// The reaction force the external supports exert on `node`.
    ///
    /// Unconstrained nodes have a zero reaction. For a constrained node the
    /// reaction is the sum of the forces every incident bar exerts on it,
    /// plus the opposite of its net external load. Components along
    /// unconstrained axes are masked to zero: only a constrained axis can
    /// transfer a reaction to the support.
    pub fn reaction_for_node(&self, node: &NodeSolution) -> TrussResult<Vector2> {
        if !node.is_constrained() {
            return Ok(Vector2::zero());
        }

        let mut reaction = Vector2::zero();
        for bar in self.bars.iter().filter(|bar| bar.has_node(node)) {
            reaction = reaction + bar.force_in_node(node)?;
        }

        if node.is_loaded() {
            reaction = reaction + node.net_load().opposite();
        }

        Ok(Vector2::new(
            if node.is_constrained_x() { reaction.x } else { 0.0 },
            if node.is_constrained_y() { reaction.y } else { 0.0 },
        ))
    }

    /// Axis-aligned bounding corners (min, max) of the displaced geometry,
    /// with displacements magnified by `scale` and the box grown by
    /// `margin` on every side. Renderers use this to size their viewport.
    #[must_use]
    pub fn bounds_rect(&self, margin: f64, scale: f64) -> (Point, Point) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

        for node in &self.nodes {
            let position = node.displaced_position_scaled(scale);
            min = Point::new(min.x.min(position.x), min.y.min(position.y));
            max = Point::new(max.x.max(position.x), max.y.max(position.y));
        }

        if self.nodes.is_empty() {
            return (Point::new(0.0, 0.0), Point::new(0.0, 0.0));
        }

        (
            Point::new(min.x - margin, min.y - margin),
            Point::new(max.x + margin, max.y + margin),
        )
    }

    /// Serialize the solution to a JSON string for external consumers.
    pub fn to_json(&self) -> TrussResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn node_solution(index: usize, id: usize, position: Point, disp: Vector2) -> NodeSolution {
        NodeSolution::new(index, Node::new(id, position), disp)
    }

    fn stretched_bar() -> BarSolution {
        // horizontal bar from (0,0) to (2,0), stretched by 0.5
        let start = node_solution(0, 1, Point::new(0.0, 0.0), Vector2::zero());
        let end = node_solution(1, 2, Point::new(2.0, 0.0), Vector2::new(0.5, 0.0));
        BarSolution::new(Bar::new(1, 1, 2, 2.0, 4.0).unwrap(), start, end)
    }

    #[test]
    fn elongation_strain_and_stress() {
        let bar = stretched_bar();
        assert_relative_eq!(bar.elongation(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(bar.strain(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(bar.stress(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(bar.internal_force(), 2.0, epsilon = 1e-12);
        assert_eq!(bar.axial_state(), AxialState::Tension);
    }

    #[test]
    fn force_in_node_follows_the_sign_convention() {
        let bar = stretched_bar();
        let force_in_start = bar.force_in_node(bar.start_node()).unwrap();
        let force_in_end = bar.force_in_node(bar.end_node()).unwrap();

        // positive (tension) magnitude: each force points from the other
        // endpoint towards the queried node
        assert_eq!(force_in_start, Vector2::new(-2.0, 0.0));
        assert_eq!(force_in_end, Vector2::new(2.0, 0.0));
    }

    #[test]
    fn compressed_bar_flips_the_force_direction() {
        let start = node_solution(0, 1, Point::new(0.0, 0.0), Vector2::zero());
        let end = node_solution(1, 2, Point::new(2.0, 0.0), Vector2::new(-0.5, 0.0));
        let bar = BarSolution::new(Bar::new(1, 1, 2, 2.0, 4.0).unwrap(), start, end);

        assert_eq!(bar.axial_state(), AxialState::Compression);

        // negative magnitude reverses the towards-the-node direction
        let force_in_end = bar.force_in_node(bar.end_node()).unwrap();
        assert_eq!(force_in_end, Vector2::new(-2.0, 0.0));
    }

    #[test]
    fn unrelated_node_is_rejected() {
        let bar = stretched_bar();
        let stranger = node_solution(7, 9, Point::new(0.0, 0.0), Vector2::zero());

        let result = bar.force_in_node(&stranger);
        assert!(matches!(
            result,
            Err(TrussError::UnrelatedNode { bar: 1, node: 9 })
        ));
    }

    #[test]
    fn node_matching_uses_handles_not_positions() {
        let bar = stretched_bar();
        // same position and id as the start node, different handle
        let impostor = node_solution(5, 1, Point::new(0.0, 0.0), Vector2::zero());
        assert!(!bar.has_node(&impostor));
        assert!(bar.force_in_node(&impostor).is_err());
    }

    #[test]
    fn reaction_is_zero_for_unconstrained_node() {
        let free = node_solution(0, 1, Point::new(0.0, 0.0), Vector2::new(0.1, 0.2));
        let solution = StructureSolution::new(vec![free.clone()], vec![]);
        assert_eq!(solution.reaction_for_node(&free).unwrap(), Vector2::zero());
    }

    #[test]
    fn bounds_rect_covers_displaced_nodes() {
        let a = node_solution(0, 1, Point::new(0.0, 0.0), Vector2::zero());
        let b = node_solution(1, 2, Point::new(10.0, 5.0), Vector2::new(1.0, 1.0));
        let solution = StructureSolution::new(vec![a, b], vec![]);

        let (min, max) = solution.bounds_rect(2.0, 1.0);
        assert_eq!(min, Point::new(-2.0, -2.0));
        assert_eq!(max, Point::new(13.0, 8.0));
    }
}
