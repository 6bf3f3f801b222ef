//! Truss Solver Example - Cantilevered Triangle

use truss_solver::prelude::*;

fn main() -> TrussResult<()> {
    env_logger::init();

    println!("=== Truss Solver Example: Cantilevered Triangle ===\n");

    // Build a three-node triangle:
    //
    //     N2 -------- N3  <- load (500, -1000)
    //     |         /
    //     |       /
    //     |     /
    //     N1  /
    //     ^
    //   N1, N2 fixed
    //
    let mut structure = Structure::new();

    structure.add_node(Node::fixed(1, Point::new(0.0, 0.0)))?;
    structure.add_node(Node::fixed(2, Point::new(0.0, 200.0)))?;
    structure.add_node(Node::new(3, Point::new(400.0, 200.0)))?;

    let section = 5.0;
    let young = 2e7;
    structure.add_bar(Bar::new(1, 1, 2, section, young)?)?;
    structure.add_bar(Bar::new(2, 2, 3, section, young)?)?;
    structure.add_bar(Bar::new(3, 1, 3, section, young)?)?;

    structure.add_load(3, Vector2::new(500.0, -1000.0))?;

    let solution = structure.solve()?;

    println!("--- Node Displacements ---");
    for node in &solution.nodes {
        println!(
            "  N{}: dx = {:+.6e}, dy = {:+.6e}",
            node.id(),
            node.displacement.x,
            node.displacement.y
        );
    }

    println!("\n--- Bar Results ---");
    for bar in &solution.bars {
        let state = match bar.axial_state() {
            AxialState::Tension => "tension",
            AxialState::Compression => "compression",
        };
        println!(
            "  B{}: elongation = {:+.6e}, strain = {:+.6e}, stress = {:+.4} ({})",
            bar.id(),
            bar.elongation(),
            bar.strain(),
            bar.stress(),
            state
        );
    }

    println!("\n--- Reactions ---");
    for node in &solution.nodes {
        if node.is_constrained() {
            let reaction = solution.reaction_for_node(node)?;
            println!("  N{}: ({:+.2}, {:+.2})", node.id(), reaction.x, reaction.y);
        }
    }

    println!("\n--- Solution JSON ---");
    println!("{}", solution.to_json()?);

    Ok(())
}
