//! Structural elements: nodes and bars.

pub mod bar;
pub mod node;

pub use bar::Bar;
pub use node::Node;
