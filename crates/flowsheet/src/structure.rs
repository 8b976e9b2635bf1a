//! Structural analysis of a parsed sheet.
//!
//! [`FlowGraph`] holds the adjacency of shapes and assigns each shape a
//! column level. [`validate_flows`] decides which flows survive into the
//! exported document.

mod graph;
mod validate;

pub use graph::{FlowGraph, GraphNode};
pub use validate::validate_flows;
