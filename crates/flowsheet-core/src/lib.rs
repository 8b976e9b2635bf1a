//! Core types shared by the Flowsheet crates.
//!
//! - [`geometry`] - points, sizes and bounding boxes in diagram space
//! - [`identifier`] - typed identifiers for shapes and flows
//! - [`semantic`] - the shape and flow model produced from a flowchart sheet

pub mod geometry;
pub mod identifier;
pub mod semantic;
