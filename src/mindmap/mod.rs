//! Mind-map graph model and deterministic radial layout
//!
//! Mind maps visualize a chapter's concept hierarchy: one central node,
//! a ring of primary branches and short secondary spokes. Placement is a
//! fixed trigonometric formula, not a layout solver.

pub mod layout;
pub mod model;
pub mod topics;

pub use layout::{layout_branches, layout_document};
pub use model::{MindMap, MindMapEdge, MindMapNode, NodeKind, Position, RawMindMap};
pub use topics::{fallback_branches, Branch};
