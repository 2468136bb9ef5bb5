//! Mind-map node/edge types
//!
//! `RawMindMap` is the shape the generation endpoint is asked to return;
//! `MindMap` is the laid-out graph the session store holds. Regeneration
//! always replaces the whole graph, so there is no patching API here.

use serde::{Deserialize, Serialize};

/// Visual role of a node
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The single topic node at the canvas center
    Central,
    /// A main-concept branch on the primary ring
    #[default]
    Primary,
    /// A sub-concept spoke off a primary branch
    Secondary,
}

/// Canvas position
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A laid-out mind-map node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MindMapNode {
    /// Node identifier (e.g. "1", "3", "3b")
    pub id: String,
    /// Display label
    pub label: String,
    /// Short description shown on hover/expand
    #[serde(default)]
    pub description: String,
    /// Visual role
    pub kind: NodeKind,
    /// Canvas position
    pub position: Position,
}

/// A mind-map edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MindMapEdge {
    /// Edge identifier (e.g. "e1-3")
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Whether this edge leaves the central node (rendered heavier)
    pub from_center: bool,
}

/// A complete laid-out mind map
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MindMap {
    pub nodes: Vec<MindMapNode>,
    pub edges: Vec<MindMapEdge>,
}

/// Un-laid-out node as requested from the generation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: String,
    pub label: String,
    /// "central" | "primary" | "secondary"; missing means primary
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Un-laid-out edge as requested from the generation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The JSON document shape the generation endpoint is prompted to return
#[derive(Debug, Clone, Deserialize)]
pub struct RawMindMap {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

impl RawNode {
    /// Resolve the node's kind, defaulting missing/unknown types to primary
    pub fn kind(&self) -> NodeKind {
        match self.node_type.as_deref() {
            Some("central") => NodeKind::Central,
            Some("secondary") => NodeKind::Secondary,
            _ => NodeKind::Primary,
        }
    }
}
