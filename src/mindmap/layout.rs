//! Fixed trigonometric placement
//!
//! The central node sits at a canonical center. Primary branch `i` of `n`
//! sits on a fixed-radius ring at angle `2π·i/n − π/2` (first branch at
//! twelve o'clock). Secondary node `j` of `m` under a branch is offset
//! from the branch angle by `(j − m/2 + 0.5)·0.4` rad at a second fixed
//! radius from its parent. No collision avoidance.

use std::collections::HashMap;
use std::f32::consts::PI;

use super::model::{MindMap, MindMapEdge, MindMapNode, NodeKind, Position, RawMindMap};
use super::topics::Branch;

/// Canvas center
pub const CENTER: Position = Position { x: 400.0, y: 300.0 };
/// Radius of the primary branch ring
pub const PRIMARY_RADIUS: f32 = 200.0;
/// Distance of secondary nodes from their parent branch
pub const SECONDARY_RADIUS: f32 = 100.0;
/// Angular spread between sibling secondary nodes (radians)
pub const SECONDARY_SPREAD: f32 = 0.4;

/// Angle of primary branch `index` out of `count` branches
pub fn branch_angle(index: usize, count: usize) -> f32 {
    (index as f32 / count.max(1) as f32) * 2.0 * PI - PI / 2.0
}

/// Angular offset of secondary `index` among `count` siblings
fn sibling_offset(index: usize, count: usize) -> f32 {
    (index as f32 - count as f32 / 2.0 + 0.5) * SECONDARY_SPREAD
}

fn primary_position(angle: f32) -> Position {
    Position { x: CENTER.x + angle.cos() * PRIMARY_RADIUS, y: CENTER.y + angle.sin() * PRIMARY_RADIUS }
}

fn secondary_position(parent_angle: f32, offset: f32) -> Position {
    let parent = primary_position(parent_angle);
    Position {
        x: parent.x + (parent_angle + offset).cos() * SECONDARY_RADIUS,
        y: parent.y + (parent_angle + offset).sin() * SECONDARY_RADIUS,
    }
}

/// Lay out a mind map from a branch table (the deterministic fallback path)
///
/// Node ids follow the `1`, `2`, `2a`, `2b`, ... scheme; edge ids are
/// `e<source>-<target>`.
pub fn layout_branches(topic: &str, branches: &[Branch]) -> MindMap {
    let mut nodes = vec![MindMapNode {
        id: "1".to_string(),
        label: topic.to_string(),
        description: String::new(),
        kind: NodeKind::Central,
        position: CENTER,
    }];
    let mut edges = Vec::new();

    for (branch_index, branch) in branches.iter().enumerate() {
        let angle = branch_angle(branch_index, branches.len());
        let branch_id = format!("{}", branch_index + 2);

        nodes.push(MindMapNode {
            id: branch_id.clone(),
            label: branch.label.clone(),
            description: String::new(),
            kind: NodeKind::Primary,
            position: primary_position(angle),
        });
        edges.push(MindMapEdge {
            id: format!("e1-{branch_id}"),
            source: "1".to_string(),
            target: branch_id.clone(),
            from_center: true,
        });

        for (sub_index, sub) in branch.subs.iter().enumerate() {
            // "2a", "2b", ...
            let sub_id = format!("{}{}", branch_id, (b'a' + sub_index as u8) as char);
            let offset = sibling_offset(sub_index, branch.subs.len());

            nodes.push(MindMapNode {
                id: sub_id.clone(),
                label: sub.clone(),
                description: String::new(),
                kind: NodeKind::Secondary,
                position: secondary_position(angle, offset),
            });
            edges.push(MindMapEdge {
                id: format!("e{branch_id}-{sub_id}"),
                source: branch_id.clone(),
                target: sub_id,
                from_center: false,
            });
        }
    }

    MindMap { nodes, edges }
}

/// Lay out a generated document (the remote path)
///
/// The first node (or any node typed "central") anchors the center;
/// secondary nodes find their parent branch through the edge list and
/// inherit its angle.
pub fn layout_document(raw: &RawMindMap, topic: &str) -> MindMap {
    let primary_ids: Vec<&str> = raw
        .nodes
        .iter()
        .enumerate()
        .filter(|(i, n)| *i != 0 && n.kind() == NodeKind::Primary)
        .map(|(_, n)| n.id.as_str())
        .collect();
    let primary_count = primary_ids.len().max(1);
    let angle_of: HashMap<&str, f32> = primary_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, branch_angle(i, primary_count)))
        .collect();

    // parent id and sibling rank for every secondary node
    let parent_of: HashMap<&str, &str> =
        raw.edges.iter().map(|e| (e.target.as_str(), e.source.as_str())).collect();
    let mut sibling_counts: HashMap<&str, usize> = HashMap::new();
    for node in raw.nodes.iter().filter(|n| n.kind() == NodeKind::Secondary) {
        if let Some(parent) = parent_of.get(node.id.as_str()) {
            *sibling_counts.entry(*parent).or_default() += 1;
        }
    }
    let mut sibling_rank: HashMap<&str, usize> = HashMap::new();

    let mut nodes = Vec::with_capacity(raw.nodes.len());
    for (index, node) in raw.nodes.iter().enumerate() {
        let (kind, position) = if index == 0 || node.kind() == NodeKind::Central {
            (NodeKind::Central, CENTER)
        } else if node.kind() == NodeKind::Primary {
            let angle = angle_of.get(node.id.as_str()).copied().unwrap_or(-PI / 2.0);
            (NodeKind::Primary, primary_position(angle))
        } else {
            let parent = parent_of.get(node.id.as_str()).copied().unwrap_or("1");
            let angle = angle_of.get(parent).copied().unwrap_or(-PI / 2.0);
            let siblings = sibling_counts.get(parent).copied().unwrap_or(1);
            let rank = sibling_rank.entry(parent).or_default();
            let offset = sibling_offset(*rank, siblings);
            *rank += 1;
            (NodeKind::Secondary, secondary_position(angle, offset))
        };

        let label =
            if kind == NodeKind::Central && node.label.is_empty() { topic.to_string() } else { node.label.clone() };
        nodes.push(MindMapNode {
            id: node.id.clone(),
            label,
            description: node.description.clone(),
            kind,
            position,
        });
    }

    let edges = raw
        .edges
        .iter()
        .map(|e| MindMapEdge {
            id: e.id.clone(),
            source: e.source.clone(),
            target: e.target.clone(),
            from_center: e.source == raw.nodes.first().map(|n| n.id.as_str()).unwrap_or("1"),
        })
        .collect();

    MindMap { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::topics::Branch;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn first_branch_points_up() {
        assert!(close(branch_angle(0, 5), -PI / 2.0));
    }

    #[test]
    fn branches_divide_the_circle() {
        let step = branch_angle(1, 4) - branch_angle(0, 4);
        assert!(close(step, PI / 2.0));
    }

    #[test]
    fn branch_layout_counts_and_center() {
        let branches = vec![
            Branch::new("A", &["a1", "a2", "a3"]),
            Branch::new("B", &["b1", "b2"]),
        ];
        let map = layout_branches("Topic", &branches);

        // 1 center + 2 primary + 5 secondary
        assert_eq!(map.nodes.len(), 8);
        assert_eq!(map.edges.len(), 7);
        assert_eq!(map.nodes[0].label, "Topic");
        assert_eq!(map.nodes[0].position, CENTER);
        assert_eq!(map.nodes[0].kind, NodeKind::Central);
    }

    #[test]
    fn primary_nodes_sit_on_the_ring() {
        let branches = vec![Branch::new("A", &[]), Branch::new("B", &[]), Branch::new("C", &[])];
        let map = layout_branches("T", &branches);

        for node in map.nodes.iter().filter(|n| n.kind == NodeKind::Primary) {
            let dx = node.position.x - CENTER.x;
            let dy = node.position.y - CENTER.y;
            assert!(close((dx * dx + dy * dy).sqrt(), PRIMARY_RADIUS));
        }
    }

    #[test]
    fn center_edges_are_flagged() {
        let branches = vec![Branch::new("A", &["a1"])];
        let map = layout_branches("T", &branches);
        assert!(map.edges.iter().find(|e| e.id == "e1-2").unwrap().from_center);
        assert!(!map.edges.iter().find(|e| e.id == "e2-2a").unwrap().from_center);
    }

    #[test]
    fn document_layout_places_secondary_near_parent() {
        let raw: RawMindMap = serde_json::from_str(
            r#"{
                "nodes": [
                    {"id": "1", "label": "T", "type": "central"},
                    {"id": "2", "label": "B1", "type": "primary"},
                    {"id": "3", "label": "B2", "type": "primary"},
                    {"id": "2a", "label": "S", "type": "secondary"}
                ],
                "edges": [
                    {"id": "e1-2", "source": "1", "target": "2"},
                    {"id": "e1-3", "source": "1", "target": "3"},
                    {"id": "e2-2a", "source": "2", "target": "2a"}
                ]
            }"#,
        )
        .unwrap();

        let map = layout_document(&raw, "T");
        let parent = map.nodes.iter().find(|n| n.id == "2").unwrap();
        let child = map.nodes.iter().find(|n| n.id == "2a").unwrap();

        let dx = child.position.x - parent.position.x;
        let dy = child.position.y - parent.position.y;
        assert!(close((dx * dx + dy * dy).sqrt(), SECONDARY_RADIUS));
    }
}
