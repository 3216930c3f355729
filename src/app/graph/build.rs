use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::lsdb::TopologyGraph;
use crate::util::stable_pair;

use super::super::render_utils::{node_default_fill, node_default_radius};
use super::super::{SceneGraph, SceneNode};

const RING_SPACING: f32 = 36.0;
const JITTER: f32 = 24.0;

/// Converts a validated topology into the simulation's scene: one node per
/// topology node (same index), visual identity derived from the kind, and
/// a jittered ring as starting geometry so repulsion never sees everything
/// stacked on one point.
pub(in crate::app) fn build_scene(graph: &TopologyGraph) -> SceneGraph {
    let node_count = graph.nodes.len();
    let ring_radius = (node_count as f32).sqrt() * RING_SPACING;

    let nodes = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let angle = (index as f32 / node_count.max(1) as f32) * TAU;
            let (jx, jy) = stable_pair(&node.id);
            let world_pos =
                vec2(angle.cos(), angle.sin()) * ring_radius + vec2(jx, jy) * JITTER;

            SceneNode {
                world_pos,
                velocity: Vec2::ZERO,
                pinned: None,
                base_radius: node_default_radius(&node.kind),
                fill: node_default_fill(&node.kind),
            }
        })
        .collect();

    let edges = graph
        .links
        .iter()
        .map(|link| (link.source, link.target))
        .collect();

    SceneGraph { nodes, edges }
}
