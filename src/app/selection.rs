use crate::lsdb::{NodeKind, RouterAdjacency, TopologyGraph};

use super::render_utils::node_default_radius;

const SELECTED_RADIUS: f32 = 12.0;

/// Everything the selection logic needs to answer "who is adjacent to this
/// node", passed explicitly rather than captured ambiently: the resolved
/// graph (networks are indexed by its links) and the flat adjacency report
/// (routers are indexed by name).
#[derive(Clone, Copy)]
pub(super) struct SelectionContext<'a> {
    pub graph: &'a TopologyGraph,
    pub adjacencies: &'a [RouterAdjacency],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SelectionState {
    Idle,
    Selected(usize),
}

/// State machine over "no node inspected" / "node N inspected", driven by
/// drag-start events on the topology view.
pub(super) struct SelectionController {
    state: SelectionState,
}

/// What the renderer must do after a drag-start: either reset to the
/// neutral placeholder or repaint the inspection panel.
#[derive(Debug, PartialEq)]
pub(super) enum SelectionEffect {
    Cleared,
    Inspected(Inspection),
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct Inspection {
    pub kind: NodeKind,
    pub display_name: String,
    pub neighbors: Vec<String>,
}

/// Per-kind neighbor lookup. A network pseudo-node is only adjacent through
/// graph links; a router's adjacencies live in the flat report, keyed by
/// name. Each variant closes over exactly the index it consults.
enum NeighborResolver<'a> {
    GraphLinks {
        graph: &'a TopologyGraph,
        node_index: usize,
    },
    AdjacencyList {
        adjacencies: &'a [RouterAdjacency],
        router_id: &'a str,
    },
    Unindexed,
}

impl<'a> NeighborResolver<'a> {
    fn for_node(ctx: SelectionContext<'a>, node_index: usize) -> Self {
        let node = &ctx.graph.nodes[node_index];
        match node.kind {
            NodeKind::Network => Self::GraphLinks {
                graph: ctx.graph,
                node_index,
            },
            NodeKind::Router => Self::AdjacencyList {
                adjacencies: ctx.adjacencies,
                router_id: &node.name,
            },
            NodeKind::Other(_) => Self::Unindexed,
        }
    }

    fn resolve(&self) -> Vec<String> {
        match self {
            Self::GraphLinks { graph, node_index } => {
                let mut neighbors = Vec::new();
                for link in &graph.links {
                    // two independent checks: a self-loop emits the node's
                    // own name twice
                    if link.source == *node_index {
                        neighbors.push(graph.nodes[link.target].name.clone());
                    }
                    if link.target == *node_index {
                        neighbors.push(graph.nodes[link.source].name.clone());
                    }
                }
                neighbors
            }
            Self::AdjacencyList {
                adjacencies,
                router_id,
            } => adjacencies
                .iter()
                .filter(|entry| entry.router_id == *router_id)
                .flat_map(|entry| &entry.neighbors)
                .map(|neighbor| neighbor.router_id.clone())
                .collect(),
            Self::Unindexed => Vec::new(),
        }
    }
}

impl SelectionController {
    pub(super) fn new() -> Self {
        Self {
            state: SelectionState::Idle,
        }
    }

    pub(super) fn selected(&self) -> Option<usize> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Selected(index) => Some(index),
        }
    }

    /// Drag-start on a node. Re-dragging the selected node toggles back to
    /// idle so repositioning an already-open node does not re-trigger a
    /// fresh inspection; any other node replaces the selection.
    pub(super) fn drag_start(
        &mut self,
        node_index: usize,
        ctx: SelectionContext<'_>,
    ) -> SelectionEffect {
        if self.state == SelectionState::Selected(node_index) {
            self.state = SelectionState::Idle;
            return SelectionEffect::Cleared;
        }

        self.state = SelectionState::Selected(node_index);
        let node = &ctx.graph.nodes[node_index];
        let neighbors = NeighborResolver::for_node(ctx, node_index).resolve();
        SelectionEffect::Inspected(Inspection {
            kind: node.kind.clone(),
            display_name: node.name.clone(),
            neighbors,
        })
    }

    /// The radius the renderer must paint this node with: the enlarged
    /// fixed value for the selected node, the kind default otherwise.
    pub(super) fn target_radius(&self, node_index: usize, kind: &NodeKind) -> f32 {
        if self.selected() == Some(node_index) {
            SELECTED_RADIUS
        } else {
            node_default_radius(kind)
        }
    }
}
