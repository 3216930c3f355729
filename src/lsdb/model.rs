use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Construction-time failures. The caller keeps serving the previous
/// snapshot when one of these comes back; the simulation never starts over
/// a partially resolved graph.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate node id `{0}` in graph_info")]
    DuplicateNodeId(String),
    #[error("link `{source_id}` -> `{target}` references unknown node id `{missing}`")]
    DanglingLink {
        // Not named `source` because thiserror would infer it as the error
        // source, and String does not implement std::error::Error.
        source_id: String,
        target: String,
        missing: String,
    },
}

/// Kind of a topology node. Unrecognized kinds are carried through verbatim
/// and rendered with fallback visuals; they are never an ingestion error.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
    Router,
    Network,
    Other(String),
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "router" => Self::Router,
            "network" => Self::Network,
            _ => Self::Other(value),
        }
    }
}

impl NodeKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Router => "router",
            Self::Network => "network",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

/// Kind of one reported adjacency in the flat neighbor list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NeighborKind {
    Network,
    P2p,
    Other(String),
}

impl From<String> for NeighborKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "network" => Self::Network,
            "p2p" => Self::P2p,
            _ => Self::Other(value),
        }
    }
}

impl Default for NeighborKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// One entry of the flat adjacency report. Independent of the graph's node
/// set; cross-referencing happens by identifier equality, never by position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterAdjacency {
    pub router_id: String,
    pub neighbors: Vec<Neighbor>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub router_id: String,
    pub kind: NeighborKind,
}

#[derive(Clone, Debug)]
pub struct TopoNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
}

/// An undirected link with both endpoints resolved to indices into the
/// owning graph's node list. `source`/`target` record the artifact's field
/// order only; direction carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopoLink {
    pub source: usize,
    pub target: usize,
}

#[derive(Clone, Debug)]
pub struct TopologyGraph {
    pub nodes: Vec<TopoNode>,
    pub links: Vec<TopoLink>,
}

impl TopologyGraph {
    /// Resolves raw id-pair links against the node list. Fails on a
    /// duplicate node id or a link endpoint naming a node that does not
    /// exist.
    pub fn from_parts(
        nodes: Vec<TopoNode>,
        raw_links: Vec<(String, String)>,
    ) -> Result<Self, SnapshotError> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                return Err(SnapshotError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut links = Vec::with_capacity(raw_links.len());
        for (source_id, target_id) in raw_links {
            let resolve = |id: &str| {
                index_by_id
                    .get(id)
                    .copied()
                    .ok_or_else(|| SnapshotError::DanglingLink {
                        source_id: source_id.clone(),
                        target: target_id.clone(),
                        missing: id.to_string(),
                    })
            };
            links.push(TopoLink {
                source: resolve(&source_id)?,
                target: resolve(&target_id)?,
            });
        }

        Ok(Self { nodes, links })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

/// One ingested LSDB snapshot. Immutable; a new fetch replaces it wholesale
/// together with the scene and simulation built from it.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub timestamp: String,
    pub adjacencies: Vec<RouterAdjacency>,
    pub graph: TopologyGraph,
}
