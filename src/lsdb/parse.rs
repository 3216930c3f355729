use std::collections::BTreeMap;

use serde::Deserialize;

use super::model::{
    Neighbor, NeighborKind, NodeKind, RouterAdjacency, Snapshot, SnapshotError, TopoNode,
    TopologyGraph,
};

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    timestamp: Option<String>,
    neighbor_info: Option<RawNeighborInfo>,
    graph_info: Option<RawGraphInfo>,
}

/// The flat adjacency report appears in two shapes across snapshot
/// versions: an array of router records, or an object keyed by router id.
/// Detection is by value shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNeighborInfo {
    Records(Vec<RawRouterRecord>),
    ById(BTreeMap<String, Vec<RawNeighbor>>),
}

#[derive(Debug, Deserialize)]
struct RawRouterRecord {
    router_id: String,
    #[serde(default)]
    neighbors: Vec<RawNeighbor>,
}

#[derive(Debug, Deserialize)]
struct RawNeighbor {
    // array-form records say `router_id`, object-form entries say `neighbor`
    #[serde(alias = "neighbor")]
    router_id: String,
    #[serde(rename = "type", default)]
    kind: NeighborKind,
}

#[derive(Debug, Deserialize)]
struct RawGraphInfo {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: String,
    // the original emitter wrote `destination` instead of `target`
    #[serde(alias = "destination")]
    target: String,
}

fn normalize_neighbor_info(raw: RawNeighborInfo) -> Vec<RouterAdjacency> {
    let to_neighbors = |raw: Vec<RawNeighbor>| {
        raw.into_iter()
            .map(|neighbor| Neighbor {
                router_id: neighbor.router_id,
                kind: neighbor.kind,
            })
            .collect()
    };

    match raw {
        RawNeighborInfo::Records(records) => records
            .into_iter()
            .map(|record| RouterAdjacency {
                router_id: record.router_id,
                neighbors: to_neighbors(record.neighbors),
            })
            .collect(),
        // object form carries no order of its own; key order keeps the
        // adjacency table stable across refreshes
        RawNeighborInfo::ById(by_id) => by_id
            .into_iter()
            .map(|(router_id, neighbors)| RouterAdjacency {
                router_id,
                neighbors: to_neighbors(neighbors),
            })
            .collect(),
    }
}

/// Parses one snapshot artifact and resolves its graph. Any failure leaves
/// the caller with the previously ingested snapshot.
pub(super) fn parse_snapshot(raw: &str) -> Result<Snapshot, SnapshotError> {
    let parsed: RawSnapshot = serde_json::from_str(raw)?;

    let neighbor_info = parsed
        .neighbor_info
        .ok_or(SnapshotError::MissingField("neighbor_info"))?;
    let graph_info = parsed
        .graph_info
        .ok_or(SnapshotError::MissingField("graph_info"))?;

    let nodes = graph_info
        .nodes
        .into_iter()
        .map(|node| TopoNode {
            id: node.id,
            name: node.name,
            kind: node.kind,
        })
        .collect();
    let raw_links = graph_info
        .links
        .into_iter()
        .map(|link| (link.source, link.target))
        .collect();

    Ok(Snapshot {
        timestamp: parsed.timestamp.unwrap_or_default(),
        adjacencies: normalize_neighbor_info(neighbor_info),
        graph: TopologyGraph::from_parts(nodes, raw_links)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARRAY_FORM: &str = r#"{
        "timestamp": "2026-08-27 10:00:00",
        "neighbor_info": [
            {
                "router_id": "10.0.0.1",
                "neighbors": [
                    {"router_id": "10.0.0.2", "type": "p2p"},
                    {"router_id": "10.0.0.3", "type": "network"}
                ]
            }
        ],
        "graph_info": {
            "nodes": [
                {"id": "10.0.0.1", "name": "10.0.0.1", "type": "router"},
                {"id": "192.168.0.1", "name": "192.168.0.1", "type": "network"}
            ],
            "links": [
                {"source": "10.0.0.1", "target": "192.168.0.1"}
            ]
        }
    }"#;

    const OBJECT_FORM: &str = r#"{
        "timestamp": "2026-08-27 10:05:00",
        "neighbor_info": {
            "10.0.0.2": [
                {"neighbor": "10.0.0.1", "type": "network"},
                {"neighbor": "10.0.0.9", "type": "vlink"}
            ],
            "10.0.0.1": []
        },
        "graph_info": {
            "nodes": [
                {"id": "10.0.0.1", "name": "10.0.0.1", "type": "router"}
            ],
            "links": [
                {"source": "10.0.0.1", "destination": "10.0.0.1"}
            ]
        }
    }"#;

    #[test]
    fn parses_array_form_neighbor_info() {
        let snapshot = parse_snapshot(ARRAY_FORM).unwrap();

        assert_eq!(snapshot.timestamp, "2026-08-27 10:00:00");
        assert_eq!(snapshot.adjacencies.len(), 1);
        let router = &snapshot.adjacencies[0];
        assert_eq!(router.router_id, "10.0.0.1");
        assert_eq!(router.neighbors.len(), 2);
        assert_eq!(router.neighbors[0].router_id, "10.0.0.2");
        assert_eq!(router.neighbors[0].kind, NeighborKind::P2p);
        assert_eq!(router.neighbors[1].kind, NeighborKind::Network);

        assert_eq!(snapshot.graph.node_count(), 2);
        assert_eq!(snapshot.graph.link_count(), 1);
    }

    #[test]
    fn parses_object_form_neighbor_info_in_key_order() {
        let snapshot = parse_snapshot(OBJECT_FORM).unwrap();

        let ids = snapshot
            .adjacencies
            .iter()
            .map(|router| router.router_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["10.0.0.1", "10.0.0.2"]);

        let second = &snapshot.adjacencies[1];
        assert_eq!(second.neighbors[0].router_id, "10.0.0.1");
        assert_eq!(
            second.neighbors[1].kind,
            NeighborKind::Other("vlink".to_string())
        );
    }

    #[test]
    fn destination_is_accepted_as_target_alias() {
        let snapshot = parse_snapshot(OBJECT_FORM).unwrap();
        let link = snapshot.graph.links[0];
        assert_eq!(link.source, link.target);
    }

    #[test]
    fn missing_graph_info_is_a_distinct_error() {
        let raw = r#"{"timestamp": "t", "neighbor_info": []}"#;
        assert!(matches!(
            parse_snapshot(raw),
            Err(SnapshotError::MissingField("graph_info"))
        ));
    }

    #[test]
    fn missing_neighbor_info_is_a_distinct_error() {
        let raw = r#"{"timestamp": "t", "graph_info": {"nodes": [], "links": []}}"#;
        assert!(matches!(
            parse_snapshot(raw),
            Err(SnapshotError::MissingField("neighbor_info"))
        ));
    }

    #[test]
    fn dangling_link_aborts_the_snapshot() {
        let raw = r#"{
            "timestamp": "t",
            "neighbor_info": [],
            "graph_info": {
                "nodes": [{"id": "r1", "name": "r1", "type": "router"}],
                "links": [{"source": "r1", "target": "missing"}]
            }
        }"#;
        assert!(matches!(
            parse_snapshot(raw),
            Err(SnapshotError::DanglingLink { .. })
        ));
    }

    #[test]
    fn invalid_json_surfaces_as_json_error() {
        assert!(matches!(
            parse_snapshot("not json"),
            Err(SnapshotError::Json(_))
        ));
    }

    proptest! {
        /// Any well-formed artifact whose links reference declared node ids
        /// parses, and every resolved endpoint indexes into the node list.
        #[test]
        fn resolved_links_always_index_into_nodes(
            node_count in 1usize..12,
            link_seeds in proptest::collection::vec((0usize..12, 0usize..12), 0..24),
        ) {
            let nodes = (0..node_count)
                .map(|index| format!(
                    r#"{{"id": "n{index}", "name": "10.0.0.{index}", "type": "router"}}"#
                ))
                .collect::<Vec<_>>()
                .join(",");
            let links = link_seeds
                .iter()
                .map(|(a, b)| format!(
                    r#"{{"source": "n{}", "target": "n{}"}}"#,
                    a % node_count,
                    b % node_count
                ))
                .collect::<Vec<_>>()
                .join(",");
            let raw = format!(
                r#"{{"timestamp": "t", "neighbor_info": [],
                     "graph_info": {{"nodes": [{nodes}], "links": [{links}]}}}}"#
            );

            let snapshot = parse_snapshot(&raw).unwrap();
            prop_assert_eq!(snapshot.graph.link_count(), link_seeds.len());
            for link in &snapshot.graph.links {
                prop_assert!(link.source < snapshot.graph.node_count());
                prop_assert!(link.target < snapshot.graph.node_count());
            }
        }
    }
}
