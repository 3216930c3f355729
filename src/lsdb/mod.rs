mod load;
mod model;
mod parse;

pub use load::{load_log, load_snapshot};
pub use model::{
    Neighbor, NeighborKind, NodeKind, RouterAdjacency, Snapshot, SnapshotError, TopoLink,
    TopoNode, TopologyGraph,
};
