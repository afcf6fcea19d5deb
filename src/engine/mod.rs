//! Transitive win propagation over a league's game log.
//!
//! Everything here is a pure function of in-memory collections: standings,
//! the opponent adjacency map, second/third-degree wins and head-to-head
//! confidence.

pub mod confidence;
pub mod degrees;
pub mod error;
pub mod graph;
pub mod outcome;
pub mod snapshot;
pub mod standings;
pub mod types;

pub use confidence::{compute_confidence, predict_matchup, Confidence, Prediction, Side};
pub use degrees::{compute_second_degree, compute_third_degree, second_degree_for_mode};
pub use error::{EngineError, MalformedReason};
pub use graph::{build_adjacency, build_victories, extend_adjacency};
pub use outcome::{decide, Decision};
pub use snapshot::{
    compute_snapshot, compute_snapshot_with_adjacency, partition_results, SnapshotComputation,
    TeamSnapshot,
};
pub use standings::build_standings;
pub use types::*;
