//! Fireplace network state and coordination.
//! The state machine, private-area synchronizer, destination resolver,
//! teleport coordinator, and idle sweeper all live here; everything operates
//! through the [`crate::gateway::WorldGateway`] seam and keeps no state of
//! its own between handler invocations.

pub mod errors;
pub mod fireplace;
pub mod resolver;
pub mod spaces;
pub mod sweeper;
pub mod teleport;
pub mod types;

pub use errors::FlooError;
pub use fireplace::{extinguish, ignite, touch};
pub use resolver::{bind_destination, pick_map, EditDistanceScorer, SimilarityScorer};
pub use spaces::sync_private_area;
pub use sweeper::{sweep_all, sweep_map};
pub use teleport::{find_landing_tile, try_teleport, TeleportOutcome};
pub use types::*;
