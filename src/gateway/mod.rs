//! World gateway abstraction.
//!
//! The engine never talks to the virtual-world platform directly; every
//! query, mutation, and teleport goes through [`WorldGateway`]. The platform
//! client owns connection bootstrap and replication, so implementations here
//! only cover what the fireplace network actually consumes. Calls are
//! best-effort: a failed mutation is reported to the caller and never
//! retried.
//!
//! [`memory::MemoryGateway`] is the in-process implementation used for
//! offline runs and the test suites. Wire-level object encoding (template
//! conventions, custom-state blobs) lives in [`object`] and never leaks past
//! this module boundary.

pub mod memory;
pub mod object;
pub mod seed;

pub use memory::MemoryGateway;
pub use object::WireObject;
pub use seed::WorldSeed;

use crate::floo::errors::FlooError;
use crate::floo::types::{Fireplace, PlayerSnapshot, SpaceTile};

/// Consumed interface of the authoritative world store.
///
/// All fireplace and region state lives behind this trait; the engine holds
/// no copies between handler invocations. Calls are opaque asynchronous
/// operations with no timeout of their own.
#[allow(async_fn_in_trait)]
pub trait WorldGateway {
    /// Identifiers of fully-loaded maps. Partially-loaded maps are excluded
    /// so the engine never reconciles against an inconsistent read.
    async fn list_maps(&self) -> Result<Vec<String>, FlooError>;

    /// Every fireplace object in a map, lit or unlit, in stable order.
    async fn fireplaces(&self, map_id: &str) -> Result<Vec<Fireplace>, FlooError>;

    /// Look up a single fireplace by key; `None` when it no longer exists.
    async fn get_fireplace(&self, map_id: &str, key: &str)
        -> Result<Option<Fireplace>, FlooError>;

    /// Merge-write one fireplace back into its map.
    async fn write_fireplace(&self, map_id: &str, fireplace: &Fireplace) -> Result<(), FlooError>;

    /// All named private-area tiles of a map, every region included.
    async fn read_spaces(&self, map_id: &str) -> Result<Vec<SpaceTile>, FlooError>;

    /// Replace the full private-area tile collection of a map atomically.
    async fn write_spaces(&self, map_id: &str, spaces: Vec<SpaceTile>) -> Result<(), FlooError>;

    /// Whether a tile blocks movement (walls, void, out-of-bounds).
    async fn is_impassable(&self, map_id: &str, x: i32, y: i32) -> Result<bool, FlooError>;

    /// Whether the player currently stands inside the named private area.
    async fn is_player_in_region(
        &self,
        player: &PlayerSnapshot,
        region: &str,
    ) -> Result<bool, FlooError>;

    /// Move a player to a tile on a (possibly different) map.
    async fn teleport(&self, map_id: &str, x: i32, y: i32, player_id: &str)
        -> Result<(), FlooError>;
}
