//! Private-area synchronizer.
//!
//! The reserved region of a map must cover exactly the one-tile halos of its
//! lit fireplaces. Membership is derived from fireplace state, never edited
//! by hand: tiles of the reserved region are owned by this module, tiles of
//! every other region pass through untouched.

use std::collections::BTreeSet;

use log::debug;

use super::errors::FlooError;
use super::types::SpaceTile;
use crate::gateway::WorldGateway;

/// Reconcile the reserved region of one map against its lit fireplaces.
///
/// Returns whether a write was issued; an already-consistent map is left
/// alone.
pub async fn sync_private_area<G: WorldGateway>(
    gateway: &G,
    region: &str,
    map_id: &str,
) -> Result<bool, FlooError> {
    let mut wanted: BTreeSet<(i32, i32)> = BTreeSet::new();
    for fireplace in gateway.fireplaces(map_id).await? {
        if fireplace.is_lit() {
            wanted.extend(fireplace.footprint.halo());
        }
    }

    let current = gateway.read_spaces(map_id).await?;
    let mut next: Vec<SpaceTile> = Vec::with_capacity(current.len() + wanted.len());
    let mut changed = false;
    for tile in current {
        if tile.space_id != region {
            next.push(tile);
        } else if wanted.remove(&(tile.x, tile.y)) {
            next.push(tile);
        } else {
            changed = true;
        }
    }
    for (x, y) in wanted {
        next.push(SpaceTile::new(region, x, y));
        changed = true;
    }

    if changed {
        debug!(
            "syncing '{}' region on map {}: {} tiles",
            region,
            map_id,
            next.iter().filter(|tile| tile.space_id == region).count()
        );
        gateway.write_spaces(map_id, next).await?;
    }
    Ok(changed)
}
