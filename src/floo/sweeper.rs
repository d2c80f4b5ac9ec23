//! Idle sweeper.
//!
//! Runs once per tick over every fully-loaded map and retires lit network
//! fireplaces whose activity is older than the idle threshold. A map that
//! has any lit fireplace always keeps at least one: collapsing the private
//! area entirely makes the host platform's client misbehave, so the last
//! flame stays up however stale it gets.

use chrono::{Duration, Utc};
use log::info;

use super::errors::FlooError;
use super::types::Fireplace;
use super::{fireplace, spaces};
use crate::config::NetworkConfig;
use crate::gateway::WorldGateway;

/// Sweep every known map once.
pub async fn sweep_all<G: WorldGateway>(
    gateway: &G,
    config: &NetworkConfig,
) -> Result<(), FlooError> {
    for map_id in gateway.list_maps().await? {
        sweep_map(gateway, config, &map_id).await?;
    }
    Ok(())
}

/// Sweep one map. Returns how many fireplaces were extinguished.
///
/// The private area is resynchronized at the end of every sweep whether or
/// not anything was retired; the synchronizer's no-op short circuit keeps
/// the quiet case cheap.
pub async fn sweep_map<G: WorldGateway>(
    gateway: &G,
    config: &NetworkConfig,
    map_id: &str,
) -> Result<usize, FlooError> {
    let idle_cutoff = Duration::seconds(config.idle_timeout_secs as i64);
    let now = Utc::now();

    let mut lit: Vec<Fireplace> = gateway
        .fireplaces(map_id)
        .await?
        .into_iter()
        .filter(|f| f.is_lit() && f.network_member)
        .collect();
    let mut remaining = lit.len();
    let mut retired = 0;
    for candidate in &mut lit {
        let Some(activity) = candidate.activity() else {
            continue;
        };
        if remaining > 1 && now.signed_duration_since(activity) > idle_cutoff {
            info!(
                "extinguishing idle fireplace {} on map {}",
                candidate.key, map_id
            );
            fireplace::extinguish(gateway, &config.region_name, map_id, candidate).await?;
            remaining -= 1;
            retired += 1;
        }
    }

    spaces::sync_private_area(gateway, &config.region_name, map_id).await?;
    Ok(retired)
}
