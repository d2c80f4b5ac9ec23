//! Teleport coordination.
//!
//! Fires when a ghost-mode player brushes a lit, targeted fireplace. The
//! debounce window keeps successive movement events (and the arrival-side
//! re-trigger) from double-firing; the landing scan walks the row below the
//! destination footprint until it finds a passable tile. Both fireplaces are
//! touched before the teleport call goes out, and nothing is rolled back if
//! that call fails.

use chrono::{Duration, Utc};
use log::debug;

use super::errors::FlooError;
use super::fireplace;
use super::types::{Fireplace, FireplaceState, Footprint, PlayerSnapshot};
use crate::config::NetworkConfig;
use crate::gateway::WorldGateway;

/// What a teleport attempt came to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeleportOutcome {
    /// The player was handed to the gateway for transport.
    Completed { map_id: String, x: i32, y: i32 },
    /// The source fireplace was used too recently.
    Debounced,
    /// No destination bound, or the bound fireplace no longer exists.
    NoTarget,
    /// The landing scan exhausted its budget.
    NoLanding,
}

/// Scan for a landable tile near a destination footprint.
///
/// Starts directly below the footprint's top-left corner, walks forward in
/// x across the footprint (inclusive of `x + width`), then wraps to the next
/// row, accepting the first tile the gateway does not flag impassable.
pub async fn find_landing_tile<G: WorldGateway>(
    gateway: &G,
    map_id: &str,
    footprint: &Footprint,
    budget: u32,
) -> Result<Option<(i32, i32)>, FlooError> {
    let mut x = footprint.x;
    let mut y = footprint.y + footprint.height;
    for _ in 0..budget {
        if !gateway.is_impassable(map_id, x, y).await? {
            return Ok(Some((x, y)));
        }
        x += 1;
        if x > footprint.x + footprint.width {
            x = footprint.x;
            y += 1;
        }
    }
    Ok(None)
}

/// Attempt to teleport a player through a lit source fireplace.
///
/// The destination is ignited (idempotently) so it stays active after
/// arrival, and both ends are touched to reset their idle timers and engage
/// the debounce window before the gateway teleport is invoked. A gateway
/// failure from that final call propagates with both fireplaces already lit
/// and touched; there is no compensating transaction.
pub async fn try_teleport<G: WorldGateway>(
    gateway: &G,
    config: &NetworkConfig,
    player: &PlayerSnapshot,
    source_map: &str,
    source: &mut Fireplace,
) -> Result<TeleportOutcome, FlooError> {
    let (activity, target) = match &source.state {
        FireplaceState::Lit { activity, target } => (*activity, target.clone()),
        FireplaceState::Unlit => return Ok(TeleportOutcome::NoTarget),
    };

    if Utc::now().signed_duration_since(activity)
        < Duration::milliseconds(config.debounce_ms as i64)
    {
        return Ok(TeleportOutcome::Debounced);
    }

    let Some(target) = target else {
        return Ok(TeleportOutcome::NoTarget);
    };
    let Some(mut destination) = gateway
        .get_fireplace(&target.map_id, &target.fireplace_key)
        .await?
    else {
        // The bound fireplace was deleted externally. Abort without a
        // fallback destination.
        debug!(
            "target fireplace {} on map {} is gone; aborting teleport",
            target.fireplace_key, target.map_id
        );
        return Ok(TeleportOutcome::NoTarget);
    };

    let Some((x, y)) = find_landing_tile(
        gateway,
        &target.map_id,
        &destination.footprint,
        config.landing_scan_budget,
    )
    .await?
    else {
        debug!(
            "no landable tile near fireplace {} on map {}",
            target.fireplace_key, target.map_id
        );
        return Ok(TeleportOutcome::NoLanding);
    };

    fireplace::ignite(gateway, &config.region_name, &target.map_id, &mut destination).await?;
    fireplace::touch(gateway, source_map, source).await?;
    fireplace::touch(gateway, &target.map_id, &mut destination).await?;

    gateway.teleport(&target.map_id, x, y, &player.id).await?;
    Ok(TeleportOutcome::Completed {
        map_id: target.map_id,
        x,
        y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floo::types::FlooTarget;
    use crate::gateway::MemoryGateway;

    fn ghost(map_id: &str) -> PlayerSnapshot {
        PlayerSnapshot {
            id: "p1".to_string(),
            map_id: map_id.to_string(),
            x: 0,
            y: 0,
            ghost: true,
        }
    }

    fn lit_with_target(key: &str, stale_secs: i64, target: Option<FlooTarget>) -> Fireplace {
        Fireplace {
            key: key.to_string(),
            footprint: Footprint::new(0, 0, 1, 1),
            state: FireplaceState::Lit {
                activity: Utc::now() - Duration::seconds(stale_secs),
                target,
            },
            network_member: true,
        }
    }

    #[tokio::test]
    async fn landing_scan_skips_blocked_tiles() {
        let gateway = MemoryGateway::new();
        gateway.insert_map("library");
        gateway.block_tile("library", 0, 1);
        gateway.block_tile("library", 1, 1);

        let footprint = Footprint::new(0, 0, 2, 1);
        let tile = find_landing_tile(&gateway, "library", &footprint, 1000)
            .await
            .unwrap();
        assert_eq!(tile, Some((2, 1)));
    }

    #[tokio::test]
    async fn landing_scan_wraps_to_next_row() {
        let gateway = MemoryGateway::new();
        gateway.insert_map("library");
        for x in 0..=2 {
            gateway.block_tile("library", x, 1);
        }

        let footprint = Footprint::new(0, 0, 2, 1);
        let tile = find_landing_tile(&gateway, "library", &footprint, 1000)
            .await
            .unwrap();
        assert_eq!(tile, Some((0, 2)));
    }

    #[tokio::test]
    async fn landing_scan_gives_up_within_budget() {
        let gateway = MemoryGateway::new();
        gateway.insert_map("library");
        for &(x, y) in &[(0, 1), (1, 1), (2, 1), (0, 2), (1, 2)] {
            gateway.block_tile("library", x, y);
        }

        let footprint = Footprint::new(0, 0, 2, 1);
        let tile = find_landing_tile(&gateway, "library", &footprint, 5)
            .await
            .unwrap();
        assert_eq!(tile, None);
    }

    #[tokio::test]
    async fn fresh_activity_debounces() {
        let gateway = MemoryGateway::new();
        gateway.insert_map("atrium");
        let mut source = lit_with_target("src", 0, None);
        gateway.write_fireplace("atrium", &source).await.unwrap();

        let outcome = try_teleport(
            &gateway,
            &NetworkConfig::default(),
            &ghost("atrium"),
            "atrium",
            &mut source,
        )
        .await
        .unwrap();
        assert_eq!(outcome, TeleportOutcome::Debounced);
        assert!(gateway.teleports().is_empty());
    }

    #[tokio::test]
    async fn unbound_source_aborts_silently() {
        let gateway = MemoryGateway::new();
        gateway.insert_map("atrium");
        let mut source = lit_with_target("src", 5, None);
        gateway.write_fireplace("atrium", &source).await.unwrap();

        let outcome = try_teleport(
            &gateway,
            &NetworkConfig::default(),
            &ghost("atrium"),
            "atrium",
            &mut source,
        )
        .await
        .unwrap();
        assert_eq!(outcome, TeleportOutcome::NoTarget);
        assert!(gateway.teleports().is_empty());
    }

    #[tokio::test]
    async fn deleted_target_aborts_silently() {
        let gateway = MemoryGateway::new();
        gateway.insert_map("atrium");
        gateway.insert_map("library");
        let mut source = lit_with_target(
            "src",
            5,
            Some(FlooTarget {
                map_id: "library".to_string(),
                fireplace_key: "vanished".to_string(),
            }),
        );
        gateway.write_fireplace("atrium", &source).await.unwrap();

        let outcome = try_teleport(
            &gateway,
            &NetworkConfig::default(),
            &ghost("atrium"),
            "atrium",
            &mut source,
        )
        .await
        .unwrap();
        assert_eq!(outcome, TeleportOutcome::NoTarget);
        assert!(gateway.teleports().is_empty());
    }
}
