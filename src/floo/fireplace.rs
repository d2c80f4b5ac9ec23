//! Fireplace state machine.
//!
//! Lit and unlit are the only two states, cycling freely. Every real
//! transition is written through the gateway and followed by a private-area
//! pass for the owning map; same-state transitions are strict no-ops and
//! issue no mutation at all. Writes are fire-and-forget per the crate-wide
//! best-effort policy: a rejected mutation is reported, never retried.

use chrono::Utc;
use log::debug;

use super::errors::FlooError;
use super::spaces;
use super::types::{Fireplace, FireplaceState};
use crate::gateway::WorldGateway;

/// Light a fireplace. Clears any previous destination binding and enrolls
/// the fireplace in the teleport network. Returns whether a transition
/// happened.
pub async fn ignite<G: WorldGateway>(
    gateway: &G,
    region: &str,
    map_id: &str,
    fireplace: &mut Fireplace,
) -> Result<bool, FlooError> {
    if fireplace.is_lit() {
        return Ok(false);
    }
    fireplace.state = FireplaceState::Lit {
        activity: Utc::now(),
        target: None,
    };
    fireplace.network_member = true;
    gateway.write_fireplace(map_id, fireplace).await?;
    spaces::sync_private_area(gateway, region, map_id).await?;
    debug!("lit fireplace {} on map {}", fireplace.key, map_id);
    Ok(true)
}

/// Put a fireplace out, dropping its activity timestamp and destination
/// binding. Network membership survives. Returns whether a transition
/// happened.
pub async fn extinguish<G: WorldGateway>(
    gateway: &G,
    region: &str,
    map_id: &str,
    fireplace: &mut Fireplace,
) -> Result<bool, FlooError> {
    if !fireplace.is_lit() {
        return Ok(false);
    }
    fireplace.state = FireplaceState::Unlit;
    gateway.write_fireplace(map_id, fireplace).await?;
    spaces::sync_private_area(gateway, region, map_id).await?;
    debug!("extinguished fireplace {} on map {}", fireplace.key, map_id);
    Ok(true)
}

/// Refresh the activity timestamp of a lit fireplace without changing its
/// state. Resets the idle countdown and engages the teleport debounce
/// window. No-op on an unlit fireplace.
pub async fn touch<G: WorldGateway>(
    gateway: &G,
    map_id: &str,
    fireplace: &mut Fireplace,
) -> Result<(), FlooError> {
    if let FireplaceState::Lit { activity, .. } = &mut fireplace.state {
        *activity = Utc::now();
        gateway.write_fireplace(map_id, fireplace).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floo::types::{FlooTarget, Footprint};
    use crate::gateway::MemoryGateway;

    const REGION: &str = "Floo Network";

    async fn gateway_with_unlit() -> (MemoryGateway, Fireplace) {
        let gateway = MemoryGateway::new();
        gateway.insert_map("atrium");
        let fireplace = Fireplace::new_unlit("fp-1", Footprint::new(0, 0, 1, 1));
        gateway.write_fireplace("atrium", &fireplace).await.unwrap();
        (gateway, fireplace)
    }

    #[tokio::test]
    async fn ignite_lights_and_claims_region() {
        let (gateway, mut fireplace) = gateway_with_unlit().await;
        let before = Utc::now();
        assert!(ignite(&gateway, REGION, "atrium", &mut fireplace)
            .await
            .unwrap());
        assert!(fireplace.is_lit());
        assert!(fireplace.network_member);
        let activity = fireplace.activity().unwrap();
        assert!(activity >= before && activity <= Utc::now());
        assert_eq!(gateway.region_tiles("atrium", REGION).len(), 9);
    }

    #[tokio::test]
    async fn ignite_is_idempotent() {
        let (gateway, mut fireplace) = gateway_with_unlit().await;
        ignite(&gateway, REGION, "atrium", &mut fireplace)
            .await
            .unwrap();
        let state_before = fireplace.state.clone();
        let writes_before = gateway.write_count();
        assert!(!ignite(&gateway, REGION, "atrium", &mut fireplace)
            .await
            .unwrap());
        assert_eq!(fireplace.state, state_before);
        assert_eq!(gateway.write_count(), writes_before);
    }

    #[tokio::test]
    async fn extinguish_clears_binding_and_region() {
        let (gateway, mut fireplace) = gateway_with_unlit().await;
        ignite(&gateway, REGION, "atrium", &mut fireplace)
            .await
            .unwrap();
        if let FireplaceState::Lit { target, .. } = &mut fireplace.state {
            *target = Some(FlooTarget {
                map_id: "library".to_string(),
                fireplace_key: "fp-9".to_string(),
            });
        }
        gateway.write_fireplace("atrium", &fireplace).await.unwrap();

        assert!(extinguish(&gateway, REGION, "atrium", &mut fireplace)
            .await
            .unwrap());
        assert!(!fireplace.is_lit());
        assert!(fireplace.target().is_none());
        assert!(fireplace.network_member);
        assert!(gateway.region_tiles("atrium", REGION).is_empty());

        let stored = gateway
            .get_fireplace("atrium", "fp-1")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.target().is_none());
    }

    #[tokio::test]
    async fn extinguish_is_idempotent() {
        let (gateway, mut fireplace) = gateway_with_unlit().await;
        let writes_before = gateway.write_count();
        assert!(!extinguish(&gateway, REGION, "atrium", &mut fireplace)
            .await
            .unwrap());
        assert_eq!(gateway.write_count(), writes_before);
    }

    #[tokio::test]
    async fn touch_refreshes_activity_only() {
        let (gateway, mut fireplace) = gateway_with_unlit().await;
        ignite(&gateway, REGION, "atrium", &mut fireplace)
            .await
            .unwrap();
        // Backdate, then touch.
        if let FireplaceState::Lit { activity, .. } = &mut fireplace.state {
            *activity = Utc::now() - chrono::Duration::seconds(60);
        }
        let stale = fireplace.activity().unwrap();
        touch(&gateway, "atrium", &mut fireplace).await.unwrap();
        assert!(fireplace.activity().unwrap() > stale);
        assert!(fireplace.is_lit());
    }

    #[tokio::test]
    async fn touch_on_unlit_is_a_no_op() {
        let (gateway, mut fireplace) = gateway_with_unlit().await;
        let writes_before = gateway.write_count();
        touch(&gateway, "atrium", &mut fireplace).await.unwrap();
        assert!(!fireplace.is_lit());
        assert_eq!(gateway.write_count(), writes_before);
    }
}
