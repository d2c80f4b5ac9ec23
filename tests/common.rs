//! Test utilities & fixtures.
//! Builds small in-memory worlds and nudges fireplace state around so the
//! flow tests stay readable. Tests share one layout: an `atrium` map with a
//! 1x1 hearth at the origin and a `library` map with a 2x1 hearth at
//! (10, 10).

// Each suite binary compiles its own copy; not every suite uses every helper.
#![allow(dead_code)]

use chrono::{Duration, Utc};
use floobot::config::Config;
use floobot::floo::types::{Fireplace, FireplaceState, FlooTarget, PlayerSnapshot};
use floobot::gateway::{MemoryGateway, WireObject, WorldGateway};

pub const REGION: &str = "Floo Network";

pub fn test_config() -> Config {
    Config::default()
}

fn unlit_wire(key: &str, x: i32, y: i32, width: i32, height: i32) -> WireObject {
    WireObject {
        key: key.to_string(),
        x,
        y,
        width,
        height,
        template_id: "Fireplace - brick".to_string(),
        tags: Vec::new(),
        custom_state: String::new(),
    }
}

/// Two maps, one unlit hearth each.
pub fn two_map_world() -> MemoryGateway {
    let gateway = MemoryGateway::new();
    gateway.insert_map("atrium");
    gateway.insert_object("atrium", unlit_wire("atrium-hearth", 0, 0, 1, 1));
    gateway.insert_map("library");
    gateway.insert_object("library", unlit_wire("library-hearth", 10, 10, 2, 1));
    gateway
}

pub fn ghost_at(map_id: &str, x: i32, y: i32) -> PlayerSnapshot {
    PlayerSnapshot {
        id: "traveler".to_string(),
        map_id: map_id.to_string(),
        x,
        y,
        ghost: true,
    }
}

pub fn walker_at(map_id: &str, x: i32, y: i32) -> PlayerSnapshot {
    PlayerSnapshot {
        ghost: false,
        ..ghost_at(map_id, x, y)
    }
}

/// Fetch a fireplace that must exist.
pub async fn fetch(gateway: &MemoryGateway, map_id: &str, key: &str) -> Fireplace {
    gateway
        .get_fireplace(map_id, key)
        .await
        .expect("gateway read")
        .expect("fireplace present")
}

/// Light a fireplace directly through the state machine.
pub async fn light(gateway: &MemoryGateway, map_id: &str, key: &str) {
    let mut fireplace = fetch(gateway, map_id, key).await;
    floobot::floo::ignite(gateway, REGION, map_id, &mut fireplace)
        .await
        .expect("ignite");
}

/// Push a lit fireplace's activity into the past.
pub async fn backdate(gateway: &MemoryGateway, map_id: &str, key: &str, seconds: i64) {
    let mut fireplace = fetch(gateway, map_id, key).await;
    if let FireplaceState::Lit { activity, .. } = &mut fireplace.state {
        *activity = Utc::now() - Duration::seconds(seconds);
    }
    gateway
        .write_fireplace(map_id, &fireplace)
        .await
        .expect("write backdated fireplace");
}

/// Bind a destination onto a lit fireplace.
pub async fn bind(
    gateway: &MemoryGateway,
    map_id: &str,
    key: &str,
    target_map: &str,
    target_key: &str,
) {
    let mut fireplace = fetch(gateway, map_id, key).await;
    if let FireplaceState::Lit { target, .. } = &mut fireplace.state {
        *target = Some(FlooTarget {
            map_id: target_map.to_string(),
            fireplace_key: target_key.to_string(),
        });
    }
    gateway
        .write_fireplace(map_id, &fireplace)
        .await
        .expect("write bound fireplace");
}
