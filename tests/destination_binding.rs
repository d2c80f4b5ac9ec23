//! Local-chat destination binding end to end: a hint spoken inside the
//! private area, next to a lit fireplace, binds that fireplace to the best
//! matching map.

mod common;

use common::{bind, fetch, ghost_at, light, test_config, two_map_world};
use floobot::bot::{FlooServer, WorldEvent};
use floobot::gateway::MemoryGateway;

#[tokio::test]
async fn hint_binds_source_to_matching_map() {
    let gateway = two_map_world();
    light(&gateway, "atrium", "atrium-hearth").await;

    let (server, _events) = FlooServer::new(test_config(), gateway);
    // (1, 1) is inside both the hearth footprint edge and its halo.
    server
        .handle_event(WorldEvent::LocalChat {
            player: ghost_at("atrium", 1, 1),
            text: "the library".to_string(),
        })
        .await
        .unwrap();

    let hearth = fetch(server.gateway(), "atrium", "atrium-hearth").await;
    let target = hearth.target().expect("binding set");
    assert_eq!(target.map_id, "library");
    assert_eq!(target.fireplace_key, "library-hearth");

    // The chosen destination itself is untouched.
    let destination = fetch(server.gateway(), "library", "library-hearth").await;
    assert!(!destination.is_lit());
}

#[tokio::test]
async fn binding_lands_on_wire_custom_state() {
    let gateway = two_map_world();
    light(&gateway, "atrium", "atrium-hearth").await;

    let (server, _events) = FlooServer::new(test_config(), gateway);
    server
        .handle_event(WorldEvent::LocalChat {
            player: ghost_at("atrium", 1, 1),
            text: "library".to_string(),
        })
        .await
        .unwrap();

    let wire = server
        .gateway()
        .wire_object("atrium", "atrium-hearth")
        .expect("wire record");
    assert!(wire.custom_state.contains("\"targetMapId\":\"library\""));
    assert!(wire.custom_state.contains("\"targetObj\":\"library-hearth\""));
}

#[tokio::test]
async fn speaker_outside_private_area_is_ignored() {
    let gateway = two_map_world();
    light(&gateway, "atrium", "atrium-hearth").await;

    let (server, _events) = FlooServer::new(test_config(), gateway);
    // (5, 5) is far outside the hearth halo, so outside the region.
    server
        .handle_event(WorldEvent::LocalChat {
            player: ghost_at("atrium", 5, 5),
            text: "library".to_string(),
        })
        .await
        .unwrap();

    let hearth = fetch(server.gateway(), "atrium", "atrium-hearth").await;
    assert!(hearth.target().is_none());
}

#[tokio::test]
async fn hint_near_unlit_fireplace_is_ignored() {
    let gateway = two_map_world();
    // Seed a region tile so the speaker counts as inside, but leave the
    // hearth unlit.
    gateway.insert_space("atrium", floobot::floo::types::SpaceTile::new(common::REGION, 1, 1));

    let (server, _events) = FlooServer::new(test_config(), gateway);
    server
        .handle_event(WorldEvent::LocalChat {
            player: ghost_at("atrium", 1, 1),
            text: "library".to_string(),
        })
        .await
        .unwrap();

    let hearth = fetch(server.gateway(), "atrium", "atrium-hearth").await;
    assert!(hearth.target().is_none());
}

#[tokio::test]
async fn map_without_fireplaces_leaves_binding_unset() {
    let gateway = MemoryGateway::new();
    gateway.insert_map("atrium");
    gateway.insert_object(
        "atrium",
        floobot::gateway::WireObject {
            key: "atrium-hearth".to_string(),
            x: 0,
            y: 0,
            width: 1,
            height: 1,
            template_id: "Fireplace - brick".to_string(),
            tags: Vec::new(),
            custom_state: String::new(),
        },
    );
    // A map with no fireplaces at all, spelled so it wins the scoring.
    gateway.insert_map("observatory");
    light(&gateway, "atrium", "atrium-hearth").await;

    let (server, _events) = FlooServer::new(test_config(), gateway);
    server
        .handle_event(WorldEvent::LocalChat {
            player: ghost_at("atrium", 1, 1),
            text: "observatory".to_string(),
        })
        .await
        .unwrap();

    let hearth = fetch(server.gateway(), "atrium", "atrium-hearth").await;
    assert!(hearth.target().is_none());
}

#[tokio::test]
async fn rebinding_replaces_previous_destination() {
    let gateway = two_map_world();
    light(&gateway, "atrium", "atrium-hearth").await;
    bind(&gateway, "atrium", "atrium-hearth", "atrium", "atrium-hearth").await;

    let (server, _events) = FlooServer::new(test_config(), gateway);
    server
        .handle_event(WorldEvent::LocalChat {
            player: ghost_at("atrium", 1, 1),
            text: "library".to_string(),
        })
        .await
        .unwrap();

    let hearth = fetch(server.gateway(), "atrium", "atrium-hearth").await;
    assert_eq!(hearth.target().expect("binding").map_id, "library");
}
