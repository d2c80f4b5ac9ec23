//! In-process world gateway.
//!
//! Backs the engine with an in-memory world instead of a live platform
//! connection. Used for offline `start` runs and as the fixture for the
//! integration suites. State is stored as raw [`WireObject`] records so the
//! boundary encoding in [`super::object`] is exercised on every read and
//! write, the same way a real connector would.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::object::{
    CustomState, WireObject, NETWORK_TAG, TEMPLATE_LIT_PREFIX, TEMPLATE_UNLIT_PREFIX,
};
use super::seed::WorldSeed;
use super::WorldGateway;
use crate::floo::errors::FlooError;
use crate::floo::types::{Fireplace, PlayerSnapshot, SpaceTile};

/// One executed teleport, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleportRecord {
    pub player_id: String,
    pub map_id: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Default)]
struct MapRecord {
    objects: BTreeMap<String, WireObject>,
    spaces: Vec<SpaceTile>,
    impassable: HashSet<(i32, i32)>,
}

#[derive(Default)]
struct WorldState {
    maps: BTreeMap<String, MapRecord>,
    teleports: Vec<TeleportRecord>,
    writes: usize,
}

/// In-memory [`WorldGateway`] implementation.
#[derive(Default)]
pub struct MemoryGateway {
    state: Mutex<WorldState>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a world from a seed definition.
    pub fn from_seed(seed: &WorldSeed) -> Self {
        let gateway = Self::new();
        for map in &seed.maps {
            gateway.insert_map(&map.id);
            for (x, y) in &map.walls {
                gateway.block_tile(&map.id, *x, *y);
            }
            for tile in &map.spaces {
                gateway.insert_space(&map.id, tile.clone());
            }
            for fireplace in &map.fireplaces {
                let template_prefix = if fireplace.lit {
                    TEMPLATE_LIT_PREFIX
                } else {
                    TEMPLATE_UNLIT_PREFIX
                };
                let mut tags = Vec::new();
                if fireplace.lit || fireplace.network_member {
                    tags.push(NETWORK_TAG.to_string());
                }
                let custom_state = if fireplace.lit {
                    CustomState {
                        last_activity: Some(Utc::now().timestamp_millis()),
                        ..CustomState::default()
                    }
                    .encode()
                } else {
                    String::new()
                };
                gateway.insert_object(
                    &map.id,
                    WireObject {
                        key: fireplace.key.clone(),
                        x: fireplace.x,
                        y: fireplace.y,
                        width: fireplace.width,
                        height: fireplace.height,
                        template_id: format!("{} {}", template_prefix, fireplace.variant),
                        tags,
                        custom_state,
                    },
                );
            }
        }
        gateway
    }

    fn world(&self) -> Result<MutexGuard<'_, WorldState>, FlooError> {
        self.state
            .lock()
            .map_err(|_| FlooError::Gateway("world state lock poisoned".to_string()))
    }

    pub fn insert_map(&self, map_id: &str) {
        if let Ok(mut world) = self.state.lock() {
            world.maps.entry(map_id.to_string()).or_default();
        }
    }

    pub fn insert_object(&self, map_id: &str, object: WireObject) {
        if let Ok(mut world) = self.state.lock() {
            let map = world.maps.entry(map_id.to_string()).or_default();
            map.objects.insert(object.key.clone(), object);
        }
    }

    pub fn insert_space(&self, map_id: &str, tile: SpaceTile) {
        if let Ok(mut world) = self.state.lock() {
            let map = world.maps.entry(map_id.to_string()).or_default();
            map.spaces.push(tile);
        }
    }

    /// Mark one tile as blocking movement.
    pub fn block_tile(&self, map_id: &str, x: i32, y: i32) {
        if let Ok(mut world) = self.state.lock() {
            let map = world.maps.entry(map_id.to_string()).or_default();
            map.impassable.insert((x, y));
        }
    }

    /// Remove an object outright, as an external edit would.
    pub fn remove_object(&self, map_id: &str, key: &str) {
        if let Ok(mut world) = self.state.lock() {
            if let Some(map) = world.maps.get_mut(map_id) {
                map.objects.remove(key);
            }
        }
    }

    /// Raw wire record of one object, for inspecting boundary encoding.
    pub fn wire_object(&self, map_id: &str, key: &str) -> Option<WireObject> {
        let world = self.state.lock().ok()?;
        world.maps.get(map_id)?.objects.get(key).cloned()
    }

    /// Coordinates of every tile of one region on a map, sorted.
    pub fn region_tiles(&self, map_id: &str, region: &str) -> Vec<(i32, i32)> {
        let mut tiles: Vec<(i32, i32)> = self
            .state
            .lock()
            .ok()
            .and_then(|world| {
                world.maps.get(map_id).map(|map| {
                    map.spaces
                        .iter()
                        .filter(|tile| tile.space_id == region)
                        .map(|tile| (tile.x, tile.y))
                        .collect()
                })
            })
            .unwrap_or_default();
        tiles.sort_unstable();
        tiles
    }

    /// Number of mutation calls (object and space writes) accepted so far.
    pub fn write_count(&self) -> usize {
        self.state.lock().map(|world| world.writes).unwrap_or(0)
    }

    /// Every teleport executed so far, oldest first.
    pub fn teleports(&self) -> Vec<TeleportRecord> {
        self.state
            .lock()
            .map(|world| world.teleports.clone())
            .unwrap_or_default()
    }
}

impl WorldGateway for MemoryGateway {
    async fn list_maps(&self) -> Result<Vec<String>, FlooError> {
        Ok(self.world()?.maps.keys().cloned().collect())
    }

    async fn fireplaces(&self, map_id: &str) -> Result<Vec<Fireplace>, FlooError> {
        let world = self.world()?;
        let map = world
            .maps
            .get(map_id)
            .ok_or_else(|| FlooError::NotFound(format!("map {map_id}")))?;
        Ok(map
            .objects
            .values()
            .filter_map(WireObject::to_fireplace)
            .collect())
    }

    async fn get_fireplace(
        &self,
        map_id: &str,
        key: &str,
    ) -> Result<Option<Fireplace>, FlooError> {
        let world = self.world()?;
        Ok(world
            .maps
            .get(map_id)
            .and_then(|map| map.objects.get(key))
            .and_then(WireObject::to_fireplace))
    }

    async fn write_fireplace(&self, map_id: &str, fireplace: &Fireplace) -> Result<(), FlooError> {
        let mut world = self.world()?;
        world.writes += 1;
        let map = world
            .maps
            .get_mut(map_id)
            .ok_or_else(|| FlooError::NotFound(format!("map {map_id}")))?;
        let wire = map
            .objects
            .entry(fireplace.key.clone())
            .or_insert_with(|| WireObject {
                key: fireplace.key.clone(),
                x: fireplace.footprint.x,
                y: fireplace.footprint.y,
                width: fireplace.footprint.width,
                height: fireplace.footprint.height,
                template_id: format!("{TEMPLATE_UNLIT_PREFIX} default"),
                tags: Vec::new(),
                custom_state: String::new(),
            });
        wire.apply_fireplace(fireplace);
        Ok(())
    }

    async fn read_spaces(&self, map_id: &str) -> Result<Vec<SpaceTile>, FlooError> {
        let world = self.world()?;
        let map = world
            .maps
            .get(map_id)
            .ok_or_else(|| FlooError::NotFound(format!("map {map_id}")))?;
        Ok(map.spaces.clone())
    }

    async fn write_spaces(&self, map_id: &str, spaces: Vec<SpaceTile>) -> Result<(), FlooError> {
        let mut world = self.world()?;
        world.writes += 1;
        let map = world
            .maps
            .get_mut(map_id)
            .ok_or_else(|| FlooError::NotFound(format!("map {map_id}")))?;
        map.spaces = spaces;
        Ok(())
    }

    async fn is_impassable(&self, map_id: &str, x: i32, y: i32) -> Result<bool, FlooError> {
        let world = self.world()?;
        // Unknown maps block everything; a landing search must not succeed
        // against a map that does not exist.
        Ok(world
            .maps
            .get(map_id)
            .map(|map| map.impassable.contains(&(x, y)))
            .unwrap_or(true))
    }

    async fn is_player_in_region(
        &self,
        player: &PlayerSnapshot,
        region: &str,
    ) -> Result<bool, FlooError> {
        let world = self.world()?;
        Ok(world
            .maps
            .get(&player.map_id)
            .map(|map| {
                map.spaces.iter().any(|tile| {
                    tile.space_id == region && tile.x == player.x && tile.y == player.y
                })
            })
            .unwrap_or(false))
    }

    async fn teleport(
        &self,
        map_id: &str,
        x: i32,
        y: i32,
        player_id: &str,
    ) -> Result<(), FlooError> {
        let mut world = self.world()?;
        if !world.maps.contains_key(map_id) {
            return Err(FlooError::Gateway(format!(
                "teleport into unknown map {map_id}"
            )));
        }
        world.teleports.push(TeleportRecord {
            player_id: player_id.to_string(),
            map_id: map_id.to_string(),
            x,
            y,
        });
        Ok(())
    }
}
