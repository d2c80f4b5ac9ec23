//! World seed definitions.
//!
//! Offline runs need a world to operate on. A seed file is a small JSON
//! document describing maps, walls, fireplaces, and any pre-existing
//! private-area tiles; `floobot init` writes a demo seed and `floobot start`
//! loads one into a [`super::MemoryGateway`].

use serde::{Deserialize, Serialize};

use crate::floo::errors::FlooError;
use crate::floo::types::SpaceTile;

fn default_dimension() -> i32 {
    1
}

fn default_variant() -> String {
    "default".to_string()
}

/// One fireplace placement in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireplaceSeed {
    pub key: String,
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_dimension")]
    pub width: i32,
    #[serde(default = "default_dimension")]
    pub height: i32,
    /// Seeded already lit; lit fireplaces are network members by definition.
    #[serde(default)]
    pub lit: bool,
    /// Visual variant suffix carried in the template id.
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Network membership for unlit fireplaces (e.g. previously lit ones).
    #[serde(default)]
    pub network_member: bool,
}

/// One map in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSeed {
    pub id: String,
    /// Impassable tiles.
    #[serde(default)]
    pub walls: Vec<(i32, i32)>,
    #[serde(default)]
    pub fireplaces: Vec<FireplaceSeed>,
    /// Pre-existing private-area tiles, any region.
    #[serde(default)]
    pub spaces: Vec<SpaceTile>,
}

/// A complete offline world definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSeed {
    pub maps: Vec<MapSeed>,
}

impl WorldSeed {
    /// Load a seed from a JSON file.
    pub async fn load(path: &str) -> Result<Self, FlooError> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write a seed to a JSON file, pretty-printed for hand editing.
    pub async fn save(&self, path: &str) -> Result<(), FlooError> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Starter world written by `floobot init`: two maps, one fireplace
    /// each, a short wall under the atrium fireplace so the landing scan has
    /// something to skip.
    pub fn demo() -> Self {
        Self {
            maps: vec![
                MapSeed {
                    id: "atrium".to_string(),
                    walls: vec![(5, 7), (6, 7)],
                    fireplaces: vec![FireplaceSeed {
                        key: "atrium-hearth".to_string(),
                        x: 5,
                        y: 5,
                        width: 2,
                        height: 1,
                        lit: false,
                        variant: "brick".to_string(),
                        network_member: false,
                    }],
                    spaces: Vec::new(),
                },
                MapSeed {
                    id: "library".to_string(),
                    walls: Vec::new(),
                    fireplaces: vec![FireplaceSeed {
                        key: "library-hearth".to_string(),
                        x: 2,
                        y: 2,
                        width: 1,
                        height: 1,
                        lit: false,
                        variant: "marble".to_string(),
                        network_member: false,
                    }],
                    spaces: Vec::new(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_round_trips_as_json() {
        let seed = WorldSeed::demo();
        let json = serde_json::to_string(&seed).unwrap();
        let back: WorldSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back.maps.len(), 2);
        assert_eq!(back.maps[0].id, "atrium");
        assert_eq!(back.maps[0].fireplaces[0].width, 2);
    }

    #[test]
    fn seed_defaults_apply() {
        let seed: FireplaceSeed =
            serde_json::from_str("{\"key\":\"fp\",\"x\":1,\"y\":2}").unwrap();
        assert_eq!(seed.width, 1);
        assert_eq!(seed.height, 1);
        assert!(!seed.lit);
        assert_eq!(seed.variant, "default");
    }
}
