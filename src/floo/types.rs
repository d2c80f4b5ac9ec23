use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved name of the private area that mirrors lit fireplaces.
pub const DEFAULT_REGION_NAME: &str = "Floo Network";

/// Rectangle occupied by a world object, in map tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Footprint {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Euclidean distance from this rectangle to a point; zero when the
    /// point is inside or on the edge. The right/bottom edges sit at
    /// `x + width` / `y + height`.
    pub fn distance_to(&self, px: i32, py: i32) -> f64 {
        let dx = (self.x - px).max(px - (self.x + self.width)).max(0) as f64;
        let dy = (self.y - py).max(py - (self.y + self.height)).max(0) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Tiles covered by this footprint expanded by one tile in every
    /// direction. This is the private-area claim of a lit fireplace.
    pub fn halo(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let xs = (self.x - 1)..=(self.x + self.width);
        xs.flat_map(move |x| ((self.y - 1)..=(self.y + self.height)).map(move |y| (x, y)))
    }
}

/// Destination binding: which fireplace on which map a lit fireplace
/// currently points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlooTarget {
    pub map_id: String,
    pub fireplace_key: String,
}

/// Teleport-readiness of a fireplace.
///
/// `activity` and `target` only exist while lit, so an unlit fireplace
/// structurally cannot carry a stale destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireplaceState {
    Unlit,
    Lit {
        /// Last ignition or teleport-through event.
        activity: DateTime<Utc>,
        #[serde(default)]
        target: Option<FlooTarget>,
    },
}

/// A lightable world object acting as a teleport endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fireplace {
    /// Stable identifier, unique within its map.
    pub key: String,
    pub footprint: Footprint,
    pub state: FireplaceState,
    /// Whether this fireplace participates in the teleport network.
    /// Decorative fireplaces join the network the first time they are lit.
    pub network_member: bool,
}

impl Fireplace {
    pub fn new_unlit(key: &str, footprint: Footprint) -> Self {
        Self {
            key: key.to_string(),
            footprint,
            state: FireplaceState::Unlit,
            network_member: false,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self.state, FireplaceState::Lit { .. })
    }

    pub fn activity(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            FireplaceState::Lit { activity, .. } => Some(*activity),
            FireplaceState::Unlit => None,
        }
    }

    pub fn target(&self) -> Option<&FlooTarget> {
        match &self.state {
            FireplaceState::Lit { target, .. } => target.as_ref(),
            FireplaceState::Unlit => None,
        }
    }
}

/// One named private-area cell of a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceTile {
    pub space_id: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub colored: bool,
}

impl SpaceTile {
    pub fn new(space_id: &str, x: i32, y: i32) -> Self {
        Self {
            space_id: space_id.to_string(),
            x,
            y,
            colored: false,
        }
    }
}

/// Point-in-time view of a player, as delivered with each world event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub map_id: String,
    pub x: i32,
    pub y: i32,
    /// Ghost mode permits passing through teleport triggers.
    #[serde(default)]
    pub ghost: bool,
}
