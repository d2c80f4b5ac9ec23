//! Wire-level object encoding.
//!
//! The platform stores fireplaces as generic map objects: lit/unlit is
//! carried by a template-id prefix, network membership by a tag, and the
//! activity timestamp plus destination binding by a free-form JSON blob in
//! `customState`. Everything in this module exists so the rest of the crate
//! can work with [`Fireplace`] values and never parse that convention ad hoc.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::floo::types::{Fireplace, FireplaceState, FlooTarget, Footprint};

/// Template-id prefix of a lit fireplace object.
pub const TEMPLATE_LIT_PREFIX: &str = "Fireplacelit -";
/// Template-id prefix of an unlit fireplace object.
pub const TEMPLATE_UNLIT_PREFIX: &str = "Fireplace -";
/// Object tag marking teleport-network membership.
pub const NETWORK_TAG: &str = "floo";

/// Raw map object as the platform replicates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireObject {
    pub key: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub template_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub custom_state: String,
}

/// Per-object state blob, JSON-encoded into `customState`.
///
/// Field names follow the platform's camelCase convention on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomState {
    /// Last ignition or teleport-through event, epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_map_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_obj: Option<String>,
}

impl CustomState {
    /// Decode a raw blob. Missing or malformed state is treated as empty
    /// rather than surfaced; objects edited by hand must not wedge the
    /// engine.
    pub fn decode(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Visual variant suffix of a fireplace template id, after the `- `
/// separator. Preserved across lit/unlit swaps so each fireplace keeps its
/// art style.
fn template_variant(template_id: &str) -> &str {
    template_id
        .split_once("- ")
        .map(|(_, variant)| variant)
        .unwrap_or("default")
}

impl WireObject {
    /// Whether this object is a fireplace at all (lit or unlit).
    pub fn is_fireplace(&self) -> bool {
        self.template_id.starts_with(TEMPLATE_LIT_PREFIX)
            || self.template_id.starts_with(TEMPLATE_UNLIT_PREFIX)
    }

    /// Decode into the typed model. Returns `None` for non-fireplace
    /// objects.
    ///
    /// A lit fireplace whose blob lacks `lastActivity` decodes as maximally
    /// stale (epoch) so the idle sweeper can retire it normally.
    pub fn to_fireplace(&self) -> Option<Fireplace> {
        if !self.is_fireplace() {
            return None;
        }
        let blob = CustomState::decode(&self.custom_state);
        let state = if self.template_id.starts_with(TEMPLATE_LIT_PREFIX) {
            let target = match (&blob.target_map_id, &blob.target_obj) {
                (Some(map_id), Some(key)) => Some(FlooTarget {
                    map_id: map_id.clone(),
                    fireplace_key: key.clone(),
                }),
                _ => None,
            };
            FireplaceState::Lit {
                activity: blob
                    .last_activity
                    .map(millis_to_datetime)
                    .unwrap_or(DateTime::UNIX_EPOCH),
                target,
            }
        } else {
            FireplaceState::Unlit
        };
        Some(Fireplace {
            key: self.key.clone(),
            footprint: Footprint::new(self.x, self.y, self.width, self.height),
            state,
            network_member: self.tags.iter().any(|t| t == NETWORK_TAG),
        })
    }

    /// Encode a typed fireplace back onto this wire record, preserving the
    /// visual variant and any tags the engine does not own. The footprint is
    /// left untouched; a fireplace never changes shape across transitions.
    pub fn apply_fireplace(&mut self, fireplace: &Fireplace) {
        let variant = template_variant(&self.template_id).to_string();
        match &fireplace.state {
            FireplaceState::Unlit => {
                self.template_id = format!("{TEMPLATE_UNLIT_PREFIX} {variant}");
                self.custom_state = String::new();
            }
            FireplaceState::Lit { activity, target } => {
                self.template_id = format!("{TEMPLATE_LIT_PREFIX} {variant}");
                self.custom_state = CustomState {
                    last_activity: Some(activity.timestamp_millis()),
                    target_map_id: target.as_ref().map(|t| t.map_id.clone()),
                    target_obj: target.as_ref().map(|t| t.fireplace_key.clone()),
                }
                .encode();
            }
        }
        if fireplace.network_member && !self.tags.iter().any(|t| t == NETWORK_TAG) {
            self.tags.push(NETWORK_TAG.to_string());
        }
    }
}
