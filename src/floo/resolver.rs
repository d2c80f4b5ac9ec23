//! Destination resolution.
//!
//! Turns a free-text phrase spoken at a lit fireplace into a concrete
//! destination: the known map whose identifier scores closest to the phrase,
//! then one fireplace inside it, chosen uniformly at random with a
//! preference for fireplaces that are already lit. The binding lands on the
//! *source* fireplace; the chosen destination is not modified here.

use log::debug;
use rand::seq::SliceRandom;

use super::errors::FlooError;
use super::types::{Fireplace, FireplaceState, FlooTarget};
use crate::gateway::WorldGateway;

/// Scoring seam for phrase-to-map matching. Lower is more similar.
///
/// The algorithm behind this is a collaborator concern; the engine only
/// relies on distance semantics and deterministic output.
pub trait SimilarityScorer {
    fn distance(&self, phrase: &str, map_id: &str) -> f64;
}

/// Default scorer: case-insensitive Levenshtein edit distance.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditDistanceScorer;

impl SimilarityScorer for EditDistanceScorer {
    fn distance(&self, phrase: &str, map_id: &str) -> f64 {
        strsim::levenshtein(&phrase.to_lowercase(), &map_id.to_lowercase()) as f64
    }
}

/// Pick the map scoring closest to the phrase. Ties break toward the
/// earlier entry, so candidate order must be stable.
pub fn pick_map<'a, S: SimilarityScorer>(
    scorer: &S,
    phrase: &str,
    map_ids: &'a [String],
) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for map_id in map_ids {
        let score = scorer.distance(phrase, map_id);
        if best.map(|(_, low)| score < low).unwrap_or(true) {
            best = Some((map_id, score));
        }
    }
    best.map(|(map_id, _)| map_id)
}

/// Resolve a phrase and bind the result as the source fireplace's target.
///
/// Returns the binding, or `None` when no destination is available (no
/// known maps, or the winning map has no fireplaces at all) — in that case
/// the source fireplace is left untouched.
pub async fn bind_destination<G: WorldGateway, S: SimilarityScorer>(
    gateway: &G,
    scorer: &S,
    source_map: &str,
    source: &mut Fireplace,
    phrase: &str,
) -> Result<Option<FlooTarget>, FlooError> {
    let maps = gateway.list_maps().await?;
    let Some(pick) = pick_map(scorer, phrase, &maps) else {
        return Ok(None);
    };
    let pick = pick.to_string();

    let candidates = gateway.fireplaces(&pick).await?;
    if candidates.is_empty() {
        debug!("no destination available on map {}", pick);
        return Ok(None);
    }
    let lit: Vec<&Fireplace> = candidates.iter().filter(|f| f.is_lit()).collect();
    let mut rng = rand::thread_rng();
    let chosen = if lit.is_empty() {
        candidates.choose(&mut rng)
    } else {
        lit.choose(&mut rng).copied()
    };
    let Some(chosen) = chosen else {
        return Ok(None);
    };

    let binding = FlooTarget {
        map_id: pick,
        fireplace_key: chosen.key.clone(),
    };
    match &mut source.state {
        FireplaceState::Lit { target, .. } => {
            *target = Some(binding.clone());
        }
        // The speaker's fireplace went out under us; nothing to bind onto.
        FireplaceState::Unlit => return Ok(None),
    }
    gateway.write_fireplace(source_map, source).await?;
    Ok(Some(binding))
}
