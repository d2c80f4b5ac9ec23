//! # Floo Server - Event Loop and Dispatch
//!
//! `FlooServer` owns the single cooperative loop the whole engine runs on:
//! world events arrive on an mpsc channel, the idle sweeper fires once per
//! configured tick, and ctrl-c ends the run. There is no parallel execution
//! of handlers and no internal locking; handlers interleave only across
//! their awaited gateway calls.
//!
//! Failure policy is best-effort throughout: a handler error is logged and
//! the loop keeps serving. Nothing is retried and nothing is rolled back.

use anyhow::Result;
use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::config::Config;
use crate::floo::errors::FlooError;
use crate::floo::resolver::{self, EditDistanceScorer};
use crate::floo::teleport::{self, TeleportOutcome};
use crate::floo::types::PlayerSnapshot;
use crate::floo::{fireplace, sweeper};
use crate::gateway::WorldGateway;
use crate::logutil::escape_log;

/// World events the engine reacts to, delivered with the acting player's
/// current map and state.
#[derive(Debug, Clone)]
pub enum WorldEvent {
    /// A player cast the igniting effect near their current position.
    EffectCast { player: PlayerSnapshot },
    /// A player spoke in local chat.
    LocalChat { player: PlayerSnapshot, text: String },
    /// A player moved one tile.
    PlayerMoved { player: PlayerSnapshot },
}

/// Core application controller: reacts to world events and runs the
/// periodic idle sweep against every known map.
pub struct FlooServer<G> {
    config: Config,
    gateway: G,
    events: mpsc::UnboundedReceiver<WorldEvent>,
    scorer: EditDistanceScorer,
}

impl<G: WorldGateway> FlooServer<G> {
    /// Create a server around a gateway. The returned sender is the event
    /// bus: whoever owns the platform subscription pushes events into it.
    pub fn new(config: Config, gateway: G) -> (Self, mpsc::UnboundedSender<WorldEvent>) {
        let (event_tx, events) = mpsc::unbounded_channel();
        (
            Self {
                config,
                gateway,
                events,
                scorer: EditDistanceScorer,
            },
            event_tx,
        )
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run until ctrl-c or until every event sender is dropped.
    pub async fn run(&mut self) -> Result<()> {
        let maps = self.gateway.list_maps().await?;
        info!("floobot serving {} map(s)", maps.len());

        let mut sweep = interval(Duration::from_secs(
            self.config.network.sweep_interval_secs.max(1),
        ));
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown requested");
                    break;
                }
                maybe_event = self.events.recv() => {
                    match maybe_event {
                        Some(event) => {
                            if let Err(e) = self.handle_event(event).await {
                                warn!("event handler failed: {}", e);
                            }
                        }
                        None => {
                            info!("event stream closed");
                            break;
                        }
                    }
                }
                _ = sweep.tick() => {
                    if let Err(e) = sweeper::sweep_all(&self.gateway, &self.config.network).await {
                        warn!("idle sweep failed: {}", e);
                    }
                }
            }
        }
        Ok(())
    }

    /// Dispatch one world event.
    pub async fn handle_event(&self, event: WorldEvent) -> Result<(), FlooError> {
        match event {
            WorldEvent::EffectCast { player } => self.on_effect_cast(&player).await,
            WorldEvent::LocalChat { player, text } => self.on_local_chat(&player, &text).await,
            WorldEvent::PlayerMoved { player } => self.on_player_moved(&player).await,
        }
    }

    /// An igniting effect lights every unlit fireplace within one tile of
    /// the caster.
    async fn on_effect_cast(&self, player: &PlayerSnapshot) -> Result<(), FlooError> {
        let region = &self.config.network.region_name;
        for mut candidate in self.gateway.fireplaces(&player.map_id).await? {
            if candidate.is_lit() || candidate.footprint.distance_to(player.x, player.y) > 1.0 {
                continue;
            }
            if fireplace::ignite(&self.gateway, region, &player.map_id, &mut candidate).await? {
                info!(
                    "player {} lit fireplace {} on map {}",
                    player.id, candidate.key, player.map_id
                );
            }
        }
        Ok(())
    }

    /// Chat near a lit fireplace binds that fireplace's destination. Only
    /// the first fireplace in range takes the hint.
    async fn on_local_chat(&self, player: &PlayerSnapshot, text: &str) -> Result<(), FlooError> {
        let network = &self.config.network;
        if !self
            .gateway
            .is_player_in_region(player, &network.region_name)
            .await?
        {
            return Ok(());
        }
        for mut candidate in self.gateway.fireplaces(&player.map_id).await? {
            if !candidate.is_lit() || candidate.footprint.distance_to(player.x, player.y) > 1.0 {
                continue;
            }
            match resolver::bind_destination(
                &self.gateway,
                &self.scorer,
                &player.map_id,
                &mut candidate,
                text,
            )
            .await?
            {
                Some(binding) => info!(
                    "fireplace {} on map {} now points at {} on map {} (hint: \"{}\")",
                    candidate.key,
                    player.map_id,
                    binding.fireplace_key,
                    binding.map_id,
                    escape_log(text)
                ),
                None => debug!("no destination for hint \"{}\"", escape_log(text)),
            }
            return Ok(());
        }
        Ok(())
    }

    /// Movement by a ghost-mode player inside the reserved region fires the
    /// teleport coordinator against the first lit network fireplace in
    /// range.
    async fn on_player_moved(&self, player: &PlayerSnapshot) -> Result<(), FlooError> {
        if !player.ghost {
            return Ok(());
        }
        let network = &self.config.network;
        if !self
            .gateway
            .is_player_in_region(player, &network.region_name)
            .await?
        {
            return Ok(());
        }
        for mut candidate in self.gateway.fireplaces(&player.map_id).await? {
            if !candidate.is_lit()
                || !candidate.network_member
                || candidate.footprint.distance_to(player.x, player.y) > 1.0
            {
                continue;
            }
            match teleport::try_teleport(
                &self.gateway,
                network,
                player,
                &player.map_id,
                &mut candidate,
            )
            .await?
            {
                TeleportOutcome::Completed { map_id, x, y } => info!(
                    "teleported player {} through fireplace {} to map {} ({}, {})",
                    player.id, candidate.key, map_id, x, y
                ),
                TeleportOutcome::Debounced => {
                    debug!("fireplace {} still in debounce window", candidate.key)
                }
                TeleportOutcome::NoTarget => {
                    debug!("fireplace {} has no usable destination", candidate.key)
                }
                TeleportOutcome::NoLanding => debug!(
                    "no landing tile near the destination of fireplace {}",
                    candidate.key
                ),
            }
            return Ok(());
        }
        Ok(())
    }

    /// Print a human-readable world summary, one line per map.
    pub async fn show_status(&self) -> Result<()> {
        let network = &self.config.network;
        for map_id in self.gateway.list_maps().await? {
            let fireplaces = self.gateway.fireplaces(&map_id).await?;
            let lit = fireplaces.iter().filter(|f| f.is_lit()).count();
            let tiles = self
                .gateway
                .read_spaces(&map_id)
                .await?
                .iter()
                .filter(|tile| tile.space_id == network.region_name)
                .count();
            println!(
                "{}: {} fireplace(s), {} lit, {} '{}' tile(s)",
                map_id,
                fireplaces.len(),
                lit,
                tiles,
                network.region_name
            );
        }
        Ok(())
    }
}
