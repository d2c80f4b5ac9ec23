//! # Floobot - Fireplace Teleport Network Automation
//!
//! Floobot keeps a network of lightable "fireplace" objects alive inside a
//! shared virtual world: lighting a fireplace opens a private area around
//! it, speaking a destination hint binds it to a fireplace somewhere else,
//! and walking through it in ghost mode teleports you there.
//!
//! ## Features
//!
//! - **Explicit State Machine**: Lit/unlit transitions with activity
//!   timestamps and destination bindings, idempotent by construction.
//! - **Derived Private Areas**: The reserved region of each map always
//!   equals the one-tile halos of its lit fireplaces; no hand-maintained
//!   tiles.
//! - **Hint Resolution**: Free-text destination hints scored against known
//!   map names, lit fireplaces preferred on arrival.
//! - **Debounced Teleports**: A 500 ms window keeps movement-event bursts
//!   and the arrival-side fireplace from double-firing.
//! - **Idle Sweeping**: Stale fireplaces self-extinguish after 10 s, but
//!   every map keeps its last flame.
//! - **Async Design**: Built with Tokio; one cooperative event loop, no
//!   internal locks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use floobot::bot::FlooServer;
//! use floobot::config::Config;
//! use floobot::gateway::{MemoryGateway, WorldSeed};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let gateway = MemoryGateway::from_seed(&WorldSeed::demo());
//!     let (mut server, _events) = FlooServer::new(config, gateway);
//!     server.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`bot`] - Event loop, dispatch, and the periodic sweep tick
//! - [`floo`] - Fireplace state machine, synchronizer, resolver, teleport
//!   coordinator, and idle sweeper
//! - [`gateway`] - World gateway trait, wire encoding, in-memory world
//! - [`config`] - Configuration management
//! - [`logutil`] - Log sanitization helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   FlooServer    │ ← Event dispatch + sweep tick
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   floo engine   │ ← State machine, regions, teleports
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  World Gateway  │ ← Authoritative platform store
//! └─────────────────┘
//! ```
//!
//! All world state lives behind the gateway; the engine reads, decides, and
//! writes back, holding nothing of its own between events.

pub mod bot;
pub mod config;
pub mod floo;
pub mod gateway;
pub mod logutil;
