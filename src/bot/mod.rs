//! Bot runtime: world-event dispatch and the periodic sweep tick.

pub mod server;

pub use server::{FlooServer, WorldEvent};
