//! # Tryhard Bot
//!
//! Discord bot that runs the daily tryhard session poll for a single guild.
//!
//! This is the main binary crate that wires configuration, the poll
//! lifecycle controller, and the slash commands into a running Poise
//! client with its two background tasks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
