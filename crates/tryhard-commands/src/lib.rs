//! # Tryhard Commands
//!
//! Discord slash command implementations for the tryhard poll bot.
//!
//! This crate provides the two guild-scoped commands (start a poll, show
//! the current status) and the Poise framework glue around them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod ask_for_tryhard_today;
pub mod framework;
pub mod tryhard_info;

pub use framework::*;
