//! # Tryhard Poll
//!
//! Poll lifecycle controller for the tryhard poll bot.
//!
//! This crate holds the domain core behind the slash commands: the close
//! time math, the reaction tally, the user-facing message rendering, and
//! the [`PollController`] that owns the persisted state and drives the
//! `Idle → Open → Closed` transitions.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod messages;
pub mod schedule;
pub mod tally;

pub use controller::*;
pub use schedule::*;
pub use tally::*;
