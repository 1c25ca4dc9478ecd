//! # Tryhard Config
//!
//! Typed configuration and persisted poll state for the tryhard poll bot.
//!
//! This crate provides the environment-derived application configuration
//! with validation, and the durable key-value store the poll lifecycle
//! persists its state into between restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod store;

pub use loader::*;
pub use schema::*;
pub use store::*;
