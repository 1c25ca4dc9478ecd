//! # Tryhard Common
//!
//! Shared types, errors, and utilities for the tryhard poll bot.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace: Discord id newtypes, the common error enum, and the
//! small formatting helpers the user-facing messages rely on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
