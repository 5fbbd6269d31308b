//! Configuration module for resizer-win
//!
//! Resize parameters are built from command-line flags for each run and are
//! never persisted. This module concentrates the data structures shared
//! between the front end and the geometry engine.

pub mod resize;

pub use resize::{ConfigError, ResizeConfig, SettleStrategy};
