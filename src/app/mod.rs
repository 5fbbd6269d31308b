//! Application orchestration layer
//!
//! This module coordinates between the front end, the selection state and
//! the geometry engine, and hands work to the geometry thread.

pub mod controller;
pub mod dispatch;
pub mod state;
