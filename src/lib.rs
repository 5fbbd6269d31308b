//! Forces a window's client area to an exact size for fixed-resolution
//! screen capture.
//!
//! Layers, leaf to root:
//! - [`domain`]: pure geometry and window classification
//! - [`platform`]: the [`platform::WindowSystem`] seam and its Win32 backend
//! - [`engine`]: enumeration, geometry probing and the resize state machine
//! - [`app`]: controller, selection state and the cross-thread dispatch queue

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod logging;
pub mod platform;
