//! Platform-specific window system access
//!
//! Everything the geometry engine needs from the OS goes through the
//! [`WindowSystem`] trait. The Win32 implementation lives in [`window`] and
//! [`monitors`]; tests run the engine against [`simulated`].

#[cfg(windows)]
pub mod monitors;
#[cfg(test)]
pub mod simulated;
#[cfg(windows)]
pub mod window;

use crate::domain::core::{Point, Rect, Size};
use crate::domain::window::WindowHandle;

/// Error types for platform window operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The window was closed (or the handle never referred to a window)
    #[error("window {0} no longer exists")]
    StaleHandle(WindowHandle),

    /// A read-only query failed for a live window
    #[error("{call} failed for window {handle}: {detail}")]
    QueryFailed {
        call: &'static str,
        handle: WindowHandle,
        detail: String,
    },

    /// A mutating call failed for a live window
    #[error("{call} failed for window {handle}: {detail}")]
    CallFailed {
        call: &'static str,
        handle: WindowHandle,
        detail: String,
    },

    /// Top-level window enumeration failed
    #[error("window enumeration failed: {0}")]
    EnumerationFailed(String),

    /// The running OS does not provide window management
    #[error("window management is not supported on this platform")]
    Unsupported,
}

impl PlatformError {
    pub fn is_stale(&self) -> bool {
        matches!(self, PlatformError::StaleHandle(_))
    }
}

/// Extended window style bits relevant to candidate filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtendedStyle {
    pub tool_window: bool,
    pub app_window: bool,
}

/// Combined move + resize request for one window
///
/// `position` of `None` leaves the window where it is. The call never
/// changes Z-order or activation and always forces the frame metrics to be
/// recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: Option<Point>,
    pub size: Size,
}

/// Access to the OS window table
///
/// All methods are called from the single thread that owns geometry work.
/// Implementations report a closed window as [`PlatformError::StaleHandle`].
pub trait WindowSystem {
    /// Top-level windows in Z-order
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, PlatformError>;

    /// Process id of the running utility
    fn current_process_id(&self) -> u32;

    fn is_window(&self, handle: WindowHandle) -> bool;

    fn is_visible(&self, handle: WindowHandle) -> bool;

    fn title(&self, handle: WindowHandle) -> Result<String, PlatformError>;

    fn class_name(&self, handle: WindowHandle) -> Result<String, PlatformError>;

    fn process_id(&self, handle: WindowHandle) -> Result<u32, PlatformError>;

    fn extended_style(&self, handle: WindowHandle) -> Result<ExtendedStyle, PlatformError>;

    /// Compositor cloak state
    fn is_cloaked(&self, handle: WindowHandle) -> Result<bool, PlatformError>;

    /// OS window bounds, including the invisible drop-shadow
    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, PlatformError>;

    /// Compositor extended frame bounds (the painted window, no shadow)
    fn extended_frame_bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError>;

    /// Client area in window-local coordinates
    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, PlatformError>;

    /// Maps a client-local point to screen coordinates
    fn client_to_screen(&self, handle: WindowHandle, point: Point) -> Result<Point, PlatformError>;

    /// Top-left of the display nearest to the window
    fn monitor_origin(&self, handle: WindowHandle) -> Result<Point, PlatformError>;

    /// Effective DPI of the window, when the OS can report it
    fn window_dpi(&self, handle: WindowHandle) -> Option<u32>;

    fn is_maximized(&self, handle: WindowHandle) -> Result<bool, PlatformError>;

    fn is_minimized(&self, handle: WindowHandle) -> Result<bool, PlatformError>;

    /// Restores a maximized or minimized window to its normal placement
    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    fn set_placement(&self, handle: WindowHandle, placement: Placement) -> Result<(), PlatformError>;

    /// Human-readable DPI awareness of this process, for diagnostics
    fn dpi_awareness(&self) -> String {
        "unknown".to_string()
    }
}
