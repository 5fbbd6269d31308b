//! Geometry probe
//!
//! Measures one window in four coordinate frames and derives the shadow and
//! non-client margins by differencing them. Nothing is cached: the OS owns
//! the geometry and any app can move its window between two calls.
//!
//! Frames, outermost first:
//! - outer rect: `GetWindowRect`, includes the invisible drop-shadow
//! - visible rect: compositor extended frame bounds, what the user sees
//! - client rect in screen coordinates: the content area
//!
//! Chrome thickness is never asked of the OS. Custom-frame applications
//! (browsers, Electron apps) report meaningless system metrics, while two
//! independently measured rects always difference correctly.

use std::fmt;

use crate::domain::core::{Margins, Point, Rect, Size};
use crate::domain::window::WindowHandle;
use crate::platform::{PlatformError, WindowSystem};

/// Snapshot of every measurement the probe can take for a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryReport {
    pub handle: WindowHandle,
    pub title: String,
    pub outer: Rect,
    pub visible: Rect,
    pub client: Size,
    pub client_screen: Rect,
    pub shadow: Margins,
    pub non_client: Margins,
    pub maximized: bool,
    pub dpi: Option<u32>,
}

impl fmt::Display for GeometryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Window   : {:?} (hwnd={})", self.title, self.handle)?;
        writeln!(f, "  Outer    : {}", self.outer)?;
        writeln!(f, "  Visible  : {}", self.visible)?;
        writeln!(f, "  Shadow   : {}", self.shadow)?;
        writeln!(f, "  NC frame : {}", self.non_client)?;
        writeln!(f, "  Client   : {}", self.client)?;
        match self.dpi {
            Some(dpi) => write!(f, "  DPI      : {}  maximized={}", dpi, self.maximized),
            None => write!(f, "  DPI      : unknown  maximized={}", self.maximized),
        }
    }
}

/// Read-only geometry queries against a [`WindowSystem`]
pub struct GeometryProbe<'a, S: WindowSystem + ?Sized> {
    system: &'a S,
}

impl<'a, S: WindowSystem + ?Sized> GeometryProbe<'a, S> {
    pub fn new(system: &'a S) -> Self {
        Self { system }
    }

    /// OS window bounds, or a zero rect if the query fails
    ///
    /// Callers only use this as a baseline for delta math, where a zero
    /// baseline corrects itself on the next measurement.
    pub fn outer_rect(&self, handle: WindowHandle) -> Rect {
        self.system.window_rect(handle).unwrap_or_else(|err| {
            tracing::debug!("outer rect unavailable: {}", err);
            Rect::ZERO
        })
    }

    /// Painted bounds without shadow, falling back to the outer rect
    pub fn visible_rect(&self, handle: WindowHandle) -> Rect {
        match self.system.extended_frame_bounds(handle) {
            Ok(rect) => rect,
            Err(err) => {
                tracing::debug!("extended frame bounds unavailable, using outer rect: {}", err);
                self.outer_rect(handle)
            }
        }
    }

    /// Authoritative content-area size straight from the client rect
    pub fn client_size(&self, handle: WindowHandle) -> Result<Size, PlatformError> {
        self.system.client_rect(handle).map(|rect| rect.size())
    }

    /// Client rect with both corners mapped to screen coordinates
    pub fn client_screen_rect(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        let local = self.system.client_rect(handle)?;
        let top_left = self
            .system
            .client_to_screen(handle, Point::new(local.x, local.y))?;
        let bottom_right = self
            .system
            .client_to_screen(handle, Point::new(local.right(), local.bottom()))?;
        Ok(Rect::from_edges(top_left.x, top_left.y, bottom_right.x, bottom_right.y))
    }

    /// Title bar and border thickness per edge; zero for borderless windows
    /// and when the client rect cannot be read
    pub fn non_client_margins(&self, handle: WindowHandle) -> Margins {
        let visible = self.visible_rect(handle);
        match self.client_screen_rect(handle) {
            Ok(client) => Margins::between(&visible, &client),
            Err(err) => {
                tracing::debug!("client rect unavailable: {}", err);
                Margins::ZERO
            }
        }
    }

    /// Invisible drop-shadow thickness per edge; zero if either rect is
    /// unavailable
    pub fn shadow_margins(&self, handle: WindowHandle) -> Margins {
        let outer = self.system.window_rect(handle);
        let visible = self.system.extended_frame_bounds(handle);
        match (outer, visible) {
            (Ok(outer), Ok(visible)) => Margins::between(&outer, &visible),
            _ => Margins::ZERO,
        }
    }

    /// Top-left corner of the display hosting the window, (0,0) on failure
    pub fn monitor_top_left(&self, handle: WindowHandle) -> Point {
        self.system.monitor_origin(handle).unwrap_or_else(|err| {
            tracing::debug!("monitor lookup failed, using primary origin: {}", err);
            Point::default()
        })
    }

    /// Takes every measurement in immediate succession
    pub fn report(&self, handle: WindowHandle) -> Result<GeometryReport, PlatformError> {
        let title = self.system.title(handle)?;
        let maximized = self.system.is_maximized(handle)?;
        let client = self.client_size(handle)?;
        let client_screen = self.client_screen_rect(handle)?;
        let outer = self.outer_rect(handle);
        let visible = self.visible_rect(handle);

        Ok(GeometryReport {
            handle,
            title,
            outer,
            visible,
            client,
            client_screen,
            shadow: self.shadow_margins(handle),
            non_client: Margins::between(&visible, &client_screen),
            maximized,
            dpi: self.system.window_dpi(handle),
        })
    }
}
