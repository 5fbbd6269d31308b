//! In-memory desktop used to exercise the geometry engine in tests
//!
//! Each simulated window is described by its outer rect plus two nested
//! margins (invisible shadow, then visible chrome), mirroring how the real
//! compositor lays out a top-level window. Applications that refuse sizes
//! are modelled with [`SizeQuirk`].

use std::cell::RefCell;
use std::time::{Duration, Instant};

use super::{ExtendedStyle, Placement, PlatformError, WindowSystem};
use crate::domain::core::{Margins, Point, Rect, Size};
use crate::domain::window::WindowHandle;

/// How a simulated application reacts to a requested client size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeQuirk {
    /// Takes exactly the requested size
    Honors,
    /// Rounds width down to a multiple of `step`, then subtracts `trim`
    SnapWidth { step: i32, trim: i32 },
    /// Never grows past the given client size
    ClampMax(Size),
    /// The first resize lands short by the given amount, later ones are exact
    ShortOnce { dw: i32, dh: i32 },
}

impl SizeQuirk {
    fn apply(&mut self, requested: Size) -> Size {
        match *self {
            SizeQuirk::Honors => requested,
            SizeQuirk::SnapWidth { step, trim } => {
                Size::new((requested.w / step) * step - trim, requested.h)
            }
            SizeQuirk::ClampMax(max) => Size::new(requested.w.min(max.w), requested.h.min(max.h)),
            SizeQuirk::ShortOnce { dw, dh } => {
                *self = SizeQuirk::Honors;
                Size::new(requested.w - dw, requested.h - dh)
            }
        }
    }
}

/// One simulated top-level window
#[derive(Debug, Clone)]
pub struct SimWindow {
    pub title: String,
    pub class_name: String,
    pub process_id: u32,
    pub visible: bool,
    pub style: ExtendedStyle,
    /// `None` makes the cloak query fail
    pub cloaked: Option<bool>,
    /// When false the extended-frame-bounds query fails
    pub frame_bounds_supported: bool,
    pub outer: Rect,
    pub shadow: Margins,
    /// Title bar and borders, measured from the visible rect
    pub frame: Margins,
    pub maximized: bool,
    pub minimized: bool,
    /// Outer rect the window returns to when restored
    pub normal_outer: Rect,
    pub quirk: SizeQuirk,
    pub dpi: Option<u32>,
    /// Placements take effect this long after the call, like an app that
    /// handles `WM_SIZE` on a slow render thread
    pub apply_delay: Option<Duration>,
    /// `set_placement` is refused, as for an elevated target
    pub placement_fails: bool,
}

impl SimWindow {
    /// A standard window with a Windows 10/11 style invisible shadow
    pub fn standard(title: &str, outer: Rect) -> Self {
        Self {
            title: title.to_string(),
            class_name: "ApplicationWindowClass".to_string(),
            process_id: 100,
            visible: true,
            style: ExtendedStyle::default(),
            cloaked: Some(false),
            frame_bounds_supported: true,
            outer,
            shadow: Margins::new(7, 0, 7, 7),
            frame: Margins::new(1, 31, 1, 1),
            maximized: false,
            minimized: false,
            normal_outer: outer,
            quirk: SizeQuirk::Honors,
            dpi: Some(96),
            apply_delay: None,
            placement_fails: false,
        }
    }

    /// A window whose client size is `client`, with the given margins
    pub fn with_client(title: &str, origin: Point, client: Size, shadow: Margins, frame: Margins) -> Self {
        let outer = Rect::new(
            origin.x,
            origin.y,
            client.w + shadow.horizontal() + frame.horizontal(),
            client.h + shadow.vertical() + frame.vertical(),
        );
        Self {
            shadow,
            frame,
            ..Self::standard(title, outer)
        }
    }

    pub fn visible_rect(&self) -> Rect {
        self.outer.inset(self.shadow)
    }

    pub fn client_screen_rect(&self) -> Rect {
        self.visible_rect().inset(self.frame)
    }

    pub fn client_size(&self) -> Size {
        self.client_screen_rect().size()
    }
}

/// Calls that change window state, recorded in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCall {
    Restore(WindowHandle),
    SetPlacement(WindowHandle, Placement),
}

/// A fake desktop implementing [`WindowSystem`]
#[derive(Debug)]
pub struct SimulatedDesktop {
    own_process_id: u32,
    monitors: Vec<Rect>,
    windows: RefCell<Vec<(WindowHandle, SimWindow)>>,
    calls: RefCell<Vec<SimCall>>,
    next_handle: RefCell<isize>,
    enumeration_fails: bool,
    /// Delayed placements: window, due time, new outer rect
    pending: RefCell<Vec<(WindowHandle, Instant, Rect)>>,
}

impl SimulatedDesktop {
    pub const OWN_PROCESS_ID: u32 = 4242;

    /// A desktop with one 1920×1080 monitor at the origin
    pub fn new() -> Self {
        Self::with_monitors(vec![Rect::new(0, 0, 1920, 1080)])
    }

    pub fn with_monitors(monitors: Vec<Rect>) -> Self {
        Self {
            own_process_id: Self::OWN_PROCESS_ID,
            monitors,
            windows: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            next_handle: RefCell::new(0x10010),
            enumeration_fails: false,
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_enumeration() -> Self {
        Self {
            enumeration_fails: true,
            ..Self::new()
        }
    }

    /// Adds a window on top of the Z-order and returns its handle
    pub fn add(&self, window: SimWindow) -> WindowHandle {
        let mut next = self.next_handle.borrow_mut();
        let handle = WindowHandle(*next);
        *next += 0x10;
        self.windows.borrow_mut().push((handle, window));
        handle
    }

    /// Closes a window; its handle becomes stale
    pub fn close(&self, handle: WindowHandle) {
        self.windows.borrow_mut().retain(|(h, _)| *h != handle);
    }

    pub fn window(&self, handle: WindowHandle) -> Option<SimWindow> {
        self.apply_due();
        self.windows
            .borrow()
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, w)| w.clone())
    }

    pub fn calls(&self) -> Vec<SimCall> {
        self.calls.borrow().clone()
    }

    pub fn placements(&self, handle: WindowHandle) -> Vec<Placement> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SimCall::SetPlacement(h, placement) if *h == handle => Some(*placement),
                _ => None,
            })
            .collect()
    }

    /// Applies delayed placements whose time has come
    fn apply_due(&self) {
        let now = Instant::now();
        let mut pending = self.pending.borrow_mut();
        let mut windows = self.windows.borrow_mut();
        pending.retain(|&(handle, due, outer)| {
            if due > now {
                return true;
            }
            if let Some((_, w)) = windows.iter_mut().find(|(h, _)| *h == handle) {
                place(w, outer);
            }
            false
        });
    }

    fn read<T>(&self, handle: WindowHandle, f: impl FnOnce(&SimWindow) -> T) -> Result<T, PlatformError> {
        self.apply_due();
        self.windows
            .borrow()
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, w)| f(w))
            .ok_or(PlatformError::StaleHandle(handle))
    }

    fn write<T>(&self, handle: WindowHandle, f: impl FnOnce(&mut SimWindow) -> T) -> Result<T, PlatformError> {
        self.apply_due();
        self.windows
            .borrow_mut()
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, w)| f(w))
            .ok_or(PlatformError::StaleHandle(handle))
    }
}

fn place(window: &mut SimWindow, outer: Rect) {
    window.outer = outer;
    window.normal_outer = outer;
    window.maximized = false;
}

impl Default for SimulatedDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSystem for SimulatedDesktop {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, PlatformError> {
        if self.enumeration_fails {
            return Err(PlatformError::EnumerationFailed("simulated failure".to_string()));
        }
        // Most recently added window is on top
        Ok(self.windows.borrow().iter().rev().map(|(h, _)| *h).collect())
    }

    fn current_process_id(&self) -> u32 {
        self.own_process_id
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.read(handle, |_| ()).is_ok()
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        self.read(handle, |w| w.visible).unwrap_or(false)
    }

    fn title(&self, handle: WindowHandle) -> Result<String, PlatformError> {
        self.read(handle, |w| w.title.clone())
    }

    fn class_name(&self, handle: WindowHandle) -> Result<String, PlatformError> {
        self.read(handle, |w| w.class_name.clone())
    }

    fn process_id(&self, handle: WindowHandle) -> Result<u32, PlatformError> {
        self.read(handle, |w| w.process_id)
    }

    fn extended_style(&self, handle: WindowHandle) -> Result<ExtendedStyle, PlatformError> {
        self.read(handle, |w| w.style)
    }

    fn is_cloaked(&self, handle: WindowHandle) -> Result<bool, PlatformError> {
        self.read(handle, |w| w.cloaked)?
            .ok_or_else(|| PlatformError::QueryFailed {
                call: "DwmGetWindowAttribute(CLOAKED)",
                handle,
                detail: "attribute not supported".to_string(),
            })
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        self.read(handle, |w| w.outer)
    }

    fn extended_frame_bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        let (supported, visible) = self.read(handle, |w| (w.frame_bounds_supported, w.visible_rect()))?;
        if !supported {
            return Err(PlatformError::QueryFailed {
                call: "DwmGetWindowAttribute(EXTENDED_FRAME_BOUNDS)",
                handle,
                detail: "composition disabled".to_string(),
            });
        }
        Ok(visible)
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        self.read(handle, |w| {
            let size = w.client_size();
            Rect::new(0, 0, size.w, size.h)
        })
    }

    fn client_to_screen(&self, handle: WindowHandle, point: Point) -> Result<Point, PlatformError> {
        self.read(handle, |w| {
            let client = w.client_screen_rect();
            Point::new(client.x + point.x, client.y + point.y)
        })
    }

    fn monitor_origin(&self, handle: WindowHandle) -> Result<Point, PlatformError> {
        let visible = self.read(handle, |w| w.visible_rect())?;
        let center = Point::new(visible.x + visible.w / 2, visible.y + visible.h / 2);
        self.monitors
            .iter()
            .find(|m| m.contains_point(center.x, center.y))
            .or_else(|| self.monitors.first())
            .map(|m| m.origin())
            .ok_or_else(|| PlatformError::QueryFailed {
                call: "GetMonitorInfoW",
                handle,
                detail: "no monitors".to_string(),
            })
    }

    fn window_dpi(&self, handle: WindowHandle) -> Option<u32> {
        self.read(handle, |w| w.dpi).ok().flatten()
    }

    fn is_maximized(&self, handle: WindowHandle) -> Result<bool, PlatformError> {
        self.read(handle, |w| w.maximized)
    }

    fn is_minimized(&self, handle: WindowHandle) -> Result<bool, PlatformError> {
        self.read(handle, |w| w.minimized)
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(SimCall::Restore(handle));
        self.write(handle, |w| {
            if w.maximized || w.minimized {
                w.outer = w.normal_outer;
            }
            w.maximized = false;
            w.minimized = false;
        })
    }

    fn set_placement(&self, handle: WindowHandle, placement: Placement) -> Result<(), PlatformError> {
        self.calls
            .borrow_mut()
            .push(SimCall::SetPlacement(handle, placement));
        let delayed = self.write(handle, |w| {
            if w.placement_fails {
                return Err(PlatformError::CallFailed {
                    call: "SetWindowPos",
                    handle,
                    detail: "access is denied".to_string(),
                });
            }

            let chrome_w = w.shadow.horizontal() + w.frame.horizontal();
            let chrome_h = w.shadow.vertical() + w.frame.vertical();
            let requested = Size::new(placement.size.w - chrome_w, placement.size.h - chrome_h);
            let client = w.quirk.apply(requested);

            let origin = placement.position.unwrap_or(w.outer.origin());
            let outer = Rect::new(origin.x, origin.y, client.w + chrome_w, client.h + chrome_h);
            match w.apply_delay {
                Some(delay) => Ok(Some((Instant::now() + delay, outer))),
                None => {
                    place(w, outer);
                    Ok(None)
                }
            }
        })??;

        if let Some((due, outer)) = delayed {
            self.pending.borrow_mut().push((handle, due, outer));
        }
        Ok(())
    }

    fn dpi_awareness(&self) -> String {
        "PER_MONITOR".to_string()
    }
}
