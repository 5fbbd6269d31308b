//! Win32 window queries and placement
//!
//! This module handles:
//! - Enumerating top-level windows
//! - Reading the facts used to filter candidates (style, class, cloak)
//! - Measuring outer, extended-frame and client rectangles
//! - Restoring and moving/resizing windows without stealing focus
//!
//! CRITICAL: Target windows belong to other processes and can close between
//! any two calls. Every failure is checked against `IsWindow` so a closed
//! window surfaces as `PlatformError::StaleHandle`.

use std::ffi::c_void;

use windows::Win32::Foundation::{BOOL, HWND, LPARAM, POINT, RECT, TRUE};
use windows::Win32::Graphics::Dwm::{
    DwmGetWindowAttribute, DWMWA_CLOAKED, DWMWA_EXTENDED_FRAME_BOUNDS,
};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClassNameW, GetClientRect, GetWindowLongW, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindow,
    IsWindowVisible, IsZoomed, SetWindowPos, ShowWindow, GWL_EXSTYLE, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOZORDER, SW_RESTORE, WINDOW_EX_STYLE, WS_EX_APPWINDOW,
    WS_EX_TOOLWINDOW,
};

use super::monitors;
use super::{ExtendedStyle, Placement, PlatformError, WindowSystem};
use crate::domain::core::{Point, Rect};
use crate::domain::window::WindowHandle;

/// Production [`WindowSystem`] backed by user32 and the desktop compositor
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32System;

impl Win32System {
    pub fn new() -> Self {
        Self
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.raw())
}

/// Converts a Windows RECT to domain rectangle
pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
    Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom)
}

/// Classifies a failed query: a closed window is stale, anything else is a
/// query failure on a live window.
fn query_failed(handle: WindowHandle, call: &'static str, detail: impl ToString) -> PlatformError {
    if unsafe { IsWindow(hwnd(handle)) }.as_bool() {
        PlatformError::QueryFailed {
            call,
            handle,
            detail: detail.to_string(),
        }
    } else {
        PlatformError::StaleHandle(handle)
    }
}

fn call_failed(handle: WindowHandle, call: &'static str, detail: impl ToString) -> PlatformError {
    if unsafe { IsWindow(hwnd(handle)) }.as_bool() {
        PlatformError::CallFailed {
            call,
            handle,
            detail: detail.to_string(),
        }
    } else {
        PlatformError::StaleHandle(handle)
    }
}

/// Callback for `EnumWindows`; collects every top-level handle
unsafe extern "system" fn collect_window_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    unsafe {
        let handles = &mut *(lparam.0 as *mut Vec<WindowHandle>);
        handles.push(WindowHandle(hwnd.0));
    }
    TRUE // Continue enumeration
}

impl WindowSystem for Win32System {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, PlatformError> {
        let mut handles: Vec<WindowHandle> = Vec::new();

        unsafe {
            EnumWindows(
                Some(collect_window_proc),
                LPARAM(&mut handles as *mut Vec<WindowHandle> as isize),
            )
            .map_err(|e| PlatformError::EnumerationFailed(e.to_string()))?;
        }

        Ok(handles)
    }

    fn current_process_id(&self) -> u32 {
        unsafe { GetCurrentProcessId() }
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindow(hwnd(handle)) }.as_bool()
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindowVisible(hwnd(handle)) }.as_bool()
    }

    fn title(&self, handle: WindowHandle) -> Result<String, PlatformError> {
        unsafe {
            let length = GetWindowTextLengthW(hwnd(handle));
            if length <= 0 {
                // Zero is also the answer for an untitled window
                if !self.is_window(handle) {
                    return Err(PlatformError::StaleHandle(handle));
                }
                return Ok(String::new());
            }

            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(hwnd(handle), &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..copied.max(0) as usize]))
        }
    }

    fn class_name(&self, handle: WindowHandle) -> Result<String, PlatformError> {
        // Class names are limited to 256 characters
        let mut buffer = [0u16; 257];
        let length = unsafe { GetClassNameW(hwnd(handle), &mut buffer) };
        if length <= 0 {
            return Err(query_failed(handle, "GetClassNameW", "empty class name"));
        }
        Ok(String::from_utf16_lossy(&buffer[..length as usize]))
    }

    fn process_id(&self, handle: WindowHandle) -> Result<u32, PlatformError> {
        let mut pid: u32 = 0;
        let thread = unsafe { GetWindowThreadProcessId(hwnd(handle), Some(&mut pid as *mut u32)) };
        if thread == 0 {
            return Err(query_failed(handle, "GetWindowThreadProcessId", "no owning thread"));
        }
        Ok(pid)
    }

    fn extended_style(&self, handle: WindowHandle) -> Result<ExtendedStyle, PlatformError> {
        let raw = unsafe { GetWindowLongW(hwnd(handle), GWL_EXSTYLE) };
        if raw == 0 && !self.is_window(handle) {
            return Err(PlatformError::StaleHandle(handle));
        }

        let style = WINDOW_EX_STYLE(raw as u32);
        Ok(ExtendedStyle {
            tool_window: (style & WS_EX_TOOLWINDOW) != WINDOW_EX_STYLE(0),
            app_window: (style & WS_EX_APPWINDOW) != WINDOW_EX_STYLE(0),
        })
    }

    fn is_cloaked(&self, handle: WindowHandle) -> Result<bool, PlatformError> {
        let mut cloaked: u32 = 0;
        unsafe {
            DwmGetWindowAttribute(
                hwnd(handle),
                DWMWA_CLOAKED,
                &mut cloaked as *mut u32 as *mut c_void,
                std::mem::size_of::<u32>() as u32,
            )
        }
        .map_err(|e| query_failed(handle, "DwmGetWindowAttribute(CLOAKED)", e))?;

        Ok(cloaked != 0)
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd(handle), &mut rect) }
            .map_err(|e| query_failed(handle, "GetWindowRect", e))?;
        Ok(win32_rect_to_rect(&rect))
    }

    fn extended_frame_bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        let mut rect = RECT::default();
        unsafe {
            DwmGetWindowAttribute(
                hwnd(handle),
                DWMWA_EXTENDED_FRAME_BOUNDS,
                &mut rect as *mut RECT as *mut c_void,
                std::mem::size_of::<RECT>() as u32,
            )
        }
        .map_err(|e| query_failed(handle, "DwmGetWindowAttribute(EXTENDED_FRAME_BOUNDS)", e))?;

        Ok(win32_rect_to_rect(&rect))
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd(handle), &mut rect) }
            .map_err(|e| query_failed(handle, "GetClientRect", e))?;
        Ok(win32_rect_to_rect(&rect))
    }

    fn client_to_screen(&self, handle: WindowHandle, point: Point) -> Result<Point, PlatformError> {
        let mut mapped = POINT {
            x: point.x,
            y: point.y,
        };
        if !unsafe { ClientToScreen(hwnd(handle), &mut mapped) }.as_bool() {
            return Err(query_failed(handle, "ClientToScreen", "mapping failed"));
        }
        Ok(Point::new(mapped.x, mapped.y))
    }

    fn monitor_origin(&self, handle: WindowHandle) -> Result<Point, PlatformError> {
        monitors::monitor_origin_for_window(hwnd(handle))
            .map_err(|e| query_failed(handle, "GetMonitorInfoW", e))
    }

    fn window_dpi(&self, handle: WindowHandle) -> Option<u32> {
        monitors::window_dpi(hwnd(handle))
    }

    fn is_maximized(&self, handle: WindowHandle) -> Result<bool, PlatformError> {
        if !self.is_window(handle) {
            return Err(PlatformError::StaleHandle(handle));
        }
        Ok(unsafe { IsZoomed(hwnd(handle)) }.as_bool())
    }

    fn is_minimized(&self, handle: WindowHandle) -> Result<bool, PlatformError> {
        if !self.is_window(handle) {
            return Err(PlatformError::StaleHandle(handle));
        }
        Ok(unsafe { IsIconic(hwnd(handle)) }.as_bool())
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        // ShowWindow returns the previous visibility, not success
        unsafe {
            let _ = ShowWindow(hwnd(handle), SW_RESTORE);
        }
        if !self.is_window(handle) {
            return Err(PlatformError::StaleHandle(handle));
        }
        Ok(())
    }

    fn set_placement(&self, handle: WindowHandle, placement: Placement) -> Result<(), PlatformError> {
        // SWP_FRAMECHANGED: recompute non-client metrics after the resize
        // SWP_NOZORDER | SWP_NOACTIVATE: leave stacking and focus alone
        let mut flags = SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED;
        let (x, y) = match placement.position {
            Some(origin) => (origin.x, origin.y),
            None => {
                flags |= SWP_NOMOVE;
                (0, 0)
            }
        };

        unsafe {
            SetWindowPos(
                hwnd(handle),
                HWND(0), // Ignored due to SWP_NOZORDER flag
                x,
                y,
                placement.size.w,
                placement.size.h,
                flags,
            )
        }
        .map_err(|e| call_failed(handle, "SetWindowPos", e))
    }

    fn dpi_awareness(&self) -> String {
        monitors::dpi_awareness_label().to_string()
    }
}
