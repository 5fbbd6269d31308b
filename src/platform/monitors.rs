//! Monitor lookup and DPI awareness
//!
//! This module is responsible for:
//! - Finding the monitor that hosts a window
//! - Reading per-window DPI for diagnostics
//! - Putting the process into per-monitor DPI awareness at startup
//!
//! CRITICAL: Coordinates live in the Windows virtual screen, where secondary
//! monitors can have negative origins. They are only physical pixels if the
//! process is DPI aware, so `enable_dpi_awareness` must run before any
//! geometry is measured.

use windows::Win32::Foundation::{HANDLE, HWND};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::UI::HiDpi::{
    GetDpiForWindow, GetProcessDpiAwareness, SetProcessDpiAwarenessContext,
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, PROCESS_PER_MONITOR_DPI_AWARE,
    PROCESS_DPI_UNAWARE, PROCESS_SYSTEM_DPI_AWARE,
};
use windows::Win32::UI::WindowsAndMessaging::SetProcessDPIAware;

use crate::domain::core::{Point, Rect};

/// Error types for monitor operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    /// No monitor could be associated with the window
    #[error("no monitor found for window")]
    MonitorNotFound,
    /// Failed to get monitor information
    #[error("failed to get monitor information")]
    InfoFailed,
}

/// DPI awareness mode the process ended up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpiAwareness {
    PerMonitorV2,
    System,
    Unaware,
}

/// Full bounds of the monitor nearest to the window
pub fn monitor_rect_for_window(hwnd: HWND) -> Result<Rect, MonitorError> {
    unsafe {
        let hmonitor = MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST);
        if hmonitor.is_invalid() {
            return Err(MonitorError::MonitorNotFound);
        }

        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if !GetMonitorInfoW(hmonitor, &mut info).as_bool() {
            return Err(MonitorError::InfoFailed);
        }

        let bounds = info.rcMonitor;
        Ok(Rect::from_edges(bounds.left, bounds.top, bounds.right, bounds.bottom))
    }
}

/// Top-left corner of the monitor nearest to the window
pub fn monitor_origin_for_window(hwnd: HWND) -> Result<Point, MonitorError> {
    monitor_rect_for_window(hwnd).map(|rect| rect.origin())
}

/// Effective DPI of a window, or `None` if the OS cannot report it
pub fn window_dpi(hwnd: HWND) -> Option<u32> {
    match unsafe { GetDpiForWindow(hwnd) } {
        0 => None,
        dpi => Some(dpi),
    }
}

/// Requests per-monitor DPI awareness, falling back to system awareness
///
/// Failure is not fatal: an unaware process still works, it just measures
/// scaled coordinates and the user may need to resize again.
pub fn enable_dpi_awareness() -> DpiAwareness {
    unsafe {
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_ok() {
            return DpiAwareness::PerMonitorV2;
        }
        if SetProcessDPIAware().as_bool() {
            return DpiAwareness::System;
        }
    }
    DpiAwareness::Unaware
}

/// Current process DPI awareness as reported by the OS
pub fn dpi_awareness_label() -> &'static str {
    match unsafe { GetProcessDpiAwareness(HANDLE::default()) } {
        Ok(PROCESS_DPI_UNAWARE) => "UNAWARE",
        Ok(PROCESS_SYSTEM_DPI_AWARE) => "SYSTEM",
        Ok(PROCESS_PER_MONITOR_DPI_AWARE) => "PER_MONITOR",
        _ => "unknown",
    }
}
