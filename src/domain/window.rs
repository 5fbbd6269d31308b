//! Window identity and candidate classification
//!
//! A window "kind" (shell chrome, tool palette, cloaked UWP frame, ...) is
//! decided by a pure function over facts gathered by the platform layer, so
//! every exclusion rule can be tested without a live desktop.

use std::fmt;
use std::str::FromStr;

/// Opaque OS identifier of a top-level window
///
/// The handle is not owned by this program. The OS may revoke it at any time
/// (the window closes), so every operation on it can fail with a stale handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub fn raw(&self) -> isize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Error returned when a handle cannot be parsed from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid window handle '{input}': expected decimal or 0x-prefixed hex")]
pub struct HandleParseError {
    pub input: String,
}

impl FromStr for WindowHandle {
    type Err = HandleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => isize::from_str_radix(hex, 16),
            None => trimmed.parse::<isize>(),
        };

        match parsed {
            Ok(value) if value != 0 => Ok(WindowHandle(value)),
            _ => Err(HandleParseError {
                input: s.to_string(),
            }),
        }
    }
}

/// Window classes that belong to the shell and are never capture targets
pub const SHELL_CLASSES: &[&str] = &[
    "Progman",                    // Desktop ("Program Manager")
    "WorkerW",                    // Desktop wallpaper worker
    "Shell_TrayWnd",              // Taskbar
    "Shell_SecondaryTrayWnd",     // Secondary-monitor taskbar
    "DV2ControlHost",             // Start menu host
    "Windows.UI.Core.CoreWindow", // UWP shell chrome
];

/// Facts about one top-level window, gathered in a single pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFacts {
    pub handle: WindowHandle,
    pub visible: bool,
    pub title: String,
    pub process_id: u32,
    pub class_name: String,
    /// `WS_EX_TOOLWINDOW`
    pub tool_window: bool,
    /// `WS_EX_APPWINDOW`, which opts a tool window back into the task list
    pub app_window: bool,
    /// Cloaked by the compositor (suspended, or on another virtual desktop)
    pub cloaked: bool,
}

/// Outcome of classifying a window for the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowVerdict {
    Eligible,
    Hidden,
    Untitled,
    ExcludedSelf,
    ExcludedShell,
    ExcludedTool,
    ExcludedCloaked,
}

impl WindowVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, WindowVerdict::Eligible)
    }
}

/// Decides whether a window belongs in the candidate list
///
/// Rules are checked in a fixed order and the first failing rule wins.
pub fn classify(facts: &WindowFacts, own_process_id: u32) -> WindowVerdict {
    if !facts.visible {
        return WindowVerdict::Hidden;
    }
    if facts.title.trim().is_empty() {
        return WindowVerdict::Untitled;
    }
    if facts.process_id == own_process_id {
        return WindowVerdict::ExcludedSelf;
    }
    if SHELL_CLASSES.contains(&facts.class_name.as_str()) {
        return WindowVerdict::ExcludedShell;
    }
    if facts.tool_window && !facts.app_window {
        return WindowVerdict::ExcludedTool;
    }
    if facts.cloaked {
        return WindowVerdict::ExcludedCloaked;
    }
    WindowVerdict::Eligible
}

/// A window offered to the user for resizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWindow {
    pub handle: WindowHandle,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWN_PID: u32 = 4242;

    fn app_window() -> WindowFacts {
        WindowFacts {
            handle: WindowHandle(0x1001),
            visible: true,
            title: "Game".to_string(),
            process_id: 17,
            class_name: "UnityWndClass".to_string(),
            tool_window: false,
            app_window: false,
            cloaked: false,
        }
    }

    #[test]
    fn regular_window_is_eligible() {
        assert_eq!(classify(&app_window(), OWN_PID), WindowVerdict::Eligible);
    }

    #[test]
    fn invisible_and_untitled_windows_are_skipped() {
        let mut hidden = app_window();
        hidden.visible = false;
        assert_eq!(classify(&hidden, OWN_PID), WindowVerdict::Hidden);

        let mut untitled = app_window();
        untitled.title = "   \t".to_string();
        assert_eq!(classify(&untitled, OWN_PID), WindowVerdict::Untitled);
    }

    #[test]
    fn own_process_is_excluded() {
        let mut own = app_window();
        own.process_id = OWN_PID;
        assert_eq!(classify(&own, OWN_PID), WindowVerdict::ExcludedSelf);
    }

    #[test]
    fn shell_classes_are_excluded() {
        for class in SHELL_CLASSES {
            let mut shell = app_window();
            shell.class_name = class.to_string();
            assert_eq!(classify(&shell, OWN_PID), WindowVerdict::ExcludedShell);
        }
    }

    #[test]
    fn tool_windows_need_app_window_opt_in() {
        let mut tool = app_window();
        tool.tool_window = true;
        assert_eq!(classify(&tool, OWN_PID), WindowVerdict::ExcludedTool);

        tool.app_window = true;
        assert_eq!(classify(&tool, OWN_PID), WindowVerdict::Eligible);
    }

    #[test]
    fn cloaked_windows_are_excluded() {
        let mut cloaked = app_window();
        cloaked.cloaked = true;
        assert_eq!(classify(&cloaked, OWN_PID), WindowVerdict::ExcludedCloaked);
        assert!(!classify(&cloaked, OWN_PID).is_eligible());
    }

    #[test]
    fn handle_parsing_accepts_hex_and_decimal() {
        assert_eq!("0x000A0B1C".parse(), Ok(WindowHandle(0x000A_0B1C)));
        assert_eq!("0XFF".parse(), Ok(WindowHandle(255)));
        assert_eq!(" 65552 ".parse(), Ok(WindowHandle(65552)));
        assert!("0".parse::<WindowHandle>().is_err());
        assert!("notahandle".parse::<WindowHandle>().is_err());
        assert!("0xZZ".parse::<WindowHandle>().is_err());
    }

    #[test]
    fn handle_displays_as_padded_hex() {
        assert_eq!(WindowHandle(0x1A2B).to_string(), "0x00001a2b");
    }
}
