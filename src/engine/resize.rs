//! Resize controller
//!
//! Forces a window's *client* area to an exact size. The outer size needed
//! for that is never derived from border thickness: the controller measures
//! the live outer and client sizes and grows or shrinks the outer box by the
//! client shortfall, so the window's own geometry supplies the unknown
//! chrome. One retry covers applications that settle at a slightly
//! different size on the first pass.
//!
//! Per handle:
//! 1. restore a maximized or minimized window, then settle
//! 2. measure outer and client size
//! 3. outer' = outer + (target - client)
//! 4. optionally align the visible rect with the monitor origin
//! 5. apply move + resize in one call
//! 6. settle and re-measure the client size
//! 7. if the target was missed, repeat 3..6 exactly once
//! 8. report exact, constraint miss or a handle-scoped error

use std::thread;
use std::time::Instant;

use crate::config::{ConfigError, ResizeConfig, SettleStrategy};
use crate::domain::core::{Margins, Point, Size};
use crate::domain::window::WindowHandle;
use crate::engine::diagnostics::{DiagnosticLog, Diagnostics};
use crate::engine::probe::GeometryProbe;
use crate::platform::{Placement, PlatformError, WindowSystem};

/// One user-triggered resize of one or more windows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    /// Windows to resize, processed in this order
    pub handles: Vec<WindowHandle>,
    pub target: Size,
    /// Align each window's visible top-left with its monitor's top-left
    pub move_to_origin: bool,
}

impl ResizeRequest {
    pub fn new(handles: Vec<WindowHandle>, target: Size, move_to_origin: bool) -> Self {
        Self {
            handles,
            target,
            move_to_origin,
        }
    }
}

/// Errors that reject a whole request before any window is touched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResizeError {
    #[error("no window selected")]
    NoSelection,
    #[error(transparent)]
    InvalidTarget(#[from] ConfigError),
}

/// How a single window's resize ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeStatus {
    /// Client area matches the target exactly
    Exact,
    /// The application kept a different size after the retry
    ConstraintMiss,
    /// The window closed during the operation
    StaleHandle,
    /// A platform call failed for a live window
    Failed(String),
}

/// Result of resizing one window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub handle: WindowHandle,
    pub title: String,
    pub target: Size,
    /// Last measured client size, if the window could be measured
    pub achieved: Option<Size>,
    pub status: ResizeStatus,
    /// Placement calls issued (0, 1 or 2)
    pub passes: u8,
}

impl ResizeOutcome {
    pub fn is_success(&self) -> bool {
        self.status == ResizeStatus::Exact
    }

    /// Status line for the user
    pub fn message(&self) -> String {
        match (&self.status, self.achieved) {
            (ResizeStatus::Exact, _) => format!("Client area {} ✓", self.target),
            (ResizeStatus::ConstraintMiss, Some(size)) => {
                format!("Attempted - client {} (window may have constraints)", size)
            }
            (ResizeStatus::ConstraintMiss, None) => {
                "Attempted (window may have constraints)".to_string()
            }
            (ResizeStatus::StaleHandle, _) => "Window closed before it could be resized".to_string(),
            (ResizeStatus::Failed(reason), _) => format!("Error: {}", reason),
        }
    }
}

/// Outcomes of one request, in request order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ResizeOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded() == self.outcomes.len()
    }

    pub fn summary(&self) -> String {
        match self.outcomes.as_slice() {
            [single] => single.message(),
            outcomes if self.all_succeeded() => {
                format!("{}/{} windows resized ✓", outcomes.len(), outcomes.len())
            }
            outcomes => format!("{}/{} succeeded", self.succeeded(), outcomes.len()),
        }
    }
}

/// Outer size that makes the client area `target`, given the live sizes
pub fn required_outer_size(outer: Size, client: Size, target: Size) -> Size {
    let (dw, dh) = target.delta(client);
    Size::new(outer.w + dw, outer.h + dh)
}

/// Outer-rect origin that puts the visible (shadow-free) top-left on `monitor`
pub fn aligned_origin(monitor: Point, shadow: Margins) -> Point {
    Point::new(monitor.x - shadow.left, monitor.y - shadow.top)
}

/// Apply passes of the retry state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    First,
    Retry,
}

/// Drives resizes against a [`WindowSystem`]
pub struct ResizeController<'a, S: WindowSystem + ?Sized> {
    system: &'a S,
    probe: GeometryProbe<'a, S>,
    config: ResizeConfig,
}

impl<'a, S: WindowSystem + ?Sized> ResizeController<'a, S> {
    pub fn new(system: &'a S, config: ResizeConfig) -> Self {
        Self {
            system,
            probe: GeometryProbe::new(system),
            config,
        }
    }

    /// Resizes every window in the request, in order
    ///
    /// A failing window never stops the others.
    pub fn resize_all(
        &self,
        request: &ResizeRequest,
        log: &mut dyn DiagnosticLog,
    ) -> Result<BatchReport, ResizeError> {
        if request.handles.is_empty() {
            tracing::warn!("resize requested with no window selected");
            return Err(ResizeError::NoSelection);
        }
        ResizeConfig::validate_target(request.target)?;

        let outcomes = request
            .handles
            .iter()
            .map(|&handle| self.resize(handle, request.target, request.move_to_origin, &mut *log))
            .collect();

        Ok(BatchReport { outcomes })
    }

    /// Resizes one window so its client area is `target`
    pub fn resize(
        &self,
        handle: WindowHandle,
        target: Size,
        move_to_origin: bool,
        log: &mut dyn DiagnosticLog,
    ) -> ResizeOutcome {
        let mut diag = Diagnostics::new(log);
        let title = self.system.title(handle).unwrap_or_default();

        let mut outcome = ResizeOutcome {
            handle,
            title,
            target,
            achieved: None,
            status: ResizeStatus::ConstraintMiss,
            passes: 0,
        };

        match self.run(handle, target, move_to_origin, &mut outcome, &mut diag) {
            Ok(achieved) => {
                outcome.achieved = Some(achieved);
                outcome.status = if achieved == target {
                    ResizeStatus::Exact
                } else {
                    ResizeStatus::ConstraintMiss
                };
            }
            Err(err) => {
                diag.line(format!("  ERROR   : {}", err));
                outcome.status = if err.is_stale() || !self.system.is_window(handle) {
                    ResizeStatus::StaleHandle
                } else {
                    ResizeStatus::Failed(err.to_string())
                };
            }
        }

        tracing::info!("{} {:?}: {}", handle, outcome.title, outcome.message());
        outcome
    }

    fn run(
        &self,
        handle: WindowHandle,
        target: Size,
        move_to_origin: bool,
        outcome: &mut ResizeOutcome,
        diag: &mut Diagnostics<'_>,
    ) -> Result<Size, PlatformError> {
        diag.line("── Resize ───────────────────────────────────────");

        // Maximized windows ignore size changes until restored
        if self.system.is_maximized(handle)? || self.system.is_minimized(handle)? {
            diag.line("  Restore  : SW_RESTORE");
            self.system.restore(handle)?;
            pause(self.config.restore_settle);
        }

        let baseline = self.probe.report(handle)?;
        diag.block(&baseline.to_string());
        diag.line(format!("  Process  : dpi_awareness={}", self.system.dpi_awareness()));

        let mut outer = baseline.outer.size();
        let mut client = baseline.client;

        for pass in [Pass::First, Pass::Retry] {
            if pass == Pass::Retry {
                if client == target {
                    break;
                }
                diag.line(format!("  Retry    : client={} settled off target", client));
            }

            let size = required_outer_size(outer, client, target);
            let position = move_to_origin.then(|| {
                aligned_origin(
                    self.probe.monitor_top_left(handle),
                    self.probe.shadow_margins(handle),
                )
            });
            let (dw, dh) = target.delta(client);
            match position {
                Some(origin) => diag.line(format!(
                    "  Calling  : SetWindowPos(x={}, y={}, w={}, h={})  [Δclient w={:+} h={:+}]",
                    origin.x, origin.y, size.w, size.h, dw, dh
                )),
                None => diag.line(format!(
                    "  Calling  : SetWindowPos(w={}, h={})  [Δclient w={:+} h={:+}]",
                    size.w, size.h, dw, dh
                )),
            }

            self.system
                .set_placement(handle, Placement { position, size })?;
            outcome.passes += 1;

            client = self.settle(handle, target, client)?;
            outcome.achieved = Some(client);
            outer = self.probe.outer_rect(handle).size();
        }

        let visible = self.probe.visible_rect(handle);
        diag.line(format!("  After    : visible={}  client={}", visible.size(), client));
        diag.line("────────────────────────────────────────────────");
        Ok(client)
    }

    /// Waits for the window to apply the last placement and returns the
    /// client size it settled at
    ///
    /// `before` is the client size measured before the placement call.
    fn settle(&self, handle: WindowHandle, target: Size, before: Size) -> Result<Size, PlatformError> {
        match self.config.settle {
            SettleStrategy::Fixed(delay) => {
                pause(delay);
                self.probe.client_size(handle)
            }
            SettleStrategy::Poll { interval, timeout } => {
                let deadline = Instant::now() + timeout;
                let mut last = self.probe.client_size(handle)?;
                // Done once the target is reached, or once the window has
                // reacted and the new size held for one interval
                while last != target && Instant::now() < deadline {
                    pause(interval);
                    let current = self.probe.client_size(handle)?;
                    if current == last && current != before {
                        break;
                    }
                    last = current;
                }
                Ok(last)
            }
        }
    }
}

fn pause(delay: std::time::Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
