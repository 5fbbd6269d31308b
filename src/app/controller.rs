//! Application controller and coordination layer
//!
//! The controller is what the external collaborators talk to: the window
//! list provider reads candidates and per-window size text, the resize
//! trigger submits requests. It owns the platform backend and the resize
//! configuration and must live on the thread that performs geometry work.

use crate::app::state::size_summary;
use crate::config::{ConfigError, ResizeConfig};
use crate::domain::core::{Margins, Size};
use crate::domain::window::{CandidateWindow, WindowHandle};
use crate::engine::{
    list_candidate_windows, BatchReport, DiagnosticLog, GeometryProbe, GeometryReport,
    ResizeController, ResizeError, ResizeRequest,
};
use crate::platform::{PlatformError, WindowSystem};

/// Application errors that can occur during controller operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Resize(#[from] ResizeError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Size information for one selected window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub handle: WindowHandle,
    pub client: Size,
    pub non_client: Margins,
    /// Client area already matches the configured target
    pub at_target: bool,
}

impl WindowSummary {
    pub fn text(&self) -> String {
        size_summary(self.client, self.non_client)
    }
}

/// Entry point of the geometry engine for front ends
pub struct GeometryController<S: WindowSystem> {
    system: S,
    config: ResizeConfig,
}

impl<S: WindowSystem> GeometryController<S> {
    /// Creates a controller, rejecting invalid configuration up front
    pub fn new(system: S, config: ResizeConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { system, config })
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// Candidate windows for the selection list
    pub fn list_windows(&self) -> Result<Vec<CandidateWindow>, AppError> {
        Ok(list_candidate_windows(&self.system)?)
    }

    /// Client size and chrome of one window, for informational display
    pub fn describe(&self, handle: WindowHandle) -> Result<WindowSummary, AppError> {
        let probe = GeometryProbe::new(&self.system);
        let client = probe.client_size(handle)?;
        let non_client = probe.non_client_margins(handle);

        Ok(WindowSummary {
            handle,
            client,
            non_client,
            at_target: client == self.config.target,
        })
    }

    /// Full geometry snapshot of one window
    pub fn inspect(&self, handle: WindowHandle) -> Result<GeometryReport, AppError> {
        Ok(GeometryProbe::new(&self.system).report(handle)?)
    }

    /// Resizes the requested windows one after another
    pub fn resize(
        &self,
        request: &ResizeRequest,
        log: &mut dyn DiagnosticLog,
    ) -> Result<BatchReport, AppError> {
        let report = ResizeController::new(&self.system, self.config).resize_all(request, log)?;
        tracing::info!("{}", report.summary());
        Ok(report)
    }

    /// Builds a request for the configured target size
    pub fn request(&self, handles: Vec<WindowHandle>, move_to_origin: bool) -> ResizeRequest {
        ResizeRequest::new(handles, self.config.target, move_to_origin)
    }
}
