//! Selection state owned by the window list provider
//!
//! The list provider keeps the candidate windows it shows and which of them
//! are selected. A resize trigger turns this state into a `ResizeRequest`;
//! the geometry engine never reads selection from anywhere else.

use crate::domain::core::{Margins, Size};
use crate::domain::window::{CandidateWindow, WindowHandle};
use crate::engine::{ResizeError, ResizeRequest};

/// Candidate list plus the user's current selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    candidates: Vec<CandidateWindow>,
    selected: Vec<WindowHandle>,
    move_to_origin: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the candidate list, dropping selections that disappeared
    pub fn refresh(&mut self, candidates: Vec<CandidateWindow>) {
        self.selected
            .retain(|handle| candidates.iter().any(|c| c.handle == *handle));
        self.candidates = candidates;
    }

    pub fn candidates(&self) -> &[CandidateWindow] {
        &self.candidates
    }

    /// Selects a listed window; unknown handles are ignored
    pub fn select(&mut self, handle: WindowHandle) -> bool {
        let listed = self.candidates.iter().any(|c| c.handle == handle);
        if listed && !self.selected.contains(&handle) {
            self.selected.push(handle);
        }
        listed
    }

    pub fn deselect(&mut self, handle: WindowHandle) {
        self.selected.retain(|h| *h != handle);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn set_move_to_origin(&mut self, enabled: bool) {
        self.move_to_origin = enabled;
    }

    /// Selected handles in list order
    pub fn selected(&self) -> Vec<WindowHandle> {
        self.candidates
            .iter()
            .map(|c| c.handle)
            .filter(|handle| self.selected.contains(handle))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Builds the request for the resize trigger
    pub fn request(&self, target: Size) -> Result<ResizeRequest, ResizeError> {
        let handles = self.selected();
        if handles.is_empty() {
            return Err(ResizeError::NoSelection);
        }
        Ok(ResizeRequest::new(handles, target, self.move_to_origin))
    }
}

/// Informational size text shown for a single selected window
///
/// For example `1280 × 720  (titlebar 31px, border 8px)`. Borderless
/// windows get no note.
pub fn size_summary(client: Size, non_client: Margins) -> String {
    let mut parts = Vec::new();
    if non_client.top > 0 {
        parts.push(format!("titlebar {}px", non_client.top));
    }
    let border = non_client.left.max(non_client.right).max(non_client.bottom);
    if border > 0 {
        parts.push(format!("border {}px", border));
    }

    if parts.is_empty() {
        format!("{} × {}", client.w, client.h)
    } else {
        format!("{} × {}  ({})", client.w, client.h, parts.join(", "))
    }
}
