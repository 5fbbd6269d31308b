//! Candidate window enumeration
//!
//! Walks the top-level windows once, gathers the facts the classifier needs
//! and keeps only eligible windows, sorted case-insensitively by title.

use crate::domain::window::{classify, CandidateWindow, WindowFacts, WindowHandle};
use crate::platform::{PlatformError, WindowSystem};

/// Reads the classification facts for one window
///
/// A failed cloak query counts as "not cloaked" so a transient compositor
/// error never hides an otherwise valid window. Any other failure means the
/// window went away mid-enumeration.
pub fn gather_facts<S: WindowSystem + ?Sized>(
    system: &S,
    handle: WindowHandle,
) -> Result<WindowFacts, PlatformError> {
    let style = system.extended_style(handle)?;
    let cloaked = match system.is_cloaked(handle) {
        Ok(cloaked) => cloaked,
        Err(PlatformError::StaleHandle(h)) => return Err(PlatformError::StaleHandle(h)),
        Err(err) => {
            tracing::debug!("cloak query failed for {}, assuming visible: {}", handle, err);
            false
        }
    };

    Ok(WindowFacts {
        handle,
        visible: system.is_visible(handle),
        title: system.title(handle)?,
        process_id: system.process_id(handle)?,
        class_name: system.class_name(handle)?,
        tool_window: style.tool_window,
        app_window: style.app_window,
        cloaked,
    })
}

/// Lists windows the user can pick for resizing
///
/// An empty desktop yields an empty list. Only a failure of the enumeration
/// itself is an error.
pub fn list_candidate_windows<S: WindowSystem + ?Sized>(
    system: &S,
) -> Result<Vec<CandidateWindow>, PlatformError> {
    let own_process_id = system.current_process_id();
    let handles = system.top_level_windows()?;

    let mut candidates: Vec<CandidateWindow> = handles
        .into_iter()
        // Cheap check first: most top-level windows are invisible helpers
        .filter(|&handle| system.is_visible(handle))
        .filter_map(|handle| match gather_facts(system, handle) {
            Ok(facts) => Some(facts),
            Err(err) => {
                tracing::debug!("skipping window {}: {}", handle, err);
                None
            }
        })
        .filter(|facts| {
            let verdict = classify(facts, own_process_id);
            tracing::trace!("{} {:?} -> {:?}", facts.handle, facts.title, verdict);
            verdict.is_eligible()
        })
        .map(|facts| CandidateWindow {
            handle: facts.handle,
            title: facts.title,
        })
        .collect();

    candidates.sort_by_cached_key(|c| c.title.to_lowercase());
    tracing::debug!("Enumerated {} candidate windows", candidates.len());
    Ok(candidates)
}
