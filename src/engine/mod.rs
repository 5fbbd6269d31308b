//! Window geometry engine
//!
//! Enumerator → candidate list → external selection → probe (read) →
//! resize controller (read + write) → probe (verify).

pub mod diagnostics;
pub mod enumerator;
pub mod probe;
pub mod resize;

pub use diagnostics::{DiagnosticLog, FnLog, NullLog};
pub use enumerator::list_candidate_windows;
pub use probe::{GeometryProbe, GeometryReport};
pub use resize::{BatchReport, ResizeController, ResizeError, ResizeOutcome, ResizeRequest, ResizeStatus};
