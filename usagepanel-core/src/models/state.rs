//! Panel render state.

/// State of one panel invocation, written by the fetch join and read by the
/// renderer.
///
/// `Loading` moves to `Done` once both provider calls have settled, even if
/// individual results carry errors. `Error` is reserved for the join itself
/// failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderState {
    /// Fetches are in flight.
    #[default]
    Loading,
    /// All provider results are available.
    Done,
    /// Orchestration failed before any result was produced.
    Error(String),
}

impl RenderState {
    /// Returns true while fetches are still running.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
