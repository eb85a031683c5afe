use serde::Serialize;

/// Whether a submit is currently in flight on a flow.
///
/// `Loading` holds strictly between submit start and submit completion.
/// Every exit path of a submit, including cancellation, returns the flow to
/// `Idle`.
#[derive(Serialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProcessState {
    /// No submit in flight, the form accepts edits.
    #[default]
    Idle,
    /// A submit is in flight, field edits are ignored until it completes.
    Loading,
}

impl ProcessState {
    /// Returns true while a submit is in flight.
    pub fn is_loading(self) -> bool {
        matches!(self, ProcessState::Loading)
    }
}
