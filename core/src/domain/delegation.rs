//! Delegate-then-retry control flow.
//!
//! Deactivating or reassigning a nurse who still holds bed assignments
//! comes back as a conflict. The remedial flow (pick a delegate on the
//! same floor, move the beds, retry the original operation once) is a
//! small state machine so the single-retry rule is enforced by the
//! transitions themselves: only `AwaitingDelegateChoice` can enter
//! `Retrying`, and a conflict observed while `Retrying` can only reach
//! `Failed`.

/// Phase of a delegate-then-retry flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationState {
    /// First attempt not yet answered.
    Idle,
    /// First attempt conflicted; a delegate must be chosen.
    AwaitingDelegateChoice,
    /// Beds delegated; the one retry of the original operation is in flight.
    Retrying,
    /// Operation went through (directly or after the retry).
    Done,
    /// Terminal failure; no further retry is ever issued.
    Failed,
}

/// Observation fed into the machine after each network response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationEvent {
    /// The deactivation/reassignment succeeded.
    Succeeded,
    /// The backend reported the person still holds bed assignments.
    AssignmentConflict,
    /// A delegate was chosen and the bed transfer succeeded.
    DelegateChosen,
    /// The bed transfer itself failed.
    DelegationFailed,
}

impl DelegationState {
    /// Advance the machine. `Done` and `Failed` are absorbing; any
    /// transition not listed is a failure.
    pub fn advance(self, event: DelegationEvent) -> DelegationState {
        use DelegationEvent::*;
        use DelegationState::*;

        match (self, event) {
            (Idle, Succeeded) => Done,
            (Idle, AssignmentConflict) => AwaitingDelegateChoice,
            (AwaitingDelegateChoice, DelegateChosen) => Retrying,
            (AwaitingDelegateChoice, DelegationFailed) => Failed,
            (Retrying, Succeeded) => Done,
            (Retrying, AssignmentConflict) => Failed,
            (Done, _) => Done,
            (Failed, _) => Failed,
            (_, _) => Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DelegationState::Done | DelegationState::Failed)
    }
}
