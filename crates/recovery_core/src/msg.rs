use crate::{ErrorInfo, OperationHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<T, P> {
    /// Caller started a new operation; supersedes whatever is live.
    Start { handle: OperationHandle },
    /// Caller asked to abandon any running operation and go back to idle.
    Reset,
    /// The operation identified by `handle` reported progress.
    Progress { handle: OperationHandle, progress: P },
    /// The operation identified by `handle` finished.
    Settled {
        handle: OperationHandle,
        result: Result<T, ErrorInfo>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
