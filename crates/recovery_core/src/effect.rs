use crate::OperationHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the operation body for `handle`.
    Run { handle: OperationHandle },
    /// `handle` was superseded or reset; whatever it produces is now inert.
    Abandon { handle: OperationHandle },
}
