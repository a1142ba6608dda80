//! Recovery core: pure operation state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AsyncOperationState, ErrorInfo, OperationHandle, OperationSlot};
pub use update::update;
pub use view_model::{
    ordinal, status_line, FoundWord, OperationView, RecoveryProgress, RecoveryView,
};
