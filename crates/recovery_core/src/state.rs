use std::any::Any;
use std::fmt;

use crate::view_model::OperationView;

/// Identifies one invocation of the controller. Newer handles compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationHandle(u64);

impl OperationHandle {
    pub fn from_generation(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Normalized failure carried by [`AsyncOperationState::Rejected`].
///
/// Whatever shape the operation failed with (a string, a typed error, a panic
/// payload) ends up as a human-readable message plus an optional stable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    message: String,
    code: Option<&'static str>,
}

impl ErrorInfo {
    pub const UNKNOWN_MESSAGE: &'static str = "Unknown error occurred.";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::new(err.to_string())
    }

    /// Normalizes a panic payload as returned by `catch_unwind`.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        if let Some(text) = payload.downcast_ref::<&str>() {
            Self::new(*text).with_code("panic")
        } else if let Some(text) = payload.downcast_ref::<String>() {
            Self::new(text.clone()).with_code("panic")
        } else {
            Self::new(Self::UNKNOWN_MESSAGE).with_code("panic")
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&'static str> {
        self.code
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<String> for ErrorInfo {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ErrorInfo {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncOperationState<T> {
    Inactive,
    Pending,
    Resolved(T),
    Rejected(ErrorInfo),
}

impl<T> Default for AsyncOperationState<T> {
    fn default() -> Self {
        AsyncOperationState::Inactive
    }
}

impl<T> AsyncOperationState<T> {
    pub fn label(&self) -> &'static str {
        match self {
            AsyncOperationState::Inactive => "inactive",
            AsyncOperationState::Pending => "pending",
            AsyncOperationState::Resolved(_) => "resolved",
            AsyncOperationState::Rejected(_) => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncOperationState::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            AsyncOperationState::Resolved(_) | AsyncOperationState::Rejected(_)
        )
    }
}

/// The controller's single slot: current state, live handle and progress.
///
/// Only [`crate::update`] mutates a slot; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSlot<T, P> {
    state: AsyncOperationState<T>,
    progress: Option<P>,
    live: Option<OperationHandle>,
    newest: Option<OperationHandle>,
    dirty: bool,
}

impl<T, P> Default for OperationSlot<T, P> {
    fn default() -> Self {
        Self {
            state: AsyncOperationState::Inactive,
            progress: None,
            live: None,
            newest: None,
            dirty: false,
        }
    }
}

impl<T, P> OperationSlot<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AsyncOperationState<T> {
        &self.state
    }

    pub fn progress(&self) -> Option<&P> {
        self.progress.as_ref()
    }

    pub fn live_handle(&self) -> Option<OperationHandle> {
        self.live
    }

    pub fn is_live(&self, handle: OperationHandle) -> bool {
        self.live == Some(handle)
    }

    /// Returns whether the slot changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> OperationView<T, P>
    where
        T: Clone,
        P: Clone,
    {
        OperationView {
            state: self.state.clone(),
            progress: self.progress.clone(),
        }
    }

    /// A start request is only honoured if it is newer than every handle seen so far.
    pub(crate) fn accepts(&self, handle: OperationHandle) -> bool {
        self.newest.map_or(true, |newest| handle > newest)
    }

    /// Makes `handle` live and returns the handle it superseded, if any.
    pub(crate) fn begin(&mut self, handle: OperationHandle) -> Option<OperationHandle> {
        let previous = self.live.replace(handle);
        self.newest = Some(handle);
        self.state = AsyncOperationState::Pending;
        self.progress = None;
        self.dirty = true;
        previous
    }

    pub(crate) fn record_progress(&mut self, handle: OperationHandle, progress: P) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.progress = Some(progress);
        self.dirty = true;
        true
    }

    pub(crate) fn settle(
        &mut self,
        handle: OperationHandle,
        result: Result<T, ErrorInfo>,
    ) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.live = None;
        self.progress = None;
        self.state = match result {
            Ok(value) => AsyncOperationState::Resolved(value),
            Err(error) => AsyncOperationState::Rejected(error),
        };
        self.dirty = true;
        true
    }

    /// Invalidates the live handle and returns to `Inactive`.
    pub(crate) fn clear(&mut self) -> Option<OperationHandle> {
        let previous = self.live.take();
        let changed = previous.is_some()
            || self.progress.is_some()
            || !matches!(self.state, AsyncOperationState::Inactive);
        self.state = AsyncOperationState::Inactive;
        self.progress = None;
        self.dirty |= changed;
        previous
    }
}
