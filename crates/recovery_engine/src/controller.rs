use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::FutureExt;
use recovery_core::{
    update, Effect, ErrorInfo, Msg, OperationHandle, OperationSlot, OperationView,
    RecoveryProgress,
};
use recovery_logging::{recovery_debug, recovery_trace, recovery_warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ProgressSink;

type SharedSlot<T, P> = Arc<watch::Sender<OperationSlot<T, P>>>;

/// Runs one "current" operation at a time. Starting a new one silently
/// invalidates the previous; results from invalidated runs are dropped.
///
/// All slot mutations go through [`recovery_core::update`] while the watch
/// channel's write lock is held, so the liveness check and the state write
/// are one atomic step even when `start`, `reset` and a settling task race.
pub struct AsyncController<T, P = ()> {
    slot: SharedSlot<T, P>,
    generation: Arc<AtomicU64>,
    runtime: Handle,
}

impl<T, P> Clone for AsyncController<T, P> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            generation: Arc::clone(&self.generation),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T, P> AsyncController<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
{
    pub fn new(runtime: Handle) -> Self {
        let (slot, _) = watch::channel(OperationSlot::new());
        Self {
            slot: Arc::new(slot),
            generation: Arc::new(AtomicU64::new(0)),
            runtime,
        }
    }

    /// Supersedes any live operation, goes `Pending` and spawns `operation`.
    pub fn start<F, Fut, E>(&self, operation: F) -> OperationTicket
    where
        F: FnOnce(LiveToken<T, P>) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<ErrorInfo> + Send + 'static,
    {
        let handle =
            OperationHandle::from_generation(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        let (effects, _) = apply(&self.slot, Msg::Start { handle });

        let mut runs = false;
        for effect in effects {
            match effect {
                Effect::Run { handle: run } => runs = run == handle,
                Effect::Abandon { handle: previous } => {
                    recovery_debug!("Operation {} superseded by {}", previous, handle);
                }
            }
        }
        if !runs {
            recovery_debug!("Start {} lost the race to a newer request", handle);
            return OperationTicket { handle, task: None };
        }

        let body = operation(LiveToken {
            handle,
            slot: Arc::clone(&self.slot),
        });
        let slot = Arc::clone(&self.slot);
        let task = self.runtime.spawn(async move {
            let result = match AssertUnwindSafe(body).catch_unwind().await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(err.into()),
                Err(payload) => Err(ErrorInfo::from_panic(payload.as_ref())),
            };
            if let Err(err) = &result {
                recovery_debug!("Operation {} failed: {}", handle, err);
            }
            // A stale result is dropped inside `update`.
            apply(&slot, Msg::Settled { handle, result });
            recovery_trace!("Operation {} finished", handle);
        });

        OperationTicket {
            handle,
            task: Some(task),
        }
    }

    /// Invalidates the live operation, if any, and returns to `Inactive`.
    pub fn reset(&self) {
        let (effects, _) = apply(&self.slot, Msg::Reset);
        for effect in effects {
            if let Effect::Abandon { handle } = effect {
                recovery_debug!("Operation {} abandoned by reset", handle);
            }
        }
    }

    pub fn view(&self) -> OperationView<T, P> {
        self.slot.borrow().view()
    }

    pub fn live_handle(&self) -> Option<OperationHandle> {
        self.slot.borrow().live_handle()
    }

    /// Change notifications coalesce: a slow receiver only sees the latest slot.
    pub fn subscribe(&self) -> watch::Receiver<OperationSlot<T, P>> {
        self.slot.subscribe()
    }
}

/// Read-only capability handed to a running operation: check liveness and
/// publish progress, both no-ops once the operation is superseded.
pub struct LiveToken<T, P> {
    handle: OperationHandle,
    slot: SharedSlot<T, P>,
}

impl<T, P> LiveToken<T, P> {
    pub fn handle(&self) -> OperationHandle {
        self.handle
    }

    pub fn is_live(&self) -> bool {
        self.slot.borrow().is_live(self.handle)
    }

    /// Returns whether the operation is still live.
    pub fn report(&self, progress: P) -> bool {
        let (_, live) = apply(
            &self.slot,
            Msg::Progress {
                handle: self.handle,
                progress,
            },
        );
        live == Some(self.handle)
    }
}

impl<T> ProgressSink for LiveToken<T, RecoveryProgress>
where
    T: Send + Sync,
{
    fn emit(&self, progress: RecoveryProgress) -> bool {
        self.report(progress)
    }

    fn is_live(&self) -> bool {
        LiveToken::is_live(self)
    }
}

/// Returned by [`AsyncController::start`]. Dropping it detaches the run.
#[derive(Debug)]
pub struct OperationTicket {
    handle: OperationHandle,
    task: Option<JoinHandle<()>>,
}

impl OperationTicket {
    pub fn handle(&self) -> OperationHandle {
        self.handle
    }

    /// `false` if the start request was rejected as out of order.
    pub fn was_started(&self) -> bool {
        self.task.is_some()
    }

    /// Waits until the operation body has finished and its result was applied
    /// (or discarded as stale).
    pub async fn finished(self) {
        if let Some(task) = self.task {
            if let Err(err) = task.await {
                recovery_warn!("Operation {} task failed: {}", self.handle, err);
            }
        }
    }
}

/// Runs one message through the pure update under the channel's lock.
/// Notifies subscribers only if the slot changed.
fn apply<T, P>(
    slot: &watch::Sender<OperationSlot<T, P>>,
    msg: Msg<T, P>,
) -> (Vec<Effect>, Option<OperationHandle>) {
    let mut effects = Vec::new();
    let mut live = None;
    slot.send_if_modified(|current| {
        let (next, produced) = update(std::mem::take(current), msg);
        *current = next;
        effects = produced;
        live = current.live_handle();
        current.consume_dirty()
    });
    (effects, live)
}
