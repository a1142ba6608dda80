use crate::{Effect, Msg, OperationSlot};

/// Pure update function: applies a message to the slot and returns any effects.
pub fn update<T, P>(
    mut slot: OperationSlot<T, P>,
    msg: Msg<T, P>,
) -> (OperationSlot<T, P>, Vec<Effect>) {
    let effects = match msg {
        Msg::Start { handle } => {
            // Start requests can race; an older handle arriving late must not
            // take the slot back from a newer one.
            if !slot.accepts(handle) {
                return (slot, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = slot.begin(handle) {
                effects.push(Effect::Abandon { handle: previous });
            }
            effects.push(Effect::Run { handle });
            effects
        }
        Msg::Reset => match slot.clear() {
            Some(previous) => vec![Effect::Abandon { handle: previous }],
            None => Vec::new(),
        },
        Msg::Progress { handle, progress } => {
            slot.record_progress(handle, progress);
            Vec::new()
        }
        Msg::Settled { handle, result } => {
            slot.settle(handle, result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (slot, effects)
}
