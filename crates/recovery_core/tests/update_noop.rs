use recovery_core::{update, Msg, OperationSlot};

#[test]
fn update_is_noop() {
    let slot: OperationSlot<String, u32> = OperationSlot::new();
    let (next, effects) = update(slot.clone(), Msg::NoOp);

    assert_eq!(slot, next);
    assert!(effects.is_empty());
}
