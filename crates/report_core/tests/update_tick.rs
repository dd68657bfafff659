use report_core::{update, AppState, Msg};

#[test]
fn tick_leaves_state_unchanged() {
    let state = AppState::default();
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_mark_dirty() {
    let (mut next, effects) = update(AppState::default(), Msg::Tick);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
