use std::sync::Once;

use dashboard_core::{
    update, AppState, BatchAction, Effect, MenuAction, Modifiers, Msg, Request, RequestStatus,
    Severity, TargetOutcome,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn request(id: u64) -> Request {
    Request {
        id,
        status: RequestStatus::Requested,
        description: format!("request {id}"),
        requester: None,
        sim_lead: "lead".to_string(),
        request_date: "10/10/2017".to_string(),
        detector: Some("LZ".to_string()),
        source: Some("Kr85".to_string()),
    }
}

/// Rows 4, 3, 2, 1 with the first three selected.
fn three_selected() -> AppState {
    let rows = (1..=4).map(request).collect();
    let (state, _) = update(AppState::new(), Msg::TableLoaded(rows));
    let (state, _) = update(
        state,
        Msg::RowClicked {
            index: 0,
            modifiers: Modifiers::None,
        },
    );
    let (state, _) = update(
        state,
        Msg::RowClicked {
            index: 2,
            modifiers: Modifiers::Shift,
        },
    );
    assert_eq!(state.selected_ids(), vec![4, 3, 2]);
    state
}

fn choose(state: AppState, action: MenuAction) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ContextMenuOpened { index: 0 });
    update(state, Msg::MenuActionChosen(action))
}

fn dispatched(effects: &[Effect]) -> (u64, BatchAction, Vec<u64>) {
    match effects {
        [Effect::Dispatch {
            batch_id,
            action,
            targets,
        }] => (*batch_id, *action, targets.clone()),
        other => panic!("expected one dispatch, got {other:?}"),
    }
}

#[test]
fn approve_dispatches_one_target_per_selected_row() {
    init_logging();
    let (state, effects) = choose(three_selected(), MenuAction::Approve);

    let (_, action, targets) = dispatched(&effects);
    assert_eq!(action, BatchAction::Approve);
    assert_eq!(targets, vec![4, 3, 2]);
    assert_eq!(state.view().pending_batches, 1);
}

#[test]
fn settlement_reloads_and_notifies_exactly_once() {
    init_logging();
    let (state, effects) = choose(three_selected(), MenuAction::Approve);
    let (batch_id, _, targets) = dispatched(&effects);

    let outcomes = targets.iter().map(|id| TargetOutcome::ok(*id)).collect();
    let (state, effects) = update(state, Msg::BatchSettled { batch_id, outcomes });
    assert_eq!(effects, vec![Effect::ReloadTable]);

    let notification = state.view().notification.expect("notification");
    assert_eq!(notification.status, "Info!");
    assert_eq!(notification.message, "Approved 3 request(s)");
    assert_eq!(notification.level, Severity::Info);
    assert_eq!(state.view().pending_batches, 0);

    // A duplicate settlement must not trigger another reload.
    let (state, effects) = update(
        state,
        Msg::BatchSettled {
            batch_id,
            outcomes: vec![TargetOutcome::ok(4)],
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().notification.map(|n| n.message),
        Some("Approved 3 request(s)".to_string())
    );
}

#[test]
fn partial_failure_is_reported() {
    init_logging();
    let (state, effects) = choose(three_selected(), MenuAction::Approve);
    let (batch_id, _, _) = dispatched(&effects);

    let outcomes = vec![
        TargetOutcome::ok(4),
        TargetOutcome::failed(3, "http status 403"),
        TargetOutcome::ok(2),
    ];
    let (state, effects) = update(state, Msg::BatchSettled { batch_id, outcomes });
    assert_eq!(effects, vec![Effect::ReloadTable]);
    let notification = state.view().notification.expect("notification");
    assert_eq!(notification.message, "Approved 2 request(s), 1 failed");
    assert_eq!(notification.level, Severity::Warning);
}

#[test]
fn menu_delete_asks_for_confirmation_first() {
    init_logging();
    let (state, effects) = choose(three_selected(), MenuAction::Delete);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().confirm_prompt,
        Some("Really delete 3 request(s)?".to_string())
    );

    let (state, effects) = update(state, Msg::DeleteConfirmed(true));
    let (batch_id, action, targets) = dispatched(&effects);
    assert_eq!(action, BatchAction::Delete);
    assert_eq!(targets, vec![4, 3, 2]);
    assert!(state.view().confirm_prompt.is_none());

    let outcomes = targets.into_iter().map(TargetOutcome::ok).collect();
    let (state, effects) = update(state, Msg::BatchSettled { batch_id, outcomes });
    assert_eq!(effects, vec![Effect::ReloadTable]);
    let notification = state.view().notification.expect("notification");
    assert_eq!(notification.status, "Attention!");
    assert_eq!(notification.message, "Deleted 3 request(s)");
    assert_eq!(notification.level, Severity::Danger);
}

#[test]
fn declining_delete_issues_nothing_and_keeps_selection() {
    init_logging();
    let state = three_selected();
    let (state, effects) = update(state, Msg::DeleteKeyPressed);
    assert!(effects.is_empty());
    assert!(state.view().confirm_prompt.is_some());

    let (state, effects) = update(state, Msg::DeleteConfirmed(false));
    assert!(effects.is_empty());
    assert_eq!(state.selected_ids(), vec![4, 3, 2]);
    assert!(state.view().confirm_prompt.is_none());
    assert!(state.pending_batches().is_empty());
}

#[test]
fn delete_key_without_selection_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TableLoaded(vec![request(1)]));
    let (state, effects) = update(state, Msg::DeleteKeyPressed);
    assert!(effects.is_empty());
    assert!(state.view().confirm_prompt.is_none());

    let (_, effects) = update(state, Msg::DeleteConfirmed(true));
    assert!(effects.is_empty());
}

#[test]
fn batch_actions_are_blocked_while_a_batch_is_pending() {
    init_logging();
    let (state, effects) = choose(three_selected(), MenuAction::Approve);
    let (batch_id, _, _) = dispatched(&effects);

    let (state, effects) = choose(state, MenuAction::Approve);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::DeleteKeyPressed);
    assert!(effects.is_empty());
    assert!(state.view().confirm_prompt.is_none());

    let menu_state = update(state.clone(), Msg::ContextMenuOpened { index: 0 }).0;
    let menu = menu_state.view().menu.expect("menu open");
    assert!(menu
        .entries
        .iter()
        .filter(|e| matches!(e.action, MenuAction::Approve | MenuAction::Delete))
        .all(|e| !e.enabled));

    // Once settled the entries come back.
    let (state, _) = update(
        state,
        Msg::BatchSettled {
            batch_id,
            outcomes: vec![TargetOutcome::ok(4), TargetOutcome::ok(3), TargetOutcome::ok(2)],
        },
    );
    let (_, effects) = choose(state, MenuAction::Approve);
    assert_eq!(dispatched(&effects).1, BatchAction::Approve);
}

#[test]
fn reload_after_delete_clears_confirmation_of_vanished_rows() {
    init_logging();
    let state = three_selected();
    let (state, _) = update(state, Msg::DeleteKeyPressed);
    let (state, _) = update(state, Msg::TableLoaded(vec![request(1)]));
    assert!(state.view().confirm_prompt.is_none());
    let (_, effects) = update(state, Msg::DeleteConfirmed(true));
    assert!(effects.is_empty());
}
