use crate::batch::settlement_notice;
use crate::state::InfoPanel;
use crate::{
    AppState, BatchAction, ContextMenu, Effect, FormTarget, MenuAction, Msg, Notification,
    ReloadScope, RequestForm, RequestId, Severity, Toggle,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ReloadRequested => vec![Effect::ReloadTable],
        Msg::TableLoaded(rows) => {
            state.replace_rows(rows);
            Vec::new()
        }
        Msg::TableLoadFailed(err) => {
            state.notify(Notification::warning(format!(
                "Could not load requests: {err}"
            )));
            Vec::new()
        }
        Msg::RowClicked { index, modifiers } => {
            let rows = state.row_ids();
            if state.selection.select_row(&rows, index, modifiers) {
                state.menu = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RowDoubleClicked { index } => match state.row_at(index).map(|row| row.id) {
            Some(id) => open_info(&mut state, vec![id]),
            None => Vec::new(),
        },
        Msg::ContextMenuOpened { index } => {
            let rows = state.row_ids();
            if state.selection.focus_row(&rows, index).is_some() {
                state.menu = Some(ContextMenu {
                    ids: state.selection.in_display_order(&rows),
                });
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ContextMenuDismissed => {
            if state.menu.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::MenuActionChosen(action) => menu_action(&mut state, action),
        Msg::DeleteKeyPressed => {
            if !state.selection.is_empty() && !state.batches.table_batch_pending() {
                state.confirm_delete = Some(state.selected_ids());
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteConfirmed(confirmed) => match state.confirm_delete.take() {
            Some(ids) => {
                state.mark_dirty();
                if confirmed && !state.batches.table_batch_pending() {
                    vec![start_batch(
                        &mut state,
                        BatchAction::Delete,
                        ids,
                        ReloadScope::Table,
                    )]
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        },
        Msg::DetailToggled { request_id } => {
            if state.row(request_id).is_none() {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match state.details.toggle(request_id) {
                Toggle::Expanding => vec![Effect::FetchJobs { request_id }],
                Toggle::Collapsed => Vec::new(),
            }
        }
        Msg::JobsLoaded { request_id, result } => {
            let rescheduled = state.reschedule_refresh.remove(&request_id);
            match result {
                Ok(jobs) => {
                    if state.details.loaded(request_id, jobs) {
                        state.mark_dirty();
                    }
                }
                Err(err) => {
                    if state.details.fetch_failed(request_id) {
                        let message = match rescheduled {
                            Some(count) => format!(
                                "Rescheduled {count} job(s), but could not reload jobs of \
                                 request {request_id}: {err}"
                            ),
                            None => format!("Could not load jobs of request {request_id}: {err}"),
                        };
                        state.notify(Notification::warning(message));
                    }
                }
            }
            Vec::new()
        }
        Msg::RescheduleClicked { job_id } => {
            if state.batches.is_in_flight(BatchAction::Reschedule, job_id) {
                return (state, Vec::new());
            }
            let target = state
                .details
                .find_job(job_id)
                .filter(|(_, job)| job.reschedule_eligible())
                .map(|(request_id, _)| request_id);
            match target {
                Some(request_id) => vec![start_batch(
                    &mut state,
                    BatchAction::Reschedule,
                    vec![job_id],
                    ReloadScope::Jobs(request_id),
                )],
                None => Vec::new(),
            }
        }
        Msg::BatchSettled { batch_id, outcomes } => {
            let Some(batch) = state.batches.settle(batch_id) else {
                return (state, Vec::new());
            };
            state.notify(settlement_notice(batch.action, &outcomes));
            match batch.reload {
                ReloadScope::Table => vec![Effect::ReloadTable],
                ReloadScope::Jobs(request_id) => {
                    let succeeded = outcomes.iter().filter(|o| o.result.is_ok()).count();
                    if succeeded > 0 && state.details.is_expanded(request_id) {
                        state.reschedule_refresh.insert(request_id, succeeded);
                        vec![Effect::FetchJobs { request_id }]
                    } else {
                        Vec::new()
                    }
                }
            }
        }
        Msg::InfoLoaded(result) => {
            if matches!(state.info, Some(InfoPanel::Loading(_))) {
                match result {
                    Ok(body) => {
                        state.info = Some(InfoPanel::Loaded(body));
                        state.mark_dirty();
                    }
                    Err(err) => {
                        state.info = None;
                        state.notify(Notification::warning(format!(
                            "Could not load request details: {err}"
                        )));
                    }
                }
            }
            Vec::new()
        }
        Msg::InfoDismissed => {
            if state.info.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FormOpened => {
            state.form = Some(RequestForm::new());
            state.mark_dirty();
            vec![Effect::LoadTags]
        }
        Msg::FormFieldSet { name, value } => {
            let Some(form) = state.form.as_mut() else {
                return (state, Vec::new());
            };
            form.set(&name, &value);
            state.mark_dirty();
            if name == "app" && !value.trim().is_empty() {
                vec![Effect::LoadAppVersions { app: value }]
            } else {
                Vec::new()
            }
        }
        Msg::FormFieldAdded { name, value } => {
            if let Some(form) = state.form.as_mut() {
                form.push(&name, &value);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FormSubmitted => {
            let Some(form) = state.form.take() else {
                return (state, Vec::new());
            };
            state.mark_dirty();
            match form.validate() {
                Ok(()) => vec![Effect::SaveRequest {
                    target: form.target,
                    fields: form.payload(),
                }],
                Err(err) => {
                    // The draft stays open so the user can fix it.
                    state.alert = Some(err.to_string());
                    state.form = Some(form);
                    Vec::new()
                }
            }
        }
        Msg::FormCancelled => {
            if state.form.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RequestSaved { target, result } => match result {
            Ok(()) => {
                let message = match target {
                    FormTarget::New => "Request added",
                    FormTarget::Edit(_) => "Request updated",
                };
                state.notify(Notification::new("Success!", message, Severity::Success));
                vec![Effect::ReloadTable]
            }
            Err(err) => {
                state.notify(Notification::warning(format!(
                    "Could not save request: {err}"
                )));
                Vec::new()
            }
        },
        Msg::TagsLoaded(result) => {
            match result {
                Ok(tags) => {
                    state.tags = tags;
                    state.mark_dirty();
                }
                Err(err) => state.notify(Notification::warning(format!(
                    "Could not load tags: {err}"
                ))),
            }
            Vec::new()
        }
        Msg::AppVersionsLoaded { app, result } => {
            match result {
                Ok(versions) => {
                    state.app_versions = Some((app, versions));
                    state.mark_dirty();
                }
                Err(err) => state.notify(Notification::warning(format!(
                    "Could not load versions of {app}: {err}"
                ))),
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            if state.alert.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn menu_action(state: &mut AppState, action: MenuAction) -> Vec<Effect> {
    let Some(menu) = state.menu.take() else {
        return Vec::new();
    };
    state.mark_dirty();
    if !menu.is_enabled(action, state.batches.table_batch_pending()) {
        return Vec::new();
    }

    match action {
        MenuAction::Info => open_info(state, menu.ids),
        MenuAction::Edit | MenuAction::Copy => {
            let Some(request) = menu.ids.first().and_then(|id| state.row(*id)) else {
                return Vec::new();
            };
            let form = if action == MenuAction::Edit {
                RequestForm::edit_of(request)
            } else {
                RequestForm::copy_of(request)
            };
            state.form = Some(form);
            vec![Effect::LoadTags]
        }
        MenuAction::Approve => vec![start_batch(
            state,
            BatchAction::Approve,
            menu.ids,
            ReloadScope::Table,
        )],
        MenuAction::Delete => {
            state.confirm_delete = Some(menu.ids);
            Vec::new()
        }
    }
}

fn open_info(state: &mut AppState, ids: Vec<RequestId>) -> Vec<Effect> {
    state.info = Some(InfoPanel::Loading(ids.clone()));
    state.mark_dirty();
    vec![Effect::ShowInfo { ids }]
}

fn start_batch(
    state: &mut AppState,
    action: BatchAction,
    targets: Vec<u64>,
    reload: ReloadScope,
) -> Effect {
    let batch = state.batches.start(action, targets, reload);
    state.mark_dirty();
    Effect::Dispatch {
        batch_id: batch.id,
        action: batch.action,
        targets: batch.targets,
    }
}
