use dashboard_core::{
    update, AppState, BatchAction, DetailView, Effect, Msg, ParametricJob, Request, RequestStatus,
    SegmentKind, TargetOutcome,
};

fn init_logging() {
    dashboard_logging::initialize_for_tests();
}

fn request(id: u64) -> Request {
    Request {
        id,
        status: RequestStatus::Running,
        description: "d".to_string(),
        requester: None,
        sim_lead: "lead".to_string(),
        request_date: "02/02/2018".to_string(),
        detector: None,
        source: None,
    }
}

fn job(id: u64, request_id: u64, status: RequestStatus) -> ParametricJob {
    ParametricJob {
        id,
        request_id,
        macro_name: Some(format!("macro_{id}.mac")),
        njobs: 10,
        nevents: Some(1000),
        seed: Some(7),
        num_submitted: 1,
        num_running: 1,
        num_completed: 3,
        num_failed: 2,
        status,
        reschedule: false,
        sim_lfn_outputdir: Some("/lz/sim".to_string()),
        mctruth_lfn_outputdir: None,
        reduction_lfn_outputdir: Some("/lz/reduced".to_string()),
        der_lfn_outputdir: None,
        lzap_lfn_outputdir: None,
    }
}

fn loaded() -> AppState {
    update(AppState::new(), Msg::TableLoaded(vec![request(1), request(2)])).0
}

fn details_of(state: &AppState, request_id: u64) -> DetailView {
    state
        .view()
        .rows
        .into_iter()
        .find(|row| row.request_id == request_id)
        .map(|row| row.details)
        .expect("row rendered")
}

#[test]
fn expanding_fetches_jobs_and_renders_them() {
    init_logging();
    let (state, effects) = update(loaded(), Msg::DetailToggled { request_id: 2 });
    assert_eq!(effects, vec![Effect::FetchJobs { request_id: 2 }]);
    assert_eq!(details_of(&state, 2), DetailView::Loading);
    assert_eq!(details_of(&state, 1), DetailView::Collapsed);

    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 2,
            result: Ok(vec![job(20, 2, RequestStatus::Running)]),
        },
    );
    let DetailView::Jobs(rows) = details_of(&state, 2) else {
        panic!("jobs not shown");
    };
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.macro_name, "macro_20.mac");
    assert_eq!(row.output, "/lz/sim\n/lz/reduced");
    assert_eq!(row.status, "Running");
    assert!(!row.can_reschedule);
    assert_eq!(row.progress.accounted_percent(), 70.0);
    assert_eq!(row.progress.segment(SegmentKind::Other).percent, 30.0);
}

#[test]
fn toggling_twice_collapses_without_leftovers() {
    init_logging();
    let (state, _) = update(loaded(), Msg::DetailToggled { request_id: 1 });
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(vec![job(10, 1, RequestStatus::Completed)]),
        },
    );
    let (state, effects) = update(state, Msg::DetailToggled { request_id: 1 });
    assert!(effects.is_empty());
    assert_eq!(details_of(&state, 1), DetailView::Collapsed);
    assert!(state.details().is_empty());

    // Re-expanding fetches again and shows a single nested table.
    let (state, effects) = update(state, Msg::DetailToggled { request_id: 1 });
    assert_eq!(effects, vec![Effect::FetchJobs { request_id: 1 }]);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(vec![job(10, 1, RequestStatus::Completed)]),
        },
    );
    assert_eq!(state.details().len(), 1);
    let DetailView::Jobs(rows) = details_of(&state, 1) else {
        panic!("jobs not shown");
    };
    assert_eq!(rows.len(), 1);
}

#[test]
fn late_jobs_for_collapsed_row_are_dropped() {
    init_logging();
    let (state, _) = update(loaded(), Msg::DetailToggled { request_id: 1 });
    let (state, _) = update(state, Msg::DetailToggled { request_id: 1 });
    let (mut state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(vec![job(10, 1, RequestStatus::Running)]),
        },
    );
    let _ = state.consume_dirty();
    assert_eq!(details_of(&state, 1), DetailView::Collapsed);

    let (mut state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(Vec::new()),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn failed_fetch_collapses_and_warns() {
    init_logging();
    let (state, _) = update(loaded(), Msg::DetailToggled { request_id: 2 });
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 2,
            result: Err("timeout".to_string()),
        },
    );
    assert_eq!(details_of(&state, 2), DetailView::Collapsed);
    let notification = state.view().notification.expect("warning");
    assert!(notification.message.contains("timeout"));
}

#[test]
fn toggling_unknown_row_is_ignored() {
    init_logging();
    let (state, effects) = update(loaded(), Msg::DetailToggled { request_id: 99 });
    assert!(effects.is_empty());
    assert!(state.details().is_empty());
}

#[test]
fn rescheduled_jobs_are_labelled() {
    init_logging();
    let mut rescheduled = job(30, 1, RequestStatus::Failed);
    rescheduled.reschedule = true;
    let (state, _) = update(loaded(), Msg::DetailToggled { request_id: 1 });
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(vec![rescheduled]),
        },
    );
    let DetailView::Jobs(rows) = details_of(&state, 1) else {
        panic!("jobs not shown");
    };
    assert_eq!(rows[0].status, "Rescheduled");
    assert!(rows[0].can_reschedule);
}

#[test]
fn reschedule_reloads_only_the_nested_table() {
    init_logging();
    let (state, _) = update(loaded(), Msg::DetailToggled { request_id: 1 });
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(vec![
                job(10, 1, RequestStatus::Failed),
                job(11, 1, RequestStatus::Running),
            ]),
        },
    );

    // Only failed jobs can be rescheduled.
    let (state, effects) = update(state, Msg::RescheduleClicked { job_id: 11 });
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::RescheduleClicked { job_id: 10 });
    let batch_id = match effects.as_slice() {
        [Effect::Dispatch {
            batch_id,
            action: BatchAction::Reschedule,
            targets,
        }] => {
            assert_eq!(targets, &vec![10]);
            *batch_id
        }
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::BatchSettled {
            batch_id,
            outcomes: vec![TargetOutcome::ok(10)],
        },
    );
    assert_eq!(effects, vec![Effect::FetchJobs { request_id: 1 }]);
    // Refreshing keeps the current rows on screen.
    assert!(matches!(details_of(&state, 1), DetailView::Jobs(_)));
}

#[test]
fn failed_reschedule_does_not_reload() {
    init_logging();
    let (state, _) = update(loaded(), Msg::DetailToggled { request_id: 1 });
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(vec![job(10, 1, RequestStatus::Failed)]),
        },
    );
    let (state, effects) = update(state, Msg::RescheduleClicked { job_id: 10 });
    let Some(Effect::Dispatch { batch_id, .. }) = effects.first().cloned() else {
        panic!("no dispatch");
    };
    let (state, effects) = update(
        state,
        Msg::BatchSettled {
            batch_id,
            outcomes: vec![TargetOutcome::failed(10, "http status 500")],
        },
    );
    assert!(effects.is_empty());
    let notification = state.view().notification.expect("notification");
    assert_eq!(notification.message, "Rescheduled 0 job(s), 1 failed");
}

fn with_failed_job() -> AppState {
    let (state, _) = update(loaded(), Msg::DetailToggled { request_id: 1 });
    update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Ok(vec![job(70, 1, RequestStatus::Failed)]),
        },
    )
    .0
}

fn job_row(state: &AppState, job_id: u64) -> dashboard_core::JobRowView {
    match details_of(state, 1) {
        DetailView::Jobs(jobs) => jobs
            .into_iter()
            .find(|job| job.job_id == job_id)
            .expect("job rendered"),
        other => panic!("jobs not shown: {other:?}"),
    }
}

#[test]
fn repeated_reschedule_click_waits_for_the_first() {
    init_logging();
    let state = with_failed_job();

    let (state, effects) = update(state, Msg::RescheduleClicked { job_id: 70 });
    let [Effect::Dispatch { batch_id, .. }] = effects.as_slice() else {
        panic!("unexpected effects {effects:?}");
    };
    let batch_id = *batch_id;
    assert!(!job_row(&state, 70).can_reschedule);

    let (state, effects) = update(state, Msg::RescheduleClicked { job_id: 70 });
    assert!(effects.is_empty());
    assert_eq!(state.pending_batches().len(), 1);

    let (state, _) = update(
        state,
        Msg::BatchSettled {
            batch_id,
            outcomes: vec![TargetOutcome::failed(70, "http status 500")],
        },
    );
    // Settled without success: the job can be tried again.
    assert!(job_row(&state, 70).can_reschedule);
    let (_, effects) = update(state, Msg::RescheduleClicked { job_id: 70 });
    assert_eq!(effects.len(), 1);
}

#[test]
fn failed_refresh_after_reschedule_keeps_the_reschedule_in_the_warning() {
    init_logging();
    let (state, effects) = update(with_failed_job(), Msg::RescheduleClicked { job_id: 70 });
    let Some(Effect::Dispatch { batch_id, .. }) = effects.first().cloned() else {
        panic!("no dispatch");
    };
    let (state, effects) = update(
        state,
        Msg::BatchSettled {
            batch_id,
            outcomes: vec![TargetOutcome::ok(70)],
        },
    );
    assert_eq!(effects, vec![Effect::FetchJobs { request_id: 1 }]);

    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Err("timeout".to_string()),
        },
    );
    let notification = state.view().notification.expect("notification");
    assert_eq!(
        notification.message,
        "Rescheduled 1 job(s), but could not reload jobs of request 1: timeout"
    );
    // The jobs already on screen stay.
    assert!(matches!(details_of(&state, 1), DetailView::Jobs(_)));

    // A later plain refresh failure is reported on its own.
    let (state, _) = update(state, Msg::DetailToggled { request_id: 1 });
    let (state, _) = update(state, Msg::DetailToggled { request_id: 1 });
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: 1,
            result: Err("timeout".to_string()),
        },
    );
    assert_eq!(
        state.view().notification.expect("notification").message,
        "Could not load jobs of request 1: timeout"
    );
}
