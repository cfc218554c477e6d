use crate::{
    BatchId, FormTarget, JobId, MenuAction, Modifiers, ParametricJob, Request, RequestId,
    TargetOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User or the periodic timer asked for fresh table data.
    ReloadRequested,
    /// Main table data arrived.
    TableLoaded(Vec<Request>),
    TableLoadFailed(String),
    /// Row at display position `index` was clicked.
    RowClicked { index: usize, modifiers: Modifiers },
    RowDoubleClicked { index: usize },
    ContextMenuOpened { index: usize },
    ContextMenuDismissed,
    MenuActionChosen(MenuAction),
    DeleteKeyPressed,
    /// Answer to the delete confirmation prompt.
    DeleteConfirmed(bool),
    /// Expand/collapse control of a request row.
    DetailToggled { request_id: RequestId },
    JobsLoaded {
        request_id: RequestId,
        result: Result<Vec<ParametricJob>, String>,
    },
    RescheduleClicked { job_id: JobId },
    /// Every request of a batch has settled.
    BatchSettled {
        batch_id: BatchId,
        outcomes: Vec<TargetOutcome>,
    },
    InfoLoaded(Result<String, String>),
    InfoDismissed,
    FormOpened,
    FormFieldSet { name: String, value: String },
    FormFieldAdded { name: String, value: String },
    FormSubmitted,
    FormCancelled,
    RequestSaved {
        target: FormTarget,
        result: Result<(), String>,
    },
    TagsLoaded(Result<Vec<String>, String>),
    AppVersionsLoaded {
        app: String,
        result: Result<Vec<String>, String>,
    },
    AlertDismissed,
    NoOp,
}
