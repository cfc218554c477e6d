use crate::{
    FormTarget, JobId, MenuAction, Notification, ProgressBar, RequestId, RequestStatus,
    StatusSlice,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub rows: Vec<RequestRowView>,
    pub status_summary: Vec<StatusSlice>,
    pub selected: Vec<RequestId>,
    pub menu: Option<MenuView>,
    pub confirm_prompt: Option<String>,
    pub pending_batches: usize,
    pub notification: Option<Notification>,
    /// Blocking message that must be dismissed (form validation).
    pub alert: Option<String>,
    pub info: Option<InfoView>,
    pub form: Option<FormView>,
    pub tags: Vec<String>,
    pub app_versions: Option<(String, Vec<String>)>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestRowView {
    pub request_id: RequestId,
    pub description: String,
    pub sim_lead: String,
    pub status: RequestStatus,
    pub request_date: String,
    pub requester: Option<String>,
    pub selected: bool,
    pub details: DetailView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Collapsed,
    Loading,
    Jobs(Vec<JobRowView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub macro_name: String,
    pub njobs: u32,
    pub nevents: Option<u64>,
    pub seed: Option<u64>,
    /// Output directories, one per line.
    pub output: String,
    pub status: String,
    pub progress: ProgressBar,
    pub can_reschedule: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub ids: Vec<RequestId>,
    pub entries: Vec<MenuEntryView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntryView {
    pub action: MenuAction,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoView {
    Loading(Vec<RequestId>),
    Body(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub target: FormTarget,
    pub fields: Vec<(String, String)>,
}
