//! Dashboard core: pure state machine and view-model helpers.
mod batch;
mod detail;
mod effect;
mod form;
mod menu;
mod model;
mod msg;
mod notification;
mod progress;
mod selection;
mod state;
mod status;
mod table;
mod update;
mod view_model;

pub use batch::{
    settlement_notice, BatchAction, BatchId, PendingBatch, PendingBatches, ReloadScope,
    TargetOutcome,
};
pub use detail::{job_row_view, DetailExpansions, DetailState, Toggle};
pub use effect::Effect;
pub use form::{FormError, FormTarget, RequestForm, REQUIRED_FIELDS};
pub use menu::{ContextMenu, MenuAction};
pub use model::{JobId, ParametricJob, Request, RequestId};
pub use msg::Msg;
pub use notification::{Notification, Severity};
pub use progress::{percent_of, ProgressBar, ProgressSegment, SegmentKind};
pub use selection::{Modifiers, SelectionSet};
pub use state::{AppState, InfoPanel};
pub use status::RequestStatus;
pub use table::{sort_requests, status_summary, truncate_cell, StatusSlice, CELL_WIDTH_LIMIT};
pub use update::update;
pub use view_model::{
    AppViewModel, DetailView, FormView, InfoView, JobRowView, MenuEntryView, MenuView,
    RequestRowView,
};
