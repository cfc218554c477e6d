use std::collections::BTreeMap;

use crate::detail::job_row_view;
use crate::table::{sort_requests, status_summary, truncate_cell};
use crate::view_model::{
    AppViewModel, DetailView, FormView, InfoView, MenuEntryView, MenuView, RequestRowView,
};
use crate::{
    BatchAction, ContextMenu, DetailExpansions, DetailState, Notification, PendingBatches,
    Request, RequestForm, RequestId, SelectionSet,
};

/// Info panel opened by double-click or the Info menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoPanel {
    Loading(Vec<RequestId>),
    Loaded(String),
}

/// Everything the dashboard page keeps between user gestures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    rows: Vec<Request>,
    pub(crate) selection: SelectionSet,
    pub(crate) menu: Option<ContextMenu>,
    pub(crate) confirm_delete: Option<Vec<RequestId>>,
    pub(crate) batches: PendingBatches,
    pub(crate) details: DetailExpansions,
    /// Nested tables being reloaded after a reschedule, with the number of
    /// jobs that were rescheduled.
    pub(crate) reschedule_refresh: BTreeMap<RequestId, usize>,
    pub(crate) info: Option<InfoPanel>,
    pub(crate) form: Option<RequestForm>,
    pub(crate) tags: Vec<String>,
    pub(crate) app_versions: Option<(String, Vec<String>)>,
    pub(crate) notification: Option<Notification>,
    pub(crate) alert: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers of the rendered rows in display order.
    pub fn row_ids(&self) -> Vec<RequestId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    pub fn row(&self, id: RequestId) -> Option<&Request> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_at(&self, index: usize) -> Option<&Request> {
        self.rows.get(index)
    }

    pub fn selected_ids(&self) -> Vec<RequestId> {
        self.selection.in_display_order(&self.row_ids())
    }

    pub fn pending_batches(&self) -> &PendingBatches {
        &self.batches
    }

    pub fn details(&self) -> &DetailExpansions {
        &self.details
    }

    pub fn form(&self) -> Option<&RequestForm> {
        self.form.as_ref()
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the table data and prunes every piece of state that pointed
    /// at rows that disappeared.
    pub(crate) fn replace_rows(&mut self, mut rows: Vec<Request>) {
        sort_requests(&mut rows);
        self.rows = rows;
        let ids = self.row_ids();
        self.selection.retain_rendered(&ids);
        self.details.retain_rendered(&ids);
        self.reschedule_refresh.retain(|id, _| ids.contains(id));
        self.menu = None;
        if let Some(pending) = self.confirm_delete.as_mut() {
            pending.retain(|id| ids.contains(id));
            if pending.is_empty() {
                self.confirm_delete = None;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.mark_dirty();
    }

    pub fn view(&self) -> AppViewModel {
        let table_batch_pending = self.batches.table_batch_pending();
        let rows = self
            .rows
            .iter()
            .map(|row| RequestRowView {
                request_id: row.id,
                description: truncate_cell(&row.description),
                sim_lead: truncate_cell(&row.sim_lead),
                status: row.status.clone(),
                request_date: row.request_date.clone(),
                requester: row.requester.clone(),
                selected: self.selection.contains(row.id),
                details: match self.details.state(row.id) {
                    None => DetailView::Collapsed,
                    Some(DetailState::Fetching) => DetailView::Loading,
                    Some(DetailState::Shown(jobs)) => DetailView::Jobs(
                        jobs.iter()
                            .map(|job| {
                                let mut view = job_row_view(job);
                                view.can_reschedule &= !self
                                    .batches
                                    .is_in_flight(BatchAction::Reschedule, job.id);
                                view
                            })
                            .collect(),
                    ),
                },
            })
            .collect();

        AppViewModel {
            rows,
            status_summary: status_summary(&self.rows),
            selected: self.selected_ids(),
            menu: self.menu.as_ref().map(|menu| MenuView {
                ids: menu.ids.clone(),
                entries: crate::MenuAction::ALL
                    .into_iter()
                    .map(|action| MenuEntryView {
                        action,
                        enabled: menu.is_enabled(action, table_batch_pending),
                    })
                    .collect(),
            }),
            confirm_prompt: self
                .confirm_delete
                .as_ref()
                .map(|ids| format!("Really delete {} request(s)?", ids.len())),
            pending_batches: self.batches.len(),
            notification: self.notification.clone(),
            alert: self.alert.clone(),
            info: self.info.as_ref().map(|info| match info {
                InfoPanel::Loading(ids) => InfoView::Loading(ids.clone()),
                InfoPanel::Loaded(body) => InfoView::Body(body.clone()),
            }),
            form: self.form.as_ref().map(|form| FormView {
                target: form.target,
                fields: form.fields().to_vec(),
            }),
            tags: self.tags.clone(),
            app_versions: self.app_versions.clone(),
            dirty: self.dirty,
        }
    }
}
