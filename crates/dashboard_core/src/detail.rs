use std::collections::BTreeMap;

use crate::{JobId, JobRowView, ParametricJob, ProgressBar, RequestId};

/// Nested job table of one request row. A row with no entry is collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    /// Expanded, waiting for the job list.
    Fetching,
    Shown(Vec<ParametricJob>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expanding,
    Collapsed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailExpansions {
    rows: BTreeMap<RequestId, DetailState>,
}

impl DetailExpansions {
    /// Flips one row. Collapsing discards the fetched jobs, so expanding
    /// always fetches again.
    pub fn toggle(&mut self, request_id: RequestId) -> Toggle {
        if self.rows.remove(&request_id).is_some() {
            Toggle::Collapsed
        } else {
            self.rows.insert(request_id, DetailState::Fetching);
            Toggle::Expanding
        }
    }

    /// Stores a fetched job list. Ignored when the row was collapsed while
    /// the fetch was in flight.
    pub fn loaded(&mut self, request_id: RequestId, jobs: Vec<ParametricJob>) -> bool {
        match self.rows.get_mut(&request_id) {
            Some(state) => {
                *state = DetailState::Shown(jobs);
                true
            }
            None => false,
        }
    }

    /// Collapses a row whose fetch failed. Returns false if it was already
    /// collapsed.
    pub fn fetch_failed(&mut self, request_id: RequestId) -> bool {
        match self.rows.get(&request_id) {
            Some(DetailState::Fetching) => {
                self.rows.remove(&request_id);
                true
            }
            // A failed refresh keeps the rows already on screen.
            Some(DetailState::Shown(_)) => true,
            None => false,
        }
    }

    pub fn is_expanded(&self, request_id: RequestId) -> bool {
        self.rows.contains_key(&request_id)
    }

    pub fn state(&self, request_id: RequestId) -> Option<&DetailState> {
        self.rows.get(&request_id)
    }

    /// Finds the shown job with `job_id` and the request it belongs to.
    pub fn find_job(&self, job_id: JobId) -> Option<(RequestId, &ParametricJob)> {
        self.rows.iter().find_map(|(request_id, state)| match state {
            DetailState::Shown(jobs) => jobs
                .iter()
                .find(|job| job.id == job_id)
                .map(|job| (*request_id, job)),
            DetailState::Fetching => None,
        })
    }

    /// Drops expansions of rows that are no longer rendered.
    pub fn retain_rendered(&mut self, rows: &[RequestId]) {
        self.rows.retain(|id, _| rows.contains(id));
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestId, &DetailState)> {
        self.rows.iter().map(|(id, state)| (*id, state))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Display row for one parametric job in a nested table.
pub fn job_row_view(job: &ParametricJob) -> JobRowView {
    JobRowView {
        job_id: job.id,
        macro_name: job.macro_name.clone().unwrap_or_default(),
        njobs: job.njobs,
        nevents: job.nevents,
        seed: job.seed,
        output: job.output_dirs().collect::<Vec<_>>().join("\n"),
        status: status_label(job),
        progress: ProgressBar::for_job(job),
        can_reschedule: job.reschedule_eligible(),
    }
}

fn status_label(job: &ParametricJob) -> String {
    if job.reschedule {
        "Rescheduled".to_string()
    } else {
        job.status.label().to_string()
    }
}
