use std::collections::BTreeMap;

use crate::{Notification, RequestId, Severity};

pub type BatchId = u64;

/// Operation applied to every target of a batch.
///
/// Approve and delete target request ids; reschedule targets one parametric
/// job id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    Approve,
    Delete,
    Reschedule,
}

impl BatchAction {
    fn past_tense(self) -> &'static str {
        match self {
            BatchAction::Approve => "Approved",
            BatchAction::Delete => "Deleted",
            BatchAction::Reschedule => "Rescheduled",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            BatchAction::Approve | BatchAction::Delete => "request(s)",
            BatchAction::Reschedule => "job(s)",
        }
    }
}

/// What must be reloaded once a batch has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadScope {
    Table,
    Jobs(RequestId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    pub id: BatchId,
    pub action: BatchAction,
    pub targets: Vec<u64>,
    pub reload: ReloadScope,
}

/// Result of one request inside a settled batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    pub target: u64,
    pub result: Result<(), String>,
}

impl TargetOutcome {
    pub fn ok(target: u64) -> Self {
        Self {
            target,
            result: Ok(()),
        }
    }

    pub fn failed(target: u64, error: impl Into<String>) -> Self {
        Self {
            target,
            result: Err(error.into()),
        }
    }
}

/// Batches whose requests have been issued but not all settled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingBatches {
    last_id: BatchId,
    in_flight: BTreeMap<BatchId, PendingBatch>,
}

impl PendingBatches {
    pub fn start(
        &mut self,
        action: BatchAction,
        targets: Vec<u64>,
        reload: ReloadScope,
    ) -> PendingBatch {
        self.last_id += 1;
        let batch = PendingBatch {
            id: self.last_id,
            action,
            targets,
            reload,
        };
        self.in_flight.insert(batch.id, batch.clone());
        batch
    }

    /// Removes the batch; a second settlement of the same id yields `None`.
    pub fn settle(&mut self, id: BatchId) -> Option<PendingBatch> {
        self.in_flight.remove(&id)
    }

    pub fn table_batch_pending(&self) -> bool {
        self.in_flight
            .values()
            .any(|batch| batch.reload == ReloadScope::Table)
    }

    /// Whether `target` is already part of an unsettled `action` batch.
    pub fn is_in_flight(&self, action: BatchAction, target: u64) -> bool {
        self.in_flight
            .values()
            .any(|batch| batch.action == action && batch.targets.contains(&target))
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

/// Single user-visible summary for a settled batch.
pub fn settlement_notice(action: BatchAction, outcomes: &[TargetOutcome]) -> Notification {
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let succeeded = outcomes.len() - failed;

    let mut message = format!("{} {} {}", action.past_tense(), succeeded, action.noun());
    if failed > 0 {
        message.push_str(&format!(", {failed} failed"));
    }

    let (status, level) = match (action, failed) {
        (BatchAction::Delete, _) => ("Attention!", Severity::Danger),
        (_, 0) => ("Info!", Severity::Info),
        _ => ("Warning!", Severity::Warning),
    };
    Notification::new(status, message, level)
}
