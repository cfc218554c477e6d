use dashboard_core::{BatchAction, TargetOutcome};
use dashboard_logging::{dash_info, dash_warn};
use futures_util::future::join_all;

use crate::RequestsApi;

/// Issues one request per target, all in flight at once, and resolves only
/// after every one of them has settled. Outcomes keep the order of `targets`.
pub async fn dispatch_batch(
    api: &dyn RequestsApi,
    action: BatchAction,
    targets: &[u64],
) -> Vec<TargetOutcome> {
    let calls = targets.iter().map(|&target| async move {
        let result = match action {
            BatchAction::Approve => api.approve_request(target).await,
            BatchAction::Delete => api.delete_request(target).await,
            BatchAction::Reschedule => api.reschedule_job(target).await,
        };
        match result {
            Ok(()) => TargetOutcome::ok(target),
            Err(err) => {
                dash_warn!("{:?} of {} failed: {}", action, target, err);
                TargetOutcome::failed(target, err.to_string())
            }
        }
    });

    let outcomes = join_all(calls).await;
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    dash_info!(
        "{:?} batch settled: {} target(s), {} failed",
        action,
        outcomes.len(),
        failed
    );
    outcomes
}
