use crate::{BatchAction, BatchId, FormTarget, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ReloadTable,
    FetchJobs {
        request_id: RequestId,
    },
    /// Issue one request per target concurrently and report back once all
    /// of them have settled.
    Dispatch {
        batch_id: BatchId,
        action: BatchAction,
        targets: Vec<u64>,
    },
    ShowInfo {
        ids: Vec<RequestId>,
    },
    SaveRequest {
        target: FormTarget,
        fields: Vec<(String, String)>,
    },
    LoadTags,
    LoadAppVersions {
        app: String,
    },
}
