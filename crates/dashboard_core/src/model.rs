use serde::{Deserialize, Serialize};

use crate::RequestStatus;

pub type RequestId = u64;
pub type JobId = u64;

/// One row of the main table as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub status: RequestStatus,
    #[serde(default)]
    pub description: String,
    /// Only present in listings made for admins.
    #[serde(default)]
    pub requester: Option<String>,
    #[serde(default)]
    pub sim_lead: String,
    /// `dd/mm/yyyy`, as stamped by the backend on creation.
    #[serde(default)]
    pub request_date: String,
    #[serde(default)]
    pub detector: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A parameterised batch of simulation jobs belonging to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParametricJob {
    pub id: JobId,
    pub request_id: RequestId,
    #[serde(rename = "macro", default)]
    pub macro_name: Option<String>,
    #[serde(alias = "num_jobs", default)]
    pub njobs: u32,
    #[serde(default)]
    pub nevents: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub num_submitted: u32,
    #[serde(default)]
    pub num_running: u32,
    #[serde(default)]
    pub num_completed: u32,
    #[serde(default)]
    pub num_failed: u32,
    pub status: RequestStatus,
    #[serde(default)]
    pub reschedule: bool,
    #[serde(default)]
    pub sim_lfn_outputdir: Option<String>,
    #[serde(default)]
    pub mctruth_lfn_outputdir: Option<String>,
    #[serde(default)]
    pub reduction_lfn_outputdir: Option<String>,
    #[serde(default)]
    pub der_lfn_outputdir: Option<String>,
    #[serde(default)]
    pub lzap_lfn_outputdir: Option<String>,
}

impl ParametricJob {
    pub fn reschedule_eligible(&self) -> bool {
        self.status == RequestStatus::Failed
    }

    /// Non-null output directories in pipeline order.
    pub fn output_dirs(&self) -> impl Iterator<Item = &str> {
        [
            &self.sim_lfn_outputdir,
            &self.mctruth_lfn_outputdir,
            &self.reduction_lfn_outputdir,
            &self.der_lfn_outputdir,
            &self.lzap_lfn_outputdir,
        ]
        .into_iter()
        .filter_map(|dir| dir.as_deref())
    }
}
