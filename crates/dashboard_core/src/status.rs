use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a request (and of its parametric jobs).
///
/// Ordering follows the lifecycle rank, not the label. Labels the dashboard
/// does not know about are kept verbatim and rank below every known status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Requested,
    Approved,
    Submitted,
    Running,
    Failed,
    Completed,
    Other(String),
}

impl RequestStatus {
    pub fn rank(&self) -> u8 {
        match self {
            RequestStatus::Requested => 1,
            RequestStatus::Approved => 2,
            RequestStatus::Submitted => 3,
            RequestStatus::Running => 4,
            RequestStatus::Failed => 5,
            RequestStatus::Completed => 6,
            RequestStatus::Other(_) => 0,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RequestStatus::Requested => "Requested",
            RequestStatus::Approved => "Approved",
            RequestStatus::Submitted => "Submitted",
            RequestStatus::Running => "Running",
            RequestStatus::Failed => "Failed",
            RequestStatus::Completed => "Completed",
            RequestStatus::Other(label) => label,
        }
    }
}

impl From<String> for RequestStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Requested" => RequestStatus::Requested,
            "Approved" => RequestStatus::Approved,
            "Submitted" => RequestStatus::Submitted,
            "Running" => RequestStatus::Running,
            "Failed" => RequestStatus::Failed,
            "Completed" => RequestStatus::Completed,
            _ => RequestStatus::Other(label),
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(label: &str) -> Self {
        RequestStatus::from(label.to_string())
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl Ord for RequestStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.label().cmp(other.label()))
    }
}

impl PartialOrd for RequestStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
