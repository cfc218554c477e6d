//! Dashboard client: backend calls and effect execution.
mod api;
mod batch;
mod handle;
mod options;
mod types;

pub use api::{ApiSettings, RequestsApi, ReqwestApi, CREATE_REQUEST_PATH};
pub use batch::dispatch_batch;
pub use handle::{ChannelEventSink, ClientHandle, EventSink};
pub use options::parse_options;
pub use types::{ApiError, ClientEvent, FailureKind};
