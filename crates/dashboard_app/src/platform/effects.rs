use std::sync::{mpsc, Arc};

use dashboard_client::{ClientEvent, ClientHandle, EventSink, RequestsApi};
use dashboard_core::{Effect, Msg};
use dashboard_logging::{dash_debug, dash_info};

use super::app::Inbound;

/// Executes effects emitted by `update` against the backend client.
pub(crate) struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub(crate) fn new(
        api: Arc<dyn RequestsApi>,
        tx: mpsc::Sender<Inbound>,
    ) -> std::io::Result<Self> {
        let client = ClientHandle::spawn(api, Arc::new(MsgSink { tx }))?;
        Ok(Self { client })
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReloadTable => self.client.load_table(),
                Effect::FetchJobs { request_id } => {
                    dash_debug!("Fetching parametric jobs of request {}", request_id);
                    self.client.load_jobs(request_id);
                }
                Effect::Dispatch {
                    batch_id,
                    action,
                    targets,
                } => {
                    dash_info!(
                        "Batch {} {:?} over {} target(s): {:?}",
                        batch_id,
                        action,
                        targets.len(),
                        targets
                    );
                    self.client.dispatch(batch_id, action, targets);
                }
                Effect::ShowInfo { ids } => self.client.load_info(ids),
                Effect::SaveRequest { target, fields } => self.client.save_request(target, fields),
                Effect::LoadTags => self.client.load_tags(),
                Effect::LoadAppVersions { app } => self.client.load_app_versions(app),
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<Inbound>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(Inbound::Client(to_msg(event)));
    }
}

fn to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::TableLoaded(Ok(rows)) => Msg::TableLoaded(rows),
        ClientEvent::TableLoaded(Err(err)) => Msg::TableLoadFailed(err.to_string()),
        ClientEvent::JobsLoaded { request_id, result } => Msg::JobsLoaded {
            request_id,
            result: result.map_err(|err| err.to_string()),
        },
        ClientEvent::BatchSettled { batch_id, outcomes } => {
            Msg::BatchSettled { batch_id, outcomes }
        }
        ClientEvent::InfoLoaded(result) => Msg::InfoLoaded(result.map_err(|err| err.to_string())),
        ClientEvent::RequestSaved { target, result } => Msg::RequestSaved {
            target,
            result: result.map_err(|err| err.to_string()),
        },
        ClientEvent::TagsLoaded(result) => Msg::TagsLoaded(result.map_err(|err| err.to_string())),
        ClientEvent::AppVersionsLoaded { app, result } => Msg::AppVersionsLoaded {
            app,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
