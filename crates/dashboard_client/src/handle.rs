use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use dashboard_core::{BatchAction, BatchId, FormTarget, RequestId};
use dashboard_logging::{action_seq, dash_debug, with_action_seq};

use crate::batch::dispatch_batch;
use crate::{ClientEvent, RequestsApi};

/// Receiver of client events; called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    LoadTable,
    LoadJobs {
        request_id: RequestId,
    },
    Dispatch {
        batch_id: BatchId,
        action: BatchAction,
        targets: Vec<u64>,
    },
    LoadInfo {
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

/// Command plus the action number of the thread that issued it.
struct Envelope {
    action_seq: u64,
    command: ClientCommand,
}

/// Runs backend calls on a tokio runtime owned by a worker thread.
///
/// Commands return immediately; every result comes back through the
/// [`EventSink`]. Commands are executed concurrently, so results of two
/// commands may arrive in either order. Log lines written while a command
/// runs carry the action number of the caller.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<Envelope>,
}

impl ClientHandle {
    pub fn spawn(api: Arc<dyn RequestsApi>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("dashboard-client".to_string())
            .spawn(move || {
                while let Ok(Envelope {
                    action_seq,
                    command,
                }) = cmd_rx.recv()
                {
                    let api = api.clone();
                    let sink = sink.clone();
                    runtime.spawn(with_action_seq(action_seq, async move {
                        let event = handle_command(api.as_ref(), command).await;
                        sink.emit(event);
                    }));
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn load_table(&self) {
        self.send(ClientCommand::LoadTable);
    }

    pub fn load_jobs(&self, request_id: RequestId) {
        self.send(ClientCommand::LoadJobs { request_id });
    }

    pub fn dispatch(&self, batch_id: BatchId, action: BatchAction, targets: Vec<u64>) {
        self.send(ClientCommand::Dispatch {
            batch_id,
            action,
            targets,
        });
    }

    pub fn load_info(&self, ids: Vec<RequestId>) {
        self.send(ClientCommand::LoadInfo { ids });
    }

    pub fn save_request(&self, target: FormTarget, fields: Vec<(String, String)>) {
        self.send(ClientCommand::SaveRequest { target, fields });
    }

    pub fn load_tags(&self) {
        self.send(ClientCommand::LoadTags);
    }

    pub fn load_app_versions(&self, app: impl Into<String>) {
        self.send(ClientCommand::LoadAppVersions { app: app.into() });
    }

    fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(Envelope {
            action_seq: action_seq(),
            command,
        });
    }
}

async fn handle_command(api: &dyn RequestsApi, command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::LoadTable => ClientEvent::TableLoaded(api.list_requests().await),
        ClientCommand::LoadJobs { request_id } => ClientEvent::JobsLoaded {
            request_id,
            result: api.parametric_jobs(request_id).await,
        },
        ClientCommand::Dispatch {
            batch_id,
            action,
            targets,
        } => {
            dash_debug!("Dispatching batch {} ({} target(s))", batch_id, targets.len());
            ClientEvent::BatchSettled {
                batch_id,
                outcomes: dispatch_batch(api, action, &targets).await,
            }
        }
        ClientCommand::LoadInfo { ids } => ClientEvent::InfoLoaded(api.request_info(&ids).await),
        ClientCommand::SaveRequest { target, fields } => {
            let result = match target {
                FormTarget::New => api.create_request(&fields).await,
                FormTarget::Edit(id) => api.update_request(id, &fields).await,
            };
            ClientEvent::RequestSaved { target, result }
        }
        ClientCommand::LoadTags => ClientEvent::TagsLoaded(api.tags().await),
        ClientCommand::LoadAppVersions { app } => {
            let result = api.app_versions(&app).await;
            ClientEvent::AppVersionsLoaded { app, result }
        }
    }
}
