use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use client_logging::client_warn;

use crate::client::{ApiSettings, HttpTaskApi, SessionContext, TaskApi};
use crate::{ApiEvent, RequestId};

enum ApiCommand {
    Submit { request_id: RequestId, url: String },
    ListTasks,
    DeleteTask { task_id: String },
}

/// Command/event bridge to the remote service.
///
/// Owns a tokio runtime on a background thread. Every command is spawned as
/// its own task, so overlapping calls run concurrently and settle
/// independently; a slow submission never blocks its siblings. There is no
/// cancellation: a dispatched command always settles with an event.
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
    event_rx: Mutex<mpsc::Receiver<ApiEvent>>,
}

impl ApiHandle {
    /// Connects to the service described by `settings`.
    pub fn connect(settings: ApiSettings, session: SessionContext) -> Result<Self, crate::ApiError> {
        let api = Arc::new(HttpTaskApi::new(settings)?);
        Ok(Self::new(api, session))
    }

    /// Wraps an arbitrary [`TaskApi`] implementation.
    pub fn new(api: Arc<dyn TaskApi>, session: SessionContext) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let session = session.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = run_command(api.as_ref(), &session, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn submit(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(ApiCommand::Submit {
            request_id,
            url: url.into(),
        });
    }

    pub fn list_tasks(&self) {
        let _ = self.cmd_tx.send(ApiCommand::ListTasks);
    }

    pub fn delete_task(&self, task_id: impl Into<String>) {
        let _ = self.cmd_tx.send(ApiCommand::DeleteTask {
            task_id: task_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn run_command(
    api: &dyn TaskApi,
    session: &SessionContext,
    command: ApiCommand,
) -> ApiEvent {
    match command {
        ApiCommand::Submit { request_id, url } => {
            let result = api.submit(session, &url).await;
            if let Err(err) = &result {
                client_warn!("submit failed request_id={} url={}: {}", request_id, url, err);
            }
            ApiEvent::SubmitSettled {
                request_id,
                url,
                result,
            }
        }
        ApiCommand::ListTasks => {
            let result = api.list_tasks(session).await;
            if let Err(err) = &result {
                client_warn!("task list fetch failed: {}", err);
            }
            ApiEvent::TasksListed { result }
        }
        ApiCommand::DeleteTask { task_id } => {
            let result = api.delete_task(session, &task_id).await;
            if let Err(err) = &result {
                client_warn!("delete failed task_id={}: {}", task_id, err);
            }
            ApiEvent::DeleteSettled { task_id, result }
        }
    }
}
