use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use vidscribe_api::{ApiError, ApiEvent, ApiHandle};
use vidscribe_core::{Effect, Msg};

use super::config::AppConfig;

/// Executes core effects against the remote service and feeds settlements
/// back into the message loop.
pub struct EffectRunner {
    api: Arc<ApiHandle>,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, msg_tx: mpsc::Sender<Msg>) -> Result<Self, ApiError> {
        let api = Arc::new(ApiHandle::connect(
            config.api.clone(),
            config.session.clone(),
        )?);
        let runner = Self { api };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUrl { request_id, url } => {
                    client_info!("submit dispatched request_id={} url={}", request_id, url);
                    self.api.submit(request_id, url);
                }
                Effect::FetchTasks => {
                    client_info!("task list fetch dispatched");
                    self.api.list_tasks();
                }
                Effect::DeleteTask { task_id } => {
                    client_info!("delete dispatched task_id={}", task_id);
                    self.api.delete_task(task_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let api = self.api.clone();
        thread::spawn(move || loop {
            if let Some(event) = api.recv_timeout(Duration::from_millis(20)) {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_event(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::SubmitSettled {
            request_id,
            url,
            result,
        } => {
            if let Err(err) = &result {
                client_warn!("submission {} for {} failed: {}", request_id, url, err);
            }
            Msg::SubmitSettled {
                request_id,
                url,
                result: result.map(map_task).map_err(|err| err.to_string()),
            }
        }
        ApiEvent::TasksListed { result } => Msg::TasksLoaded {
            result: result
                .map(|tasks| tasks.into_iter().map(map_task).collect())
                .map_err(|err| err.to_string()),
        },
        ApiEvent::DeleteSettled { task_id, result } => Msg::DeleteSettled {
            task_id,
            result: result.map(|_ack| ()).map_err(|err| err.to_string()),
        },
    }
}

fn map_task(task: vidscribe_api::Task) -> vidscribe_core::Task {
    vidscribe_core::Task {
        task_id: task.task_id,
        video_url: task.video_url,
        video_title: task.video_title,
        transcription: task.transcription,
        summary: task.summary,
    }
}
