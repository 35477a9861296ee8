use crate::{HistoryLoad, Tab, Task, Toast};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub tab: Tab,
    pub url_input: String,
    pub in_flight: usize,
    /// Aggregate progress note over all in-flight submissions; `None` once
    /// the counter returns to zero.
    pub progress_note: Option<String>,
    pub toasts: Vec<Toast>,
    pub history: HistoryViewModel,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryStatus {
    #[default]
    NotLoaded,
    Loading,
    /// Load failed before any data arrived. Distinct from `Empty`.
    Failed(String),
    /// Loaded and the service reported no tasks yet.
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryViewModel {
    pub status: HistoryStatus,
    pub rows: Vec<TaskRowView>,
    pub detail: Option<TaskDetailView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub task_id: String,
    pub video_title: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailView {
    pub task_id: String,
    pub video_title: String,
    pub video_url: String,
    pub summary: String,
    pub transcription: String,
    pub summary_open: bool,
    pub transcript_open: bool,
}

impl HistoryViewModel {
    pub(crate) fn build(
        load: &HistoryLoad,
        selected: Option<&str>,
        summary_open: bool,
        transcript_open: bool,
    ) -> Self {
        let tasks = match load {
            HistoryLoad::NotRequested => {
                return Self {
                    status: HistoryStatus::NotLoaded,
                    ..Self::default()
                }
            }
            HistoryLoad::Loading => {
                return Self {
                    status: HistoryStatus::Loading,
                    ..Self::default()
                }
            }
            HistoryLoad::Failed(message) => {
                return Self {
                    status: HistoryStatus::Failed(message.clone()),
                    ..Self::default()
                }
            }
            HistoryLoad::Loaded(tasks) => tasks,
        };

        if tasks.is_empty() {
            return Self {
                status: HistoryStatus::Empty,
                ..Self::default()
            };
        }

        let rows = tasks
            .iter()
            .map(|task| TaskRowView {
                task_id: task.task_id.clone(),
                video_title: task.video_title.clone(),
                selected: selected == Some(task.task_id.as_str()),
            })
            .collect();

        let detail = selected
            .and_then(|id| tasks.iter().find(|task| task.task_id == id))
            .map(|task| detail_view(task, summary_open, transcript_open));

        Self {
            status: HistoryStatus::Ready,
            rows,
            detail,
        }
    }
}

fn detail_view(task: &Task, summary_open: bool, transcript_open: bool) -> TaskDetailView {
    TaskDetailView {
        task_id: task.task_id.clone(),
        video_title: task.video_title.clone(),
        video_url: task.video_url.clone(),
        summary: task.summary.clone(),
        transcription: task.transcription.clone(),
        summary_open,
        transcript_open,
    }
}

/// Singular at one, plural with the literal count otherwise.
pub(crate) fn progress_note(in_flight: usize) -> Option<String> {
    match in_flight {
        0 => None,
        1 => Some("Summarizing 1 video...".to_string()),
        n => Some(format!("Summarizing {n} videos...")),
    }
}
