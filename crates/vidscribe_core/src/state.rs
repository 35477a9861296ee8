use crate::view_model::{progress_note, AppViewModel, HistoryViewModel};

pub type RequestId = u64;
pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Transcribe,
    History,
}

/// A transcription task as tracked by the remote service.
///
/// Read-only on this side: the client requests creation and deletion but
/// never mutates fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    pub task_id: String,
    pub video_url: String,
    pub video_title: String,
    pub transcription: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A single per-outcome notification. One per settlement, never batched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub text: String,
}

/// Lifecycle of the authoritative task list.
///
/// `Failed` is only reachable before the first successful load; a refresh
/// failure keeps the stale `Loaded` data and surfaces a toast instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryLoad {
    #[default]
    NotRequested,
    Loading,
    Loaded(Vec<Task>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HistoryState {
    load: HistoryLoad,
    selected: Option<String>,
    summary_open: bool,
    transcript_open: bool,
}

impl Default for HistoryState {
    fn default() -> Self {
        // Both sections start expanded; an explicit selection collapses the
        // transcript and keeps the summary open.
        Self {
            load: HistoryLoad::NotRequested,
            selected: None,
            summary_open: true,
            transcript_open: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    tab: Tab,
    url_input: String,
    in_flight: usize,
    next_request_id: RequestId,
    toasts: Vec<Toast>,
    next_toast_id: ToastId,
    history: HistoryState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            tab: self.tab,
            url_input: self.url_input.clone(),
            in_flight: self.in_flight,
            progress_note: progress_note(self.in_flight),
            toasts: self.toasts.clone(),
            history: self.history_view(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        self.url_input = text;
        self.mark_dirty();
    }

    pub(crate) fn clear_url_input(&mut self) {
        self.url_input.clear();
        self.mark_dirty();
    }

    pub(crate) fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.mark_dirty();
    }

    /// Allocates a request id and raises the shared in-flight counter.
    ///
    /// Must be paired with exactly one [`AppState::settle_submission`] call.
    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.in_flight += 1;
        self.mark_dirty();
        self.next_request_id
    }

    /// Lowers the in-flight counter for one settled submission.
    pub(crate) fn settle_submission(&mut self) {
        debug_assert!(self.in_flight > 0, "settlement without dispatch");
        self.in_flight = self.in_flight.saturating_sub(1);
        self.mark_dirty();
    }

    pub(crate) fn push_toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.next_toast_id += 1;
        self.toasts.push(Toast {
            id: self.next_toast_id,
            kind,
            text: text.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn dismiss_toast(&mut self, id: ToastId) {
        self.toasts.retain(|toast| toast.id != id);
        self.mark_dirty();
    }

    /// Moves the history list into `Loading` on its first activation.
    ///
    /// Returns true when a fetch should be dispatched.
    pub(crate) fn start_history_load(&mut self) -> bool {
        if self.history.load != HistoryLoad::NotRequested {
            return false;
        }
        self.history.load = HistoryLoad::Loading;
        self.mark_dirty();
        true
    }

    pub(crate) fn has_loaded_tasks(&self) -> bool {
        matches!(self.history.load, HistoryLoad::Loaded(_))
    }

    /// Replaces the visible task set with a fresh authoritative list.
    ///
    /// A selection pointing at a task that is gone from the new list is
    /// cleared.
    pub(crate) fn apply_tasks(&mut self, tasks: Vec<Task>) {
        if let Some(selected) = &self.history.selected {
            if !tasks.iter().any(|task| &task.task_id == selected) {
                self.history.selected = None;
            }
        }
        self.history.load = HistoryLoad::Loaded(tasks);
        self.mark_dirty();
    }

    pub(crate) fn fail_history_load(&mut self, message: String) {
        self.history.load = HistoryLoad::Failed(message);
        self.mark_dirty();
    }

    /// Inserts a freshly returned task into the loaded list, replacing a
    /// stale row with the same id. No-op while the list has not loaded yet;
    /// the pending fetch will include the task.
    pub(crate) fn upsert_task(&mut self, task: Task) {
        let HistoryLoad::Loaded(tasks) = &mut self.history.load else {
            return;
        };
        match tasks.iter_mut().find(|row| row.task_id == task.task_id) {
            Some(row) => *row = task,
            None => tasks.push(task),
        }
        self.mark_dirty();
    }

    pub(crate) fn selected_task_id(&self) -> Option<&str> {
        self.history.selected.as_deref()
    }

    pub(crate) fn select_task(&mut self, task_id: String) {
        self.history.selected = Some(task_id);
        self.history.summary_open = true;
        self.history.transcript_open = false;
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.history.selected = None;
        self.mark_dirty();
    }

    pub(crate) fn toggle_summary(&mut self) {
        self.history.summary_open = !self.history.summary_open;
        self.mark_dirty();
    }

    pub(crate) fn toggle_transcript(&mut self) {
        self.history.transcript_open = !self.history.transcript_open;
        self.mark_dirty();
    }

    fn history_view(&self) -> HistoryViewModel {
        HistoryViewModel::build(
            &self.history.load,
            self.history.selected.as_deref(),
            self.history.summary_open,
            self.history.transcript_open,
        )
    }
}
