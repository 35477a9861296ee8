#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current input for summarization.
    SubmitClicked,
    /// A dispatched submission settled with its outcome.
    SubmitSettled {
        request_id: crate::RequestId,
        url: String,
        result: Result<crate::Task, String>,
    },
    /// User switched tabs.
    TabSelected(crate::Tab),
    /// The task list fetch settled with its outcome.
    TasksLoaded {
        result: Result<Vec<crate::Task>, String>,
    },
    /// User selected a task row in the history list.
    TaskSelected { task_id: String },
    /// User toggled the summary section of the selected task.
    SummaryToggled,
    /// User toggled the transcript section of the selected task.
    TranscriptToggled,
    /// User asked to delete a task.
    DeleteClicked { task_id: String },
    /// A delete request settled with its outcome.
    DeleteSettled {
        task_id: String,
        result: Result<(), String>,
    },
    /// User dismissed a notification.
    ToastDismissed { id: crate::ToastId },
    /// UI/render tick to pump pending events.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
