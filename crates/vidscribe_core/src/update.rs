use crate::{AppState, Effect, Msg, Tab, ToastKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            let urls = parse_urls(state.url_input());
            if urls.is_empty() {
                state.push_toast(ToastKind::Error, "Enter at least one video URL");
                return (state, Vec::new());
            }
            state.clear_url_input();
            let mut effects = Vec::with_capacity(urls.len());
            for url in urls {
                let request_id = state.begin_submission();
                effects.push(Effect::SubmitUrl { request_id, url });
            }
            effects
        }
        Msg::SubmitSettled {
            request_id: _,
            url,
            result,
        } => {
            state.settle_submission();
            match result {
                Ok(task) => {
                    state.push_toast(ToastKind::Success, format!("Summarized {url}"));
                    state.upsert_task(task.clone());
                    state.select_task(task.task_id);
                    open_history(&mut state)
                }
                Err(message) => {
                    // Sibling submissions are unaffected; each URL settles on
                    // its own.
                    state.push_toast(
                        ToastKind::Error,
                        format!("Failed to summarize {url}: {message}"),
                    );
                    Vec::new()
                }
            }
        }
        Msg::TabSelected(Tab::History) => open_history(&mut state),
        Msg::TabSelected(tab) => {
            state.select_tab(tab);
            Vec::new()
        }
        Msg::TasksLoaded { result } => {
            match result {
                Ok(tasks) => state.apply_tasks(tasks),
                Err(message) if state.has_loaded_tasks() => {
                    // Keep the stale list visible; a refresh failure is not a
                    // reason to drop data the user already has.
                    state.push_toast(
                        ToastKind::Error,
                        format!("Failed to reload tasks: {message}"),
                    );
                }
                Err(message) => state.fail_history_load(message),
            }
            Vec::new()
        }
        Msg::TaskSelected { task_id } => {
            state.select_task(task_id);
            Vec::new()
        }
        Msg::SummaryToggled => {
            state.toggle_summary();
            Vec::new()
        }
        Msg::TranscriptToggled => {
            state.toggle_transcript();
            Vec::new()
        }
        Msg::DeleteClicked { task_id } => {
            vec![Effect::DeleteTask { task_id }]
        }
        Msg::DeleteSettled { task_id, result } => match result {
            Ok(()) => {
                state.push_toast(ToastKind::Success, "Task deleted");
                if state.selected_task_id() == Some(task_id.as_str()) {
                    state.clear_selection();
                }
                // Re-fetch the authoritative list instead of patching the
                // local copy.
                vec![Effect::FetchTasks]
            }
            Err(message) => {
                state.push_toast(ToastKind::Error, format!("Failed to delete task: {message}"));
                Vec::new()
            }
        },
        Msg::ToastDismissed { id } => {
            state.dismiss_toast(id);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Switches to the history tab, dispatching the one-time list fetch on first
/// activation.
fn open_history(state: &mut AppState) -> Vec<Effect> {
    state.select_tab(Tab::History);
    if state.start_history_load() {
        vec![Effect::FetchTasks]
    } else {
        Vec::new()
    }
}

fn parse_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
