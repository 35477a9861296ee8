use std::sync::Once;

use vidscribe_core::{update, AppState, Effect, Msg, Tab, Task, ToastKind};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn task(id: &str, title: &str) -> Task {
    Task {
        task_id: id.to_string(),
        video_url: format!("https://youtube.com/watch?v={id}"),
        video_title: title.to_string(),
        transcription: format!("transcript of {title}"),
        summary: format!("summary of {title}"),
    }
}

#[test]
fn blank_input_reports_validation_failure_without_effects() {
    init_logging();
    for input in ["", "   ", " , ,  ,", ",,,"] {
        let (state, effects) = submit(AppState::new(), input);
        let view = state.view();

        assert!(effects.is_empty(), "input {input:?} dispatched effects");
        assert_eq!(view.in_flight, 0);
        assert_eq!(view.toasts.len(), 1);
        assert_eq!(view.toasts[0].kind, ToastKind::Error);
    }
}

#[test]
fn comma_separated_urls_are_trimmed_and_dispatched_independently() {
    init_logging();
    let input = "https://youtube.com/watch?v=a, https://youtube.com/watch?v=b";
    let (mut state, effects) = submit(AppState::new(), input);

    assert_eq!(
        effects,
        vec![
            Effect::SubmitUrl {
                request_id: 1,
                url: "https://youtube.com/watch?v=a".to_string(),
            },
            Effect::SubmitUrl {
                request_id: 2,
                url: "https://youtube.com/watch?v=b".to_string(),
            },
        ]
    );

    let view = state.view();
    assert_eq!(view.in_flight, 2);
    assert_eq!(view.url_input, "");
    assert_eq!(
        view.progress_note.as_deref(),
        Some("Summarizing 2 videos...")
    );
    assert!(state.consume_dirty());
}

#[test]
fn progress_note_is_singular_for_one_submission() {
    init_logging();
    let (state, _effects) = submit(AppState::new(), "https://youtube.com/watch?v=a");

    assert_eq!(
        state.view().progress_note.as_deref(),
        Some("Summarizing 1 video...")
    );
}

#[test]
fn overlapping_submissions_share_the_in_flight_counter() {
    init_logging();
    let (state, _effects) = submit(AppState::new(), "https://youtube.com/watch?v=a");
    let (state, effects) = submit(state, "https://youtube.com/watch?v=b");

    assert_eq!(
        effects,
        vec![Effect::SubmitUrl {
            request_id: 2,
            url: "https://youtube.com/watch?v=b".to_string(),
        }]
    );
    assert_eq!(state.view().in_flight, 2);
}

#[test]
fn mixed_outcomes_settle_independently_and_counter_returns_to_zero() {
    init_logging();
    let input = "https://youtube.com/watch?v=a, https://youtube.com/watch?v=b";
    let (state, effects) = submit(AppState::new(), input);
    assert_eq!(effects.len(), 2);
    assert_eq!(state.view().in_flight, 2);

    let (state, effects) = update(
        state,
        Msg::SubmitSettled {
            request_id: 1,
            url: "https://youtube.com/watch?v=a".to_string(),
            result: Ok(task("1", "Video A")),
        },
    );
    // Success hands the task off and switches to the history view, which
    // fetches the list on first activation.
    assert_eq!(effects, vec![Effect::FetchTasks]);
    let view = state.view();
    assert_eq!(view.tab, Tab::History);
    assert_eq!(view.in_flight, 1);
    assert_eq!(
        view.progress_note.as_deref(),
        Some("Summarizing 1 video...")
    );

    let (state, effects) = update(
        state,
        Msg::SubmitSettled {
            request_id: 2,
            url: "https://youtube.com/watch?v=b".to_string(),
            result: Err("network error".to_string()),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.in_flight, 0);
    assert_eq!(view.progress_note, None);

    let successes: Vec<_> = view
        .toasts
        .iter()
        .filter(|toast| toast.kind == ToastKind::Success)
        .collect();
    let failures: Vec<_> = view
        .toasts
        .iter()
        .filter(|toast| toast.kind == ToastKind::Error)
        .collect();
    assert_eq!(successes.len(), 1);
    assert!(successes[0].text.contains("https://youtube.com/watch?v=a"));
    assert_eq!(failures.len(), 1);
    assert!(failures[0].text.contains("https://youtube.com/watch?v=b"));
    assert!(failures[0].text.contains("network error"));
}

#[test]
fn settlement_order_does_not_matter() {
    init_logging();
    let input = "https://youtube.com/watch?v=a, https://youtube.com/watch?v=b";
    let (state, _effects) = submit(AppState::new(), input);

    // The second dispatch settles first.
    let (state, _effects) = update(
        state,
        Msg::SubmitSettled {
            request_id: 2,
            url: "https://youtube.com/watch?v=b".to_string(),
            result: Err("connection reset".to_string()),
        },
    );
    assert_eq!(state.view().in_flight, 1);

    let (state, _effects) = update(
        state,
        Msg::SubmitSettled {
            request_id: 1,
            url: "https://youtube.com/watch?v=a".to_string(),
            result: Ok(task("1", "Video A")),
        },
    );
    assert_eq!(state.view().in_flight, 0);
    assert_eq!(state.view().progress_note, None);
}

#[test]
fn successful_submission_selects_the_returned_task() {
    init_logging();
    let (state, _effects) = update(
        AppState::new(),
        Msg::TasksLoaded {
            result: Ok(vec![task("1", "Old video")]),
        },
    );

    let (state, _effects) = submit(state, "https://youtube.com/watch?v=new");
    let (state, _effects) = update(
        state,
        Msg::SubmitSettled {
            request_id: 1,
            url: "https://youtube.com/watch?v=new".to_string(),
            result: Ok(task("2", "New video")),
        },
    );

    let view = state.view();
    let detail = view.history.detail.expect("new task selected");
    assert_eq!(detail.task_id, "2");
    assert!(detail.summary_open);
    assert!(!detail.transcript_open);
}

#[test]
fn handed_off_task_replaces_stale_row_with_same_id() {
    init_logging();
    let (state, _effects) = update(
        AppState::new(),
        Msg::TasksLoaded {
            result: Ok(vec![task("1", "Old title"), task("2", "Other")]),
        },
    );

    let (state, _effects) = submit(state, "https://youtube.com/watch?v=1");
    let (state, _effects) = update(
        state,
        Msg::SubmitSettled {
            request_id: 1,
            url: "https://youtube.com/watch?v=1".to_string(),
            result: Ok(task("1", "Fresh title")),
        },
    );

    let view = state.view();
    assert_eq!(view.history.rows.len(), 2);
    let row = view
        .history
        .rows
        .iter()
        .find(|row| row.task_id == "1")
        .expect("row kept");
    assert_eq!(row.video_title, "Fresh title");
}
