use iced::widget::{button, column, row, scrollable, text, text_input};
use iced::{Element, Length};
use vidscribe_core::{
    AppViewModel, HistoryStatus, HistoryViewModel, Msg, Tab, TaskDetailView, TaskRowView, Toast,
    ToastKind,
};

pub fn view(model: &AppViewModel) -> Element<'_, Msg> {
    let body = match model.tab {
        Tab::Transcribe => transcribe_tab(model),
        Tab::History => history_tab(&model.history),
    };

    column![tab_bar(model.tab), toast_rows(&model.toasts), body]
        .spacing(12)
        .padding(16)
        .into()
}

fn tab_bar(active: Tab) -> Element<'static, Msg> {
    row![
        tab_button("Summarize Video", Tab::Transcribe, active),
        tab_button("Task History", Tab::History, active),
    ]
    .spacing(8)
    .into()
}

fn tab_button(label: &'static str, tab: Tab, active: Tab) -> Element<'static, Msg> {
    let marker = if tab == active { "[*] " } else { "" };
    button(text(format!("{marker}{label}")))
        .on_press(Msg::TabSelected(tab))
        .padding(8)
        .into()
}

fn toast_rows(toasts: &[Toast]) -> Element<'_, Msg> {
    let mut rows = column![].spacing(4);
    for toast in toasts {
        let tag = match toast.kind {
            ToastKind::Success => "OK",
            ToastKind::Error => "ERR",
        };
        rows = rows.push(
            row![
                text(format!("[{tag}] {}", toast.text)).width(Length::Fill),
                button(text("x")).on_press(Msg::ToastDismissed { id: toast.id }),
            ]
            .spacing(8),
        );
    }
    rows.into()
}

fn transcribe_tab(model: &AppViewModel) -> Element<'_, Msg> {
    let mut content = column![
        text("Video URLs (comma separated)"),
        text_input("https://youtube.com/watch?v=example", &model.url_input)
            .on_input(Msg::InputChanged)
            .on_submit(Msg::SubmitClicked)
            .padding(8),
        button(text("Summarize")).on_press(Msg::SubmitClicked).padding(8),
    ]
    .spacing(12);

    if let Some(note) = &model.progress_note {
        content = content.push(text(note.clone()));
    }

    content.into()
}

fn history_tab(history: &HistoryViewModel) -> Element<'_, Msg> {
    match &history.status {
        HistoryStatus::NotLoaded | HistoryStatus::Loading => text("Loading tasks...").into(),
        HistoryStatus::Failed(message) => text(format!("Failed to load tasks: {message}")).into(),
        HistoryStatus::Empty => text("No transcription tasks yet").into(),
        HistoryStatus::Ready => row![
            task_list(&history.rows),
            detail_pane(history.detail.as_ref()),
        ]
        .spacing(16)
        .into(),
    }
}

fn task_list(rows: &[TaskRowView]) -> Element<'_, Msg> {
    let mut list = column![text("History")].spacing(6);
    for task_row in rows {
        let marker = if task_row.selected { "> " } else { "" };
        list = list.push(
            row![
                button(text(format!("{marker}{}", task_row.video_title)))
                    .on_press(Msg::TaskSelected {
                        task_id: task_row.task_id.clone(),
                    })
                    .width(Length::Fill),
                button(text("Delete")).on_press(Msg::DeleteClicked {
                    task_id: task_row.task_id.clone(),
                }),
            ]
            .spacing(8),
        );
    }
    scrollable(list).width(Length::FillPortion(1)).into()
}

fn detail_pane(detail: Option<&TaskDetailView>) -> Element<'_, Msg> {
    let Some(detail) = detail else {
        return column![text("Select a task to view details")]
            .width(Length::FillPortion(3))
            .into();
    };

    let content = column![
        text(detail.video_title.as_str()).size(20),
        text(detail.video_url.as_str()).size(12),
        section("Summary", detail.summary_open, &detail.summary, Msg::SummaryToggled),
        section(
            "Transcription",
            detail.transcript_open,
            &detail.transcription,
            Msg::TranscriptToggled,
        ),
    ]
    .spacing(10);

    scrollable(content).width(Length::FillPortion(3)).into()
}

fn section<'a>(title: &'a str, open: bool, content: &'a str, toggle: Msg) -> Element<'a, Msg> {
    let chevron = if open { "v" } else { ">" };
    let mut section = column![button(text(format!("{chevron} {title}"))).on_press(toggle)].spacing(4);
    if open {
        section = section.push(text(content));
    }
    section.into()
}
