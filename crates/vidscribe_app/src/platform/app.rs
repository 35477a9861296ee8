use std::sync::mpsc;
use std::time::Duration;

use client_logging::client_info;
use iced::{Element, Subscription, Task};
use vidscribe_core::{AppState, AppViewModel, Msg};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load();
    logging::initialize(config.log_destination);
    client_info!("starting vidscribe, base_url={}", config.api.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(&config, msg_tx)
        .map_err(|err| anyhow::anyhow!("failed to start api client: {err}"))?;

    // `iced::application` requires an `Fn` boot closure, but the runner and
    // receiver can only be moved into the app once. Hand them out exactly once
    // via a take-on-first-call cell.
    let boot_resources = std::cell::RefCell::new(Some((runner, msg_rx)));
    iced::application(
        move || {
            let (runner, msg_rx) = boot_resources
                .borrow_mut()
                .take()
                .expect("boot closure invoked more than once");
            (VidscribeApp::new(runner, msg_rx), Task::none())
        },
        VidscribeApp::update,
        VidscribeApp::view,
    )
    .title("Vidscribe")
    .subscription(VidscribeApp::subscription)
    .run()?;
    Ok(())
}

struct VidscribeApp {
    state: AppState,
    view_model: AppViewModel,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl VidscribeApp {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        let state = AppState::new();
        let view_model = state.view();
        Self {
            state,
            view_model,
            runner,
            msg_rx,
        }
    }

    fn update(&mut self, msg: Msg) -> Task<Msg> {
        match msg {
            Msg::Tick => self.pump_api_events(),
            msg => self.dispatch(msg),
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Msg> {
        ui::render::view(&self.view_model)
    }

    fn subscription(&self) -> Subscription<Msg> {
        // Drives the drain of settlement events from the effect runner.
        iced::time::every(Duration::from_millis(75)).map(|_| Msg::Tick)
    }

    fn pump_api_events(&mut self) {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = vidscribe_core::update(state, msg);
        if state.consume_dirty() {
            self.view_model = state.view();
        }
        self.state = state;
        self.runner.enqueue(effects);
    }
}
