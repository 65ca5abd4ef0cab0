use std::io::{self, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use chrono::Local;
use dashboard_core::anchors::{DAYS_BACK_INPUT, FNS_ONLY_INPUT};
use dashboard_core::{initialize, update, Bindings, DashboardState, Msg};
use dashboard_logging::{dash_debug, dash_error, dash_info, dash_warn};

use super::config::{load_config, DashboardConfig};
use super::console::{self, ConsoleCommand, UiEvent, HELP};
use super::effects::{Clock, EffectRunner};
use super::logging;
use super::page::{Element, Page};
use super::ui;

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Console(ConsoleCommand),
    /// A message produced by an effect: a scheduled trigger or a response.
    Runner(Msg),
    /// Operator input reached end of file.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub fn run_app(config_path: &Path) -> anyhow::Result<()> {
    let (config, config_error) = match load_config(config_path) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (DashboardConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination, config.log_level());
    if let Some(err) = config_error {
        dash_warn!("{}; continuing with defaults", err);
    }
    dash_info!(
        "dashboard starting against {}{}",
        config.base_url,
        config.api_prefix
    );

    let page = ui::layout::standard_page(config.initial_days_back, config.initial_fns_only);
    let state = DashboardState::with_inputs(config.initial_days_back, config.initial_fns_only);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let clock: Clock = Arc::new(Local::now);
    let runner = EffectRunner::new(config.client_settings(), tx.clone(), clock)
        .context("starting the request engine")?;

    let mut dashboard = Dashboard::start(page, state, runner, io::stdout())?;
    console::spawn_reader(tx);
    dashboard.run(&rx)
}

/// Owns the controller state and the page it drives.
struct Dashboard<W: Write> {
    state: DashboardState,
    bindings: Bindings,
    runner: EffectRunner,
    page: Page,
    out: W,
    input_closed: bool,
}

impl<W: Write> Dashboard<W> {
    /// Wires the page. Fails without touching the page if any anchor is
    /// missing.
    fn start(
        page: Page,
        state: DashboardState,
        mut runner: EffectRunner,
        out: W,
    ) -> anyhow::Result<Self> {
        let (bindings, effects) = match initialize(|id| page.has_anchor(id)) {
            Ok(wired) => wired,
            Err(err) => {
                dash_error!("{}", err);
                return Err(err.into());
            }
        };
        runner.enqueue(effects);

        let mut dashboard = Self {
            state,
            bindings,
            runner,
            page,
            out,
            input_closed: false,
        };
        dashboard.render()?;
        Ok(dashboard)
    }

    fn run(&mut self, rx: &mpsc::Receiver<AppEvent>) -> anyhow::Result<()> {
        while let Ok(event) = rx.recv() {
            if self.handle(event)? == Flow::Stop {
                break;
            }
        }
        dash_info!("dashboard stopped");
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) -> io::Result<Flow> {
        match event {
            AppEvent::Console(ConsoleCommand::Ui(events)) => {
                for event in events {
                    self.handle_ui(event)?;
                }
            }
            AppEvent::Console(ConsoleCommand::Show) => {
                let html = self.page.to_html();
                self.out.write_all(html.as_bytes())?;
            }
            AppEvent::Console(ConsoleCommand::Help) => self.out.write_all(HELP.as_bytes())?,
            AppEvent::Console(ConsoleCommand::Quit) => return Ok(Flow::Stop),
            AppEvent::Runner(msg) => {
                self.runner.settled();
                self.dispatch(msg)?;
            }
            AppEvent::InputClosed => {
                dash_debug!("input closed; waiting for outstanding requests");
                self.input_closed = true;
            }
        }
        self.out.flush()?;

        if self.input_closed && self.is_settled() {
            Ok(Flow::Stop)
        } else {
            Ok(Flow::Continue)
        }
    }

    fn handle_ui(&mut self, event: UiEvent) -> io::Result<()> {
        let msg = match event {
            UiEvent::ButtonClicked { control_id } => {
                if !self.page.is_clickable(&control_id) {
                    dash_debug!("click on {} ignored", control_id);
                    return Ok(());
                }
                self.bindings.dispatch(&control_id)
            }
            UiEvent::InputChanged { control_id, text } if control_id == DAYS_BACK_INPUT => {
                Some(Msg::DaysBackChanged(text))
            }
            UiEvent::CheckboxToggled {
                control_id,
                checked,
            } if control_id == FNS_ONLY_INPUT => Some(Msg::FnsOnlyToggled(checked)),
            other => {
                writeln!(self.out, "no such control: {:?}", other)?;
                None
            }
        };
        match msg {
            Some(msg) => self.dispatch(msg),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        self.render()
    }

    /// Pushes the view to the page and echoes every element that changed.
    fn render(&mut self) -> io::Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        let view = self.state.view();
        let mut changed: Vec<&'static str> = Vec::new();
        for command in ui::render::render(&view) {
            let target = command.target();
            if self.page.apply(command) && !changed.contains(&target) {
                changed.push(target);
            }
        }
        for id in changed {
            if let Some(element) = self.page.get(id) {
                writeln!(self.out, "[{id}] {}", describe(element))?;
            }
        }
        Ok(())
    }

    fn is_settled(&self) -> bool {
        self.runner.is_idle() && !self.state.any_loading()
    }
}

fn describe(element: &Element) -> String {
    match element {
        Element::Heading { text } => text.clone(),
        Element::Region { html } => html.clone(),
        Element::Button { label, enabled } if *enabled => label.clone(),
        Element::Button { label, .. } => format!("{label} (disabled)"),
        Element::NumberInput { value } => value.clone(),
        Element::Checkbox { checked } => checked.to_string(),
        Element::Indicator { text } => text.clone(),
    }
}
