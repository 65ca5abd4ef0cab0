use crate::{DashboardState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let effects = match msg {
        Msg::Triggered(panel) => state
            .begin(panel)
            .map(|request| vec![Effect::Request { panel, request }])
            .unwrap_or_default(),
        Msg::DaysBackChanged(text) => {
            state.set_days_back(text);
            Vec::new()
        }
        Msg::FnsOnlyToggled(fns_only) => {
            state.set_fns_only(fns_only);
            Vec::new()
        }
        Msg::ResponseReceived {
            panel,
            outcome,
            received_at,
        } => {
            state.settle(panel, outcome, received_at);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
