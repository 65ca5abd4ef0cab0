//! Page anchors and initialization.
//!
//! The anchor ids are the contract between the controller and the page
//! markup. Wiring is all-or-nothing: if any anchor is missing, nothing is
//! bound and no panel becomes interactive.

use std::collections::BTreeMap;
use std::time::Duration;

use dashboard_logging::{dash_debug, dash_error, dash_info};
use thiserror::Error;

use crate::{descriptor, Effect, Msg, PanelId};

pub const STATUS_REGION: &str = "status-content";
pub const CONNECTOR_REGION: &str = "sbis-content";
pub const CHECK_REGION: &str = "check-content";
pub const DOCUMENTS_REGION: &str = "documents-list";
pub const LOGS_REGION: &str = "logs-content";

pub const DOCS_COUNT: &str = "docs-count";
pub const DAYS_BACK_INPUT: &str = "days-back";
pub const FNS_ONLY_INPUT: &str = "fns-only";

pub const STATUS_BUTTON: &str = "update-status-btn";
pub const CONNECTOR_BUTTON: &str = "test-sbis-btn";
pub const CHECK_BUTTON: &str = "check-now-btn";
pub const DOCUMENTS_BUTTON: &str = "get-documents-btn";
pub const LOGS_BUTTON: &str = "get-logs-btn";

pub const REQUIRED_ANCHORS: [&str; 13] = [
    STATUS_REGION,
    CONNECTOR_REGION,
    CHECK_REGION,
    DOCUMENTS_REGION,
    LOGS_REGION,
    DOCS_COUNT,
    DAYS_BACK_INPUT,
    FNS_ONLY_INPUT,
    STATUS_BUTTON,
    CONNECTOR_BUTTON,
    CHECK_BUTTON,
    DOCUMENTS_BUTTON,
    LOGS_BUTTON,
];

/// Delay before the automatic status refresh after wiring.
pub const INITIAL_REFRESH_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing page anchors: {}", .missing.join(", "))]
pub struct MissingAnchors {
    pub missing: Vec<&'static str>,
}

/// Control id to panel trigger, built once during initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    handlers: BTreeMap<&'static str, PanelId>,
}

impl Bindings {
    fn for_all_panels() -> Self {
        let handlers = PanelId::ALL
            .into_iter()
            .map(|panel| (descriptor(panel).control.id, panel))
            .collect();
        Self { handlers }
    }

    /// Message produced by clicking `control_id`, if that control is bound.
    pub fn dispatch(&self, control_id: &str) -> Option<Msg> {
        self.handlers.get(control_id).copied().map(Msg::Triggered)
    }

    pub fn controls(&self) -> impl Iterator<Item = (&'static str, PanelId)> + '_ {
        self.handlers.iter().map(|(id, panel)| (*id, *panel))
    }
}

/// Checks every required anchor, then binds the controls and schedules the
/// first status refresh.
pub fn initialize(has_anchor: impl Fn(&str) -> bool) -> Result<(Bindings, Vec<Effect>), MissingAnchors> {
    let missing: Vec<&'static str> = REQUIRED_ANCHORS
        .into_iter()
        .filter(|id| !has_anchor(*id))
        .collect();
    if !missing.is_empty() {
        let err = MissingAnchors { missing };
        dash_error!("Dashboard wiring aborted: {}", err);
        return Err(err);
    }

    let bindings = Bindings::for_all_panels();
    for (control_id, panel) in bindings.controls() {
        dash_debug!(panel: panel, "bound to control {}", control_id);
    }
    dash_info!("Dashboard wired with {} controls", bindings.handlers.len());

    let effects = vec![Effect::ScheduleTrigger {
        panel: PanelId::Status,
        delay: INITIAL_REFRESH_DELAY,
    }];
    Ok((bindings, effects))
}
