use std::time::Duration;

use crate::{ApiRequest, PanelId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one HTTP request and report back with
    /// `Msg::ResponseReceived` for the same panel.
    Request { panel: PanelId, request: ApiRequest },
    /// Deliver `Msg::Triggered(panel)` after `delay`.
    ScheduleTrigger { panel: PanelId, delay: Duration },
}
