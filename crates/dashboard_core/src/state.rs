use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use dashboard_logging::{dash_debug, dash_info, dash_warn};
use serde_json::Value;

use crate::descriptor::PAGE_LIMIT;
use crate::render::render_panel;
use crate::view_model::{DashboardViewModel, PanelView};
use crate::{descriptor, ApiRequest, ControlState, PanelData, PanelId, PanelState, TransportFailure};

/// Caption of the document-count indicator while a list request is in flight.
pub const COUNT_LOADING: &str = "Loading...";
pub const DEFAULT_DAYS_BACK: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PanelSlot {
    state: PanelState,
    control: ControlState,
}

impl PanelSlot {
    fn idle(panel: PanelId) -> Self {
        Self {
            state: PanelState::Idle,
            control: ControlState {
                enabled: true,
                label: descriptor(panel).control.idle_label,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    panels: BTreeMap<PanelId, PanelSlot>,
    docs_count: String,
    days_back: String,
    fns_only: bool,
    dirty: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::with_inputs(DEFAULT_DAYS_BACK, false)
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given filter inputs pre-filled.
    pub fn with_inputs(days_back: u32, fns_only: bool) -> Self {
        Self {
            panels: PanelId::ALL
                .into_iter()
                .map(|panel| (panel, PanelSlot::idle(panel)))
                .collect(),
            docs_count: "0".to_string(),
            days_back: days_back.to_string(),
            fns_only,
            dirty: true,
        }
    }

    pub fn panel(&self, panel: PanelId) -> &PanelState {
        &self.slot(panel).state
    }

    pub fn control(&self, panel: PanelId) -> &ControlState {
        &self.slot(panel).control
    }

    pub fn docs_count(&self) -> &str {
        &self.docs_count
    }

    pub fn days_back(&self) -> &str {
        &self.days_back
    }

    pub fn fns_only(&self) -> bool {
        self.fns_only
    }

    pub fn any_loading(&self) -> bool {
        self.panels.values().any(|slot| slot.state.is_loading())
    }

    pub fn view(&self) -> DashboardViewModel {
        DashboardViewModel {
            panels: self
                .panels
                .iter()
                .map(|(panel, slot)| {
                    let descriptor = descriptor(*panel);
                    PanelView {
                        panel: *panel,
                        phase: slot.state.phase(),
                        region: descriptor.region,
                        html: render_panel(*panel, &slot.state),
                        control_id: descriptor.control.id,
                        control: slot.control.clone(),
                    }
                })
                .collect(),
            docs_count: self.docs_count.clone(),
            days_back: self.days_back.clone(),
            fns_only: self.fns_only,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_days_back(&mut self, text: String) {
        if self.days_back != text {
            self.days_back = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_fns_only(&mut self, fns_only: bool) {
        if self.fns_only != fns_only {
            self.fns_only = fns_only;
            self.dirty = true;
        }
    }

    /// Moves `panel` to Loading and returns the request to issue. Returns
    /// `None` while a request for the panel is still in flight, or when the
    /// panel's inputs are invalid (the panel then shows the error directly).
    pub(crate) fn begin(&mut self, panel: PanelId) -> Option<ApiRequest> {
        if self.panel(panel).is_loading() {
            dash_debug!(panel: panel, "trigger ignored, request already in flight");
            return None;
        }

        let query = match self.query_for(panel) {
            Ok(query) => query,
            Err(message) => {
                dash_warn!(panel: panel, "not requesting: {}", message);
                self.slot_mut(panel).state = PanelState::Error(message);
                if panel == PanelId::Documents {
                    self.docs_count = "0".to_string();
                }
                self.dirty = true;
                return None;
            }
        };

        let descriptor = descriptor(panel);
        let slot = self.slot_mut(panel);
        slot.state = PanelState::Loading;
        slot.control = ControlState {
            enabled: false,
            label: descriptor
                .control
                .busy_label
                .unwrap_or(descriptor.control.idle_label),
        };
        if panel == PanelId::Documents {
            self.docs_count = COUNT_LOADING.to_string();
        }
        self.dirty = true;

        dash_info!(panel: panel, "requesting {}", descriptor.path);
        Some(ApiRequest {
            method: descriptor.method,
            path: descriptor.path,
            query,
        })
    }

    /// Applies the settled request: one terminal state, then one release of
    /// the action control whichever branch was taken.
    pub(crate) fn settle(
        &mut self,
        panel: PanelId,
        outcome: Result<Value, TransportFailure>,
        received_at: DateTime<Local>,
    ) {
        if !self.panel(panel).is_loading() {
            dash_warn!(panel: panel, "dropping response, no request in flight");
            return;
        }

        let next = match outcome {
            Ok(body) => match descriptor(panel).decode(body, received_at) {
                Ok(data) => PanelState::Success(data),
                Err(message) => PanelState::Error(message),
            },
            Err(failure) => PanelState::Error(failure.message),
        };

        match &next {
            PanelState::Error(message) => dash_warn!(panel: panel, "failed: {}", message),
            _ => dash_info!(panel: panel, "loaded"),
        }

        if panel == PanelId::Documents {
            self.docs_count = match &next {
                PanelState::Success(PanelData::Documents(documents)) => documents.len().to_string(),
                _ => "0".to_string(),
            };
        }
        self.slot_mut(panel).state = next;
        self.release(panel);
        self.dirty = true;
    }

    fn release(&mut self, panel: PanelId) {
        self.slot_mut(panel).control = ControlState {
            enabled: true,
            label: descriptor(panel).control.idle_label,
        };
    }

    fn query_for(&self, panel: PanelId) -> Result<Vec<(&'static str, String)>, String> {
        match panel {
            PanelId::Documents => {
                let days_back = self
                    .days_back
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|days| *days > 0)
                    .ok_or_else(|| {
                        format!(
                            "days back must be a positive integer, got \"{}\"",
                            self.days_back
                        )
                    })?;
                Ok(vec![
                    ("days_back", days_back.to_string()),
                    ("fns_only", self.fns_only.to_string()),
                    ("limit", PAGE_LIMIT.to_string()),
                ])
            }
            PanelId::ProcessingLogs => Ok(vec![("limit", PAGE_LIMIT.to_string())]),
            PanelId::Status | PanelId::ConnectorTest | PanelId::CheckNow => Ok(Vec::new()),
        }
    }

    fn slot(&self, panel: PanelId) -> &PanelSlot {
        // Every panel gets a slot in `with_inputs` and slots are never removed.
        &self.panels[&panel]
    }

    fn slot_mut(&mut self, panel: PanelId) -> &mut PanelSlot {
        self.panels.entry(panel).or_insert_with(|| PanelSlot::idle(panel))
    }
}
