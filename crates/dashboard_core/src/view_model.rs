use crate::{ControlState, Phase, PanelId};

/// Everything the page needs to draw itself, already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    pub panels: Vec<PanelView>,
    pub docs_count: String,
    pub days_back: String,
    pub fns_only: bool,
    pub dirty: bool,
}

impl DashboardViewModel {
    pub fn panel(&self, panel: PanelId) -> Option<&PanelView> {
        self.panels.iter().find(|view| view.panel == panel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub panel: PanelId,
    pub phase: Phase,
    pub region: &'static str,
    pub html: String,
    pub control_id: &'static str,
    pub control: ControlState,
}
