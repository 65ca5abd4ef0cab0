use dashboard_core::anchors::{DAYS_BACK_INPUT, DOCS_COUNT, FNS_ONLY_INPUT};
use dashboard_core::DashboardViewModel;

use crate::platform::page::PageCommand;

pub fn render(view: &DashboardViewModel) -> Vec<PageCommand> {
    let mut cmds = Vec::with_capacity(view.panels.len() * 3 + 3);

    for panel in &view.panels {
        cmds.push(PageCommand::SetRegionHtml {
            id: panel.region,
            html: panel.html.clone(),
        });
        cmds.push(PageCommand::SetControlEnabled {
            id: panel.control_id,
            enabled: panel.control.enabled,
        });
        cmds.push(PageCommand::SetControlText {
            id: panel.control_id,
            text: panel.control.label.to_string(),
        });
    }

    cmds.push(PageCommand::SetIndicatorText {
        id: DOCS_COUNT,
        text: view.docs_count.clone(),
    });
    cmds.push(PageCommand::SetInputValue {
        id: DAYS_BACK_INPUT,
        value: view.days_back.clone(),
    });
    cmds.push(PageCommand::SetChecked {
        id: FNS_ONLY_INPUT,
        checked: view.fns_only,
    });

    cmds
}
