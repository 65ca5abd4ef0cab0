use dashboard_core::anchors::*;
use dashboard_core::{descriptor, PanelId};

use crate::platform::page::{Element, Page};

/// Builds the dashboard page with every anchor the controller expects.
pub fn standard_page(days_back: u32, fns_only: bool) -> Page {
    let mut page = Page::new();

    section(&mut page, "System status", PanelId::Status);
    section(&mut page, "SBIS connection", PanelId::ConnectorTest);
    section(&mut page, "Document check", PanelId::CheckNow);

    heading(&mut page, "Documents");
    page.push(
        DAYS_BACK_INPUT,
        Element::NumberInput {
            value: days_back.to_string(),
        },
    );
    page.push(FNS_ONLY_INPUT, Element::Checkbox { checked: fns_only });
    button(&mut page, PanelId::Documents);
    page.push(
        DOCS_COUNT,
        Element::Indicator {
            text: "0".to_string(),
        },
    );
    region(&mut page, PanelId::Documents);

    section(&mut page, "Processing log", PanelId::ProcessingLogs);
    page
}

fn section(page: &mut Page, title: &str, panel: PanelId) {
    heading(page, title);
    button(page, panel);
    region(page, panel);
}

fn heading(page: &mut Page, title: &str) {
    let id = format!("heading-{}", title.to_lowercase().replace(' ', "-"));
    page.push(
        id,
        Element::Heading {
            text: title.to_string(),
        },
    );
}

fn button(page: &mut Page, panel: PanelId) {
    let control = descriptor(panel).control;
    page.push(
        control.id,
        Element::Button {
            label: control.idle_label.to_string(),
            enabled: true,
        },
    );
}

fn region(page: &mut Page, panel: PanelId) {
    page.push(
        descriptor(panel).region,
        Element::Region {
            html: String::new(),
        },
    );
}
