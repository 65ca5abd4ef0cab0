//! In-memory page surface: the anchors the controller reads and writes.

use dashboard_core::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Heading { text: String },
    Region { html: String },
    Button { label: String, enabled: bool },
    NumberInput { value: String },
    Checkbox { checked: bool },
    Indicator { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    SetRegionHtml { id: &'static str, html: String },
    SetControlEnabled { id: &'static str, enabled: bool },
    SetControlText { id: &'static str, text: String },
    SetIndicatorText { id: &'static str, text: String },
    SetInputValue { id: &'static str, value: String },
    SetChecked { id: &'static str, checked: bool },
}

impl PageCommand {
    pub fn target(&self) -> &'static str {
        match self {
            PageCommand::SetRegionHtml { id, .. }
            | PageCommand::SetControlEnabled { id, .. }
            | PageCommand::SetControlText { id, .. }
            | PageCommand::SetIndicatorText { id, .. }
            | PageCommand::SetInputValue { id, .. }
            | PageCommand::SetChecked { id, .. } => id,
        }
    }
}

/// Elements in document order, addressed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: Vec<(String, Element)>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, element: Element) {
        self.elements.push((id.into(), element));
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|(key, _)| key == id)?;
        Some(self.elements.remove(index).1)
    }

    pub fn has_anchor(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, element)| element)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|(key, _)| key == id)
            .map(|(_, element)| element)
    }

    /// Disabled buttons swallow clicks, as in a browser.
    pub fn is_clickable(&self, id: &str) -> bool {
        matches!(self.get(id), Some(Element::Button { enabled: true, .. }))
    }

    /// Applies `command`; returns whether the element changed. Commands for
    /// unknown ids or mismatched element kinds are ignored.
    pub fn apply(&mut self, command: PageCommand) -> bool {
        let Some(element) = self.get_mut(command.target()) else {
            return false;
        };
        match (element, command) {
            (Element::Region { html }, PageCommand::SetRegionHtml { html: next, .. })
            | (Element::Button { label: html, .. }, PageCommand::SetControlText { text: next, .. })
            | (Element::Indicator { text: html }, PageCommand::SetIndicatorText { text: next, .. })
            | (Element::NumberInput { value: html }, PageCommand::SetInputValue { value: next, .. }) => {
                replace(html, next)
            }
            (Element::Button { enabled, .. }, PageCommand::SetControlEnabled { enabled: next, .. })
            | (Element::Checkbox { checked: enabled }, PageCommand::SetChecked { checked: next, .. }) => {
                replace(enabled, next)
            }
            _ => false,
        }
    }

    /// Serializes the whole page as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<main class=\"dashboard\">\n");
        for (id, element) in &self.elements {
            let id = escape_html(id);
            let line = match element {
                Element::Heading { text } => format!("<h2>{}</h2>", escape_html(text)),
                Element::Region { html } => format!("<div id=\"{id}\">{html}</div>"),
                Element::Button { label, enabled } => format!(
                    "<button id=\"{id}\"{}>{}</button>",
                    if *enabled { "" } else { " disabled" },
                    escape_html(label)
                ),
                Element::NumberInput { value } => format!(
                    "<input id=\"{id}\" type=\"number\" min=\"1\" value=\"{}\">",
                    escape_html(value)
                ),
                Element::Checkbox { checked } => format!(
                    "<input id=\"{id}\" type=\"checkbox\"{}>",
                    if *checked { " checked" } else { "" }
                ),
                Element::Indicator { text } => {
                    format!("<span id=\"{id}\">{}</span>", escape_html(text))
                }
            };
            html.push_str(&line);
            html.push('\n');
        }
        html.push_str("</main>\n");
        html
    }
}

fn replace<T: PartialEq>(slot: &mut T, next: T) -> bool {
    if *slot == next {
        false
    } else {
        *slot = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Page {
        let mut page = Page::new();
        page.push("out", Element::Region { html: String::new() });
        page.push(
            "go",
            Element::Button {
                label: "Go".to_string(),
                enabled: true,
            },
        );
        page
    }

    #[test]
    fn apply_reports_changes_only() {
        let mut page = sample();
        let set = PageCommand::SetRegionHtml {
            id: "out",
            html: "<b>x</b>".to_string(),
        };
        assert!(page.apply(set.clone()));
        assert!(!page.apply(set));
        assert!(!page.apply(PageCommand::SetControlEnabled {
            id: "missing",
            enabled: false
        }));
    }

    #[test]
    fn mismatched_kind_is_ignored() {
        let mut page = sample();
        assert!(!page.apply(PageCommand::SetChecked {
            id: "go",
            checked: true
        }));
        assert_eq!(
            page.get("go"),
            Some(&Element::Button {
                label: "Go".to_string(),
                enabled: true
            })
        );
    }

    #[test]
    fn disabled_button_is_not_clickable() {
        let mut page = sample();
        assert!(page.is_clickable("go"));
        page.apply(PageCommand::SetControlEnabled {
            id: "go",
            enabled: false,
        });
        assert!(!page.is_clickable("go"));
        assert!(!page.is_clickable("out"));
        assert!(page.to_html().contains("<button id=\"go\" disabled>Go</button>"));
    }
}
