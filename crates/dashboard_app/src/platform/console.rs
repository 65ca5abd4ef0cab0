//! Line-oriented operator input.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use dashboard_core::anchors::{
    CHECK_BUTTON, CONNECTOR_BUTTON, DAYS_BACK_INPUT, DOCUMENTS_BUTTON, FNS_ONLY_INPUT,
    LOGS_BUTTON, STATUS_BUTTON,
};

use super::app::AppEvent;

pub const HELP: &str = "\
commands:
  status                  refresh system status
  sbis                    test the SBIS connection
  check                   run a document check now
  docs [DAYS] [fns|all]   list documents, optionally setting the filters first
  logs                    show the processing log
  click <control-id>      click any button
  set <input-id> <value>  edit days-back or fns-only (on/off)
  show                    print the whole page
  help                    print this help
  quit                    exit
";

/// What the operator did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ButtonClicked { control_id: String },
    InputChanged { control_id: String, text: String },
    CheckboxToggled { control_id: String, checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Ui(Vec<UiEvent>),
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (head, args) {
        ("status", []) => click(STATUS_BUTTON),
        ("sbis", []) => click(CONNECTOR_BUTTON),
        ("check", []) => click(CHECK_BUTTON),
        ("logs", []) => click(LOGS_BUTTON),
        ("docs", args) if args.len() <= 2 => {
            let mut events = Vec::new();
            for arg in args {
                match *arg {
                    "fns" => events.push(toggle(true)),
                    "all" => events.push(toggle(false)),
                    days => events.push(UiEvent::InputChanged {
                        control_id: DAYS_BACK_INPUT.to_string(),
                        text: days.to_string(),
                    }),
                }
            }
            events.push(UiEvent::ButtonClicked {
                control_id: DOCUMENTS_BUTTON.to_string(),
            });
            ConsoleCommand::Ui(events)
        }
        ("click", [control_id]) => click(control_id),
        ("set", [control_id, value]) if *control_id == FNS_ONLY_INPUT => {
            ConsoleCommand::Ui(vec![toggle(parse_switch(value)?)])
        }
        ("set", [control_id, value]) => ConsoleCommand::Ui(vec![UiEvent::InputChanged {
            control_id: control_id.to_string(),
            text: value.to_string(),
        }]),
        ("show", []) => ConsoleCommand::Show,
        ("help", []) => ConsoleCommand::Help,
        ("quit" | "exit", []) => ConsoleCommand::Quit,
        _ => return Err(format!("unrecognized command: {}", line.trim())),
    };
    Ok(Some(command))
}

fn click(control_id: &str) -> ConsoleCommand {
    ConsoleCommand::Ui(vec![UiEvent::ButtonClicked {
        control_id: control_id.to_string(),
    }])
}

fn toggle(checked: bool) -> UiEvent {
    UiEvent::CheckboxToggled {
        control_id: FNS_ONLY_INPUT.to_string(),
        checked,
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected on/off, got {other}")),
    }
}

/// Reads stdin on a background thread. Parse errors are reported on stderr
/// and skipped; end of input sends `AppEvent::InputClosed`.
pub fn spawn_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Ok(Some(command)) => {
                    if tx.send(AppEvent::Console(command)).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(message) => eprintln!("{message} (try `help`)"),
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_click_panel_buttons() {
        assert_eq!(parse_line("  check "), Ok(Some(click(CHECK_BUTTON))));
        assert_eq!(parse_line("sbis"), Ok(Some(click(CONNECTOR_BUTTON))));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn docs_sets_filters_before_clicking() {
        assert_eq!(
            parse_line("docs 14 fns"),
            Ok(Some(ConsoleCommand::Ui(vec![
                UiEvent::InputChanged {
                    control_id: DAYS_BACK_INPUT.to_string(),
                    text: "14".to_string(),
                },
                toggle(true),
                UiEvent::ButtonClicked {
                    control_id: DOCUMENTS_BUTTON.to_string(),
                },
            ])))
        );
    }

    #[test]
    fn set_fns_only_requires_a_switch_value() {
        assert_eq!(
            parse_line("set fns-only off"),
            Ok(Some(ConsoleCommand::Ui(vec![toggle(false)])))
        );
        assert!(parse_line("set fns-only maybe").is_err());
        assert!(parse_line("docs 1 2 3").is_err());
    }
}
