#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! Every `dash_*` macro accepts either plain `format!` arguments or a leading
//! `panel: <expr>,` clause. The panel form logs under [`PANEL_TARGET`] and
//! prefixes the message with the panel identifier so one invocation can be
//! followed from trigger to render. Callers need `log` in their own
//! dependencies since the macros expand to it.

/// Log target used by the panel-scoped macro form.
pub const PANEL_TARGET: &str = "dashboard::panel";

#[doc(hidden)]
#[macro_export]
macro_rules! __dash_log {
    ($level:expr, panel: $panel:expr, $($arg:tt)+) => {{
        log::log!(
            target: $crate::PANEL_TARGET,
            $level,
            "[{}] {}",
            $panel,
            format_args!($($arg)+)
        );
    }};
    ($level:expr, $($arg:tt)+) => {{
        log::log!($level, $($arg)+);
    }};
}

/// Logs a trace-level message.
#[macro_export]
macro_rules! dash_trace {
    ($($arg:tt)+) => { $crate::__dash_log!(log::Level::Trace, $($arg)+) };
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! dash_debug {
    ($($arg:tt)+) => { $crate::__dash_log!(log::Level::Debug, $($arg)+) };
}

/// Logs an info-level message.
#[macro_export]
macro_rules! dash_info {
    ($($arg:tt)+) => { $crate::__dash_log!(log::Level::Info, $($arg)+) };
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! dash_warn {
    ($($arg:tt)+) => { $crate::__dash_log!(log::Level::Warn, $($arg)+) };
}

/// Logs an error-level message.
#[macro_export]
macro_rules! dash_error {
    ($($arg:tt)+) => { $crate::__dash_log!(log::Level::Error, $($arg)+) };
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: if a logger is already installed the call
/// does nothing.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    // reqwest/hyper chatter drowns the panel lines at debug level.
    let config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build();

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
