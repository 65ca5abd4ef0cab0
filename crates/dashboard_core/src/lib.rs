//! Dashboard core: panel state machine, descriptors and pure rendering.
pub mod anchors;
mod descriptor;
mod effect;
mod format;
mod model;
mod msg;
mod panel;
pub mod render;
mod state;
mod update;
mod view_model;

pub use anchors::{initialize, Bindings, MissingAnchors};
pub use descriptor::{
    descriptor, ApiRequest, ControlSpec, HttpMethod, PanelDescriptor, PAGE_LIMIT, UNKNOWN_ERROR,
};
pub use effect::Effect;
pub use format::{escape_html, format_date, format_local, format_timestamp};
pub use model::{
    CheckReport, ConnectorReport, DocumentRecord, DocumentStatistics, ProcessingLogEntry,
    ServiceConfig, StatusSnapshot,
};
pub use msg::{Msg, TransportFailure};
pub use panel::{ControlState, PanelData, PanelId, PanelState, Phase};
pub use state::{DashboardState, COUNT_LOADING, DEFAULT_DAYS_BACK};
pub use update::update;
pub use view_model::{DashboardViewModel, PanelView};
