// Connection status domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Predicting,
    Error,
}

impl ConnectionStatus {
    /// CSS class applied to the status region
    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "status-connected",
            ConnectionStatus::Predicting => "status-predicting",
            ConnectionStatus::Error => "status-error",
        }
    }
}

const ERROR_MARKERS: [&str; 4] = ["not detected", "error", "disconnected", "failed"];
const CONNECTED_MARKERS: [&str; 2] = ["connected", "active"];

/// Classify a free-text status message.
///
/// Matching is case-insensitive. Error markers are checked first, so
/// "Disconnected" and "error while active" are both errors. Connected
/// markers come next. Anything else (e.g. "Gathering data... 3/24") means
/// the backend is still warming up its forecast.
pub fn classify_status(msg: &str) -> ConnectionStatus {
    let msg = msg.to_lowercase();
    if ERROR_MARKERS.iter().any(|m| msg.contains(m)) {
        ConnectionStatus::Error
    } else if CONNECTED_MARKERS.iter().any(|m| msg.contains(m)) {
        ConnectionStatus::Connected
    } else {
        ConnectionStatus::Predicting
    }
}
