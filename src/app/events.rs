//! Outbound panel notifications.
//!
//! [`PanelEvent`] is the value form of the three
//! [`StatusObserver`](super::ports::StatusObserver) callbacks.  The
//! [`ObserverSet`](super::observers::ObserverSet) broadcasts one of these
//! and dispatches it to the matching callback on every observer; adapters
//! that want to queue or log notifications can work with the value
//! directly.

use serde::Serialize;

use crate::fsm::AlarmStatus;

use super::ports::StatusObserver;

/// Structured notifications emitted by the security service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum PanelEvent {
    /// A new alarm status was persisted.
    AlarmStatusChanged(AlarmStatus),

    /// Sensor flags / arming mode need to be re-read.
    SensorStateRefresh,

    /// Verdict for the last processed camera frame.
    CatDetected(bool),
}

impl PanelEvent {
    /// Invoke the matching callback on `observer`.
    pub fn deliver(self, observer: &dyn StatusObserver) {
        match self {
            Self::AlarmStatusChanged(status) => observer.alarm_status_changed(status),
            Self::SensorStateRefresh => observer.sensor_state_refreshed(),
            Self::CatDetected(is_cat) => observer.cat_detected(is_cat),
        }
    }
}
