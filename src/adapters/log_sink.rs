//! Log-based observer adapter.
//!
//! Implements [`StatusObserver`] by writing every panel notification to
//! the `log` facade.  A display or push-notification adapter would
//! implement the same trait.

use log::{Level, log};

use crate::app::events::PanelEvent;
use crate::app::ports::StatusObserver;
use crate::fsm::AlarmStatus;

/// Observer that logs every notification.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }

    /// Level and message for one notification.  A full alarm is a warning.
    fn render(event: PanelEvent) -> (Level, String) {
        match event {
            PanelEvent::AlarmStatusChanged(AlarmStatus::Alarm) => {
                (Level::Warn, format!("ALARM | {}", AlarmStatus::Alarm))
            }
            PanelEvent::AlarmStatusChanged(status) => (Level::Info, format!("ALARM | {status}")),
            PanelEvent::SensorStateRefresh => {
                (Level::Info, "STATE | sensors/arming refreshed".to_owned())
            }
            PanelEvent::CatDetected(is_cat) => (
                Level::Info,
                format!("CAMERA | cat={}", if is_cat { "yes" } else { "no" }),
            ),
        }
    }

    fn emit(event: PanelEvent) {
        let (level, line) = Self::render(event);
        log!(level, "{}", line);
    }
}

impl StatusObserver for LogObserver {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        Self::emit(PanelEvent::AlarmStatusChanged(status));
    }

    fn sensor_state_refreshed(&self) {
        Self::emit(PanelEvent::SensorStateRefresh);
    }

    fn cat_detected(&self, is_cat: bool) {
        Self::emit(PanelEvent::CatDetected(is_cat));
    }
}
