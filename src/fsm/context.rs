//! Read-only view of the panel handed to every rule.
//!
//! The service assembles a fresh [`PanelSnapshot`] from the store right
//! before each decision, so a rule always judges one consistent moment
//! and never reads half-applied state.

use super::{AlarmStatus, ArmingStatus};

/// Point-in-time inputs to the decision rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelSnapshot {
    /// Arming mode currently persisted in the store.
    pub arming: ArmingStatus,
    /// Alarm level currently persisted in the store.
    pub alarm: AlarmStatus,
    /// Whether the last processed camera frame showed a cat.
    pub cat_present: bool,
    /// True if at least one known sensor is active.
    pub any_sensor_active: bool,
}
