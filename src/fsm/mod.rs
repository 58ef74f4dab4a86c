//! Arming / alarm decision rules.
//!
//! The panel has two orthogonal status values: the arming mode chosen by
//! the user and the alarm level derived from events.  This module holds
//! both enums and the pure rule functions that decide how the alarm
//! level moves.  Nothing here touches a port; the
//! [`SecurityService`](crate::app::service::SecurityService) feeds each
//! rule a [`PanelSnapshot`] and applies the outcome.
//!
//! ```text
//!              [sensor trips, armed]        [sensor trips, armed]
//!  NO_ALARM ───────────────────────▶ PENDING ───────────────────▶ ALARM
//!     ▲                                 │                          │
//!     │      [all sensors withdrawn]    │                          │
//!     ├─────────────────────────────────┘                          │
//!     │                                                            │
//!     └──────────────────[disarm / no cat, sensors idle]───────────┘
//!
//!  any ──[cat visible while ARMED_HOME]──▶ ALARM
//! ```

pub mod context;

use core::fmt;

use context::PanelSnapshot;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status values
// ---------------------------------------------------------------------------

/// Arming mode of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub const ALL: [Self; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    /// True for either armed mode.
    pub const fn is_armed(self) -> bool {
        matches!(self, Self::ArmedHome | Self::ArmedAway)
    }

    /// Stable lowercase name used in logs and the simulator.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disarmed => "disarmed",
            Self::ArmedHome => "armed_home",
            Self::ArmedAway => "armed_away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived alarm level.  Ordered: `NoAlarm < PendingAlarm < Alarm`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    pub const ALL: [Self; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NoAlarm => "no_alarm",
            Self::PendingAlarm => "pending_alarm",
            Self::Alarm => "alarm",
        }
    }

    /// Next level up for a fresh sensor trip.  `Alarm` saturates.
    pub const fn escalated(self) -> Self {
        match self {
            Self::NoAlarm => Self::PendingAlarm,
            Self::PendingAlarm | Self::Alarm => Self::Alarm,
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// What an arming request does besides persisting the new mode.
/// Exactly one branch applies per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmingOutcome {
    /// A cat is in view and the panel is being armed for home occupancy.
    RaiseAlarm,
    /// Disarming always quiesces the alarm.
    ClearAlarm,
    /// Fresh arming cycle: every sensor is forced inactive.
    ResetSensors,
}

impl ArmingOutcome {
    /// The alarm level this outcome forces, if any.
    pub const fn alarm(self) -> Option<AlarmStatus> {
        match self {
            Self::RaiseAlarm => Some(AlarmStatus::Alarm),
            Self::ClearAlarm => Some(AlarmStatus::NoAlarm),
            Self::ResetSensors => None,
        }
    }
}

/// Decide the side effect of an arming request.
///
/// The cat check runs first, so a visible cat wins over everything else
/// when arming for home.
pub fn on_arming_request(snap: &PanelSnapshot, requested: ArmingStatus) -> ArmingOutcome {
    if snap.cat_present && requested == ArmingStatus::ArmedHome {
        ArmingOutcome::RaiseAlarm
    } else if requested == ArmingStatus::Disarmed {
        ArmingOutcome::ClearAlarm
    } else {
        ArmingOutcome::ResetSensors
    }
}

/// Alarm change caused by a fresh classifier verdict.
pub fn on_cat_verdict(snap: &PanelSnapshot, is_cat: bool) -> Option<AlarmStatus> {
    if is_cat && snap.arming == ArmingStatus::ArmedHome {
        Some(AlarmStatus::Alarm)
    } else if !is_cat && !snap.any_sensor_active {
        Some(AlarmStatus::NoAlarm)
    } else {
        None
    }
}

/// Alarm change caused by a sensor flag write, judged against the flag the
/// sensor held before the write.
///
/// Returns `None` when the level must stay where it is.  A fresh trip only
/// escalates an armed panel; re-triggering an active sensor while pending
/// raises the alarm in any mode.
pub fn on_sensor_change(
    snap: &PanelSnapshot,
    was_active: bool,
    now_active: bool,
) -> Option<AlarmStatus> {
    match (was_active, now_active) {
        (false, true) if snap.arming.is_armed() && snap.alarm != AlarmStatus::Alarm => {
            Some(snap.alarm.escalated())
        }
        (true, true) if snap.alarm == AlarmStatus::PendingAlarm => Some(AlarmStatus::Alarm),
        _ => None,
    }
}

/// Runs after every sensor write: a pending alarm clears itself once no
/// sensor is active any more.
pub fn settle_pending(snap: &PanelSnapshot) -> Option<AlarmStatus> {
    (snap.alarm == AlarmStatus::PendingAlarm && !snap.any_sensor_active)
        .then_some(AlarmStatus::NoAlarm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(arming: ArmingStatus, alarm: AlarmStatus) -> PanelSnapshot {
        PanelSnapshot {
            arming,
            alarm,
            ..PanelSnapshot::default()
        }
    }

    #[test]
    fn default_values_are_quiescent() {
        assert_eq!(ArmingStatus::default(), ArmingStatus::Disarmed);
        assert_eq!(AlarmStatus::default(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn escalation_saturates_at_alarm() {
        assert_eq!(AlarmStatus::NoAlarm.escalated(), AlarmStatus::PendingAlarm);
        assert_eq!(AlarmStatus::PendingAlarm.escalated(), AlarmStatus::Alarm);
        assert_eq!(AlarmStatus::Alarm.escalated(), AlarmStatus::Alarm);
    }

    #[test]
    fn cat_wins_when_arming_home() {
        let mut s = snap(ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
        s.cat_present = true;
        assert_eq!(
            on_arming_request(&s, ArmingStatus::ArmedHome),
            ArmingOutcome::RaiseAlarm
        );
        assert_eq!(
            on_arming_request(&s, ArmingStatus::ArmedAway),
            ArmingOutcome::ResetSensors
        );
        assert_eq!(
            on_arming_request(&s, ArmingStatus::Disarmed),
            ArmingOutcome::ClearAlarm
        );
    }

    #[test]
    fn disarm_clears_from_every_level() {
        for alarm in AlarmStatus::ALL {
            let s = snap(ArmingStatus::ArmedAway, alarm);
            let outcome = on_arming_request(&s, ArmingStatus::Disarmed);
            assert_eq!(outcome.alarm(), Some(AlarmStatus::NoAlarm));
        }
    }

    #[test]
    fn arming_without_cat_resets_sensors() {
        for requested in [ArmingStatus::ArmedHome, ArmingStatus::ArmedAway] {
            let s = snap(ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
            assert_eq!(on_arming_request(&s, requested), ArmingOutcome::ResetSensors);
            assert_eq!(on_arming_request(&s, requested).alarm(), None);
        }
    }

    #[test]
    fn cat_verdict_rules() {
        let home = snap(ArmingStatus::ArmedHome, AlarmStatus::NoAlarm);
        assert_eq!(on_cat_verdict(&home, true), Some(AlarmStatus::Alarm));

        let away = snap(ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm);
        assert_eq!(on_cat_verdict(&away, true), None);

        let quiet = snap(ArmingStatus::ArmedAway, AlarmStatus::Alarm);
        assert_eq!(on_cat_verdict(&quiet, false), Some(AlarmStatus::NoAlarm));

        let mut busy = quiet;
        busy.any_sensor_active = true;
        assert_eq!(on_cat_verdict(&busy, false), None);
    }

    #[test]
    fn fresh_trip_escalates_while_armed() {
        for arming in [ArmingStatus::ArmedHome, ArmingStatus::ArmedAway] {
            let s = snap(arming, AlarmStatus::NoAlarm);
            assert_eq!(on_sensor_change(&s, false, true), Some(AlarmStatus::PendingAlarm));
            let s = snap(arming, AlarmStatus::PendingAlarm);
            assert_eq!(on_sensor_change(&s, false, true), Some(AlarmStatus::Alarm));
            let s = snap(arming, AlarmStatus::Alarm);
            assert_eq!(on_sensor_change(&s, false, true), None);
        }
    }

    #[test]
    fn disarmed_panel_ignores_fresh_trips() {
        for alarm in AlarmStatus::ALL {
            let s = snap(ArmingStatus::Disarmed, alarm);
            for (was, now) in [(false, true), (true, false), (false, false)] {
                assert_eq!(on_sensor_change(&s, was, now), None);
            }
        }
    }

    #[test]
    fn retrigger_while_pending_raises_alarm_in_any_mode() {
        for arming in ArmingStatus::ALL {
            let s = snap(arming, AlarmStatus::PendingAlarm);
            assert_eq!(on_sensor_change(&s, true, true), Some(AlarmStatus::Alarm));
        }
        let s = snap(ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
        assert_eq!(on_sensor_change(&s, true, true), None);
    }

    #[test]
    fn retrigger_only_escalates_pending() {
        let s = snap(ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm);
        assert_eq!(on_sensor_change(&s, true, true), Some(AlarmStatus::Alarm));
        let s = snap(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm);
        assert_eq!(on_sensor_change(&s, true, true), None);
    }

    #[test]
    fn deactivation_never_changes_alarm_directly() {
        for alarm in AlarmStatus::ALL {
            let s = snap(ArmingStatus::ArmedHome, alarm);
            assert_eq!(on_sensor_change(&s, true, false), None);
            assert_eq!(on_sensor_change(&s, false, false), None);
        }
    }

    #[test]
    fn pending_settles_only_when_all_idle() {
        let mut s = snap(ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm);
        assert_eq!(settle_pending(&s), Some(AlarmStatus::NoAlarm));
        s.any_sensor_active = true;
        assert_eq!(settle_pending(&s), None);
        let s = snap(ArmingStatus::ArmedAway, AlarmStatus::Alarm);
        assert_eq!(settle_pending(&s), None);
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&ArmingStatus::ArmedHome).unwrap();
        assert_eq!(json, "\"armed_home\"");
        let alarm: AlarmStatus = serde_json::from_str("\"pending_alarm\"").unwrap();
        assert_eq!(alarm, AlarmStatus::PendingAlarm);
    }
}
