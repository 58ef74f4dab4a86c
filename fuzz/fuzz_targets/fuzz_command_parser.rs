//! Fuzz target: `PanelCommand::from_str`
//!
//! Splits arbitrary input into lines, parses each one as a panel command
//! and applies every command that parses to a live service.  The parser
//! must never panic, and a disarm must always leave the panel quiet.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use std::str::FromStr;

use alarmpanel::adapters::classifier::ScriptedClassifier;
use alarmpanel::adapters::memory_store::InMemoryStore;
use alarmpanel::config::{PanelConfig, UnknownSensorPolicy};
use alarmpanel::{AlarmStatus, ArmingStatus, PanelCommand, SecurityService};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let config = PanelConfig {
        unknown_sensor_policy: UnknownSensorPolicy::Register,
        ..PanelConfig::default()
    };
    let store = InMemoryStore::new();
    let Ok(mut panel) = SecurityService::new(store, ScriptedClassifier::new(), config) else {
        return;
    };

    for line in text.lines() {
        let Ok(cmd) = PanelCommand::from_str(line) else {
            continue;
        };
        let disarm = cmd == PanelCommand::Arm(ArmingStatus::Disarmed);
        // Classifier errors (empty script) and removed sensors are expected.
        let _ = panel.handle_command(cmd);
        if disarm {
            assert_eq!(panel.alarm_status().ok(), Some(AlarmStatus::NoAlarm));
        }
    }
});
